pub mod passport;
pub mod task_timer;
pub mod user_directory;
pub mod work_log;
