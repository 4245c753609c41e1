pub mod common;
pub mod health;
pub mod tasks;
pub mod users;
pub mod worklog;

pub use health::*;
pub use tasks::*;
pub use users::*;
pub use worklog::*;
