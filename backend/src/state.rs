use std::sync::Arc;

use crate::{
    config::Config,
    db::connection::DbPool,
    services::{
        passport::PassportLookup, task_timer::TaskTimer, user_directory::UserDirectory,
        work_log::WorkLog,
    },
};

/// Everything a handler needs, built once by `main` and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub passport: Arc<dyn PassportLookup>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config, passport: Arc<dyn PassportLookup>) -> Self {
        Self {
            pool,
            config,
            passport,
        }
    }

    pub fn task_timer(&self) -> TaskTimer {
        TaskTimer::new(self.pool.clone())
    }

    pub fn work_log(&self) -> WorkLog {
        WorkLog::new(self.pool.clone())
    }

    pub fn user_directory(&self) -> UserDirectory {
        UserDirectory::new(self.pool.clone(), Arc::clone(&self.passport))
    }
}
