pub mod common;
pub mod task;
pub mod transaction;
pub mod user;

pub use common::*;
pub use transaction::*;
