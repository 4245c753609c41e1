pub mod id;

pub use id::{InvalidId, TaskId, UserId};
