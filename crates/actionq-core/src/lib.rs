pub mod config;
pub mod dispatch;
pub mod error;
pub mod io;
pub mod manager;
pub mod paths;
pub mod policy;
pub mod project;
pub mod record;
pub mod retention;
pub mod store;
pub mod types;

pub use error::{ActionqError, Result};
pub use manager::{QueueManager, Submitted};
pub use record::ActionRecord;
pub use types::{ActionKind, ActionStatus, AutonomyLevel};
