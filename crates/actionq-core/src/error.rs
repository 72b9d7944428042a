use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionqError {
    #[error("not initialized: run 'actionq init'")]
    NotInitialized,

    #[error("corrupt store file {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("store error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ActionqError>;
