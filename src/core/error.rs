use crate::core::auth::UserName;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatusError {
    /// A user reported as authenticated could not yield its grants.
    #[error("Inconsistent session state: authenticated user {user} has no resolvable grants")]
    InconsistentSessionState { user: UserName },

    #[error("Invalid resource pattern: {0}")]
    InvalidResourcePattern(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StatusError>;
