//! Error types for the deployment state repository.

use thiserror::Error;

/// Result type alias for state repository operations.
pub type StateResult<T> = Result<T, StateError>;

/// Errors that can occur while loading or storing server state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to open state repository: {0}")]
    Open(String),

    #[error("transaction error: {0}")]
    Transaction(String),

    #[error("table error: {0}")]
    Table(String),

    #[error("read error: {0}")]
    Read(String),

    #[error("write error: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error("deserialization error: {0}")]
    Deserialize(String),

    #[error("invalid server id `{0}`")]
    InvalidKey(String),
}
