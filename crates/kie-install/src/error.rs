//! Install error types.

use kie_core::CoordinateError;
use kie_state::StateError;
use thiserror::Error;

/// Errors that abort a single install call. Persisted state is unchanged.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error("state store error: {0}")]
    State(#[from] StateError),
}

pub type InstallResult<T> = Result<T, InstallError>;
