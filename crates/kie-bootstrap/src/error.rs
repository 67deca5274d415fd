//! Bootstrap provisioning errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type BootstrapResult<T> = Result<T, BootstrapError>;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to read bundled resource {name}: {source}")]
    ResourceRead {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to create security configuration directory: {0}")]
    DirectoryCreate(#[source] io::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
