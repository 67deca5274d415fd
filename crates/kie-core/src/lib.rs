pub mod config;
pub mod coordinate;
pub mod types;

pub use config::ServerConfig;
pub use coordinate::{CoordinateError, ReleaseId};
pub use types::*;
