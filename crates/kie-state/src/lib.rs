//! kie-state — persisted deployment state for KIE server instances.
//!
//! One [`ServerState`](kie_core::ServerState) record exists per server id.
//! Records are loaded and stored as a whole through the
//! [`StateRepository`] contract; there is no partial update API.
//!
//! Two backends are provided:
//!
//! - [`StateStore`]: redb-backed, JSON values in a single table keyed by
//!   server id. Persistent or in-memory (for tests).
//! - [`FileStateRepository`]: one `<server_id>.json` document per server in
//!   a directory, replaced atomically on every store.

pub mod error;
pub mod file;
pub mod repository;
pub mod store;
pub mod tables;

pub use error::{StateError, StateResult};
pub use file::FileStateRepository;
pub use repository::StateRepository;
pub use store::StateStore;
