//! kie-install — turns the kjar coordinates supplied at launch into the
//! deployment state the server loads on startup.
//!
//! The container set of the server's record is fully replaced by the
//! containers derived from the current coordinates; containers from earlier
//! installs that are not listed again are dropped. When a controller is
//! configured it owns deployment state and nothing local is touched.

pub mod error;
pub mod reconciler;

pub use error::{InstallError, InstallResult};
pub use reconciler::{InstallOutcome, Reconciler, SkipReason, desired_containers, install_target};
