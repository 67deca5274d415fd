//! kie-bootstrap — credential provisioning that runs before the server
//! accepts traffic.
//!
//! [`SecurityProvisioner::ensure_security_config`] materializes the bundled
//! users/roles property files into a fresh, process-scoped directory and
//! records that directory in [`BootstrapSettings`]. Once the settings carry
//! a path, later calls reuse it unchanged.
//!
//! Provisioning failure must not abort startup:
//! [`SecurityProvisioner::ensure_or_degrade`] logs the error and lets the
//! caller continue without a credentials folder.

pub mod error;
pub mod provisioner;
pub mod resources;
pub mod security;

pub use error::{BootstrapError, BootstrapResult};
pub use provisioner::{BootstrapSettings, ProvisionedFile, SecurityBundle, SecurityProvisioner};
pub use resources::{BundledResources, DirectoryResources, ResourceProvider};
pub use security::{LoginFlag, LoginModule, SecurityDomain};

/// File name of the users credentials file inside the provisioned folder.
pub const USERS_FILE: &str = "application-users.properties";

/// File name of the roles credentials file inside the provisioned folder.
pub const ROLES_FILE: &str = "application-roles.properties";
