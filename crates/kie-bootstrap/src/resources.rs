//! Read-only access to the credential files by logical name.

use std::io;
use std::path::{Path, PathBuf};

/// Logical name of the bundled users credentials resource.
pub const USERS_RESOURCE: &str = "config/security/application-users.properties";

/// Logical name of the bundled roles credentials resource.
pub const ROLES_RESOURCE: &str = "config/security/application-roles.properties";

/// Source of named, read-only resources.
pub trait ResourceProvider {
    /// Read the full contents of `name`, or fail with `NotFound`.
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for &P {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        (**self).read(name)
    }
}

impl<P: ResourceProvider + ?Sized> ResourceProvider for Box<P> {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        (**self).read(name)
    }
}

/// Credential files compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledResources;

impl ResourceProvider for BundledResources {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        let bytes: &'static [u8] = match name {
            USERS_RESOURCE => {
                include_bytes!("../resources/config/security/application-users.properties")
            }
            ROLES_RESOURCE => {
                include_bytes!("../resources/config/security/application-roles.properties")
            }
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no bundled resource named {name}"),
                ));
            }
        };
        Ok(bytes.to_vec())
    }
}

/// Credential files supplied by the operator in a directory.
///
/// A logical name resolves to its final path component inside `root`, so
/// `config/security/application-users.properties` is read from
/// `{root}/application-users.properties`.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceProvider for DirectoryResources {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        let file_name = Path::new(name).file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("invalid resource name {name}"))
        })?;
        std::fs::read(self.root.join(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_resources_are_present() {
        let users = BundledResources.read(USERS_RESOURCE).unwrap();
        let roles = BundledResources.read(ROLES_RESOURCE).unwrap();
        assert!(String::from_utf8(users).unwrap().contains("kieserver="));
        assert!(String::from_utf8(roles).unwrap().contains("kie-server"));
    }

    #[test]
    fn bundled_unknown_name_is_not_found() {
        let err = BundledResources.read("config/web/web.xml").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn directory_resources_resolve_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("application-users.properties"), b"alice=x\n").unwrap();

        let provider = DirectoryResources::new(dir.path());
        assert_eq!(provider.read(USERS_RESOURCE).unwrap(), b"alice=x\n");
        assert_eq!(
            provider.read(ROLES_RESOURCE).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }
}
