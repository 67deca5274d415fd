//! SecurityProvisioner — materializes the credential bundle once per process.

use std::path::{Path, PathBuf};

use kie_core::ServerFlavor;
use sha2::{Digest, Sha256};
use tempfile::TempDir;
use tracing::{debug, error, info};

use crate::error::{BootstrapError, BootstrapResult};
use crate::resources::{ROLES_RESOURCE, ResourceProvider, USERS_RESOURCE};
use crate::{ROLES_FILE, USERS_FILE};

/// Resource name → file name within the provisioned folder.
const BUNDLE: [(&str, &str); 2] = [(USERS_RESOURCE, USERS_FILE), (ROLES_RESOURCE, ROLES_FILE)];

/// Explicit replacement for the process-wide "configuration folder" setting.
///
/// A non-empty `security_conf_dir` means the credentials are already in
/// place and must be used as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapSettings {
    pub security_conf_dir: Option<PathBuf>,
}

impl BootstrapSettings {
    pub fn with_conf_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            security_conf_dir: Some(dir.into()),
        }
    }

    /// The published folder, ignoring empty paths.
    pub fn conf_dir(&self) -> Option<&Path> {
        self.security_conf_dir
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Settings as `key=value` pairs for the host, named per flavor.
    pub fn to_properties(&self, flavor: ServerFlavor) -> Vec<(&'static str, String)> {
        self.conf_dir()
            .map(|dir| vec![(flavor.security_conf_key(), dir.display().to_string())])
            .unwrap_or_default()
    }
}

/// One credential file written during provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedFile {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub sha256: String,
}

/// Result of [`SecurityProvisioner::ensure_security_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityBundle {
    pub dir: PathBuf,
    /// Files written by this call. Empty when an existing folder was reused.
    pub written: Vec<ProvisionedFile>,
}

impl SecurityBundle {
    pub fn users_file(&self) -> PathBuf {
        self.dir.join(USERS_FILE)
    }

    pub fn roles_file(&self) -> PathBuf {
        self.dir.join(ROLES_FILE)
    }

    pub fn reused(&self) -> bool {
        self.written.is_empty()
    }
}

/// Provisions the users/roles credential files for one server process.
///
/// The folder it creates is owned by the provisioner and removed when the
/// provisioner is dropped, unless [`retain`](Self::retain) is called.
pub struct SecurityProvisioner<R> {
    resources: R,
    flavor: ServerFlavor,
    scratch: Option<TempDir>,
}

impl<R: ResourceProvider> SecurityProvisioner<R> {
    pub fn new(resources: R, flavor: ServerFlavor) -> Self {
        Self {
            resources,
            flavor,
            scratch: None,
        }
    }

    pub fn flavor(&self) -> ServerFlavor {
        self.flavor
    }

    /// Return the credentials folder, provisioning it on first use.
    ///
    /// If `settings` already names a folder it is returned unchanged and
    /// nothing is written. A folder this provisioner created earlier is
    /// handed out again rather than replaced. Otherwise both credential files are copied into
    /// a fresh uniquely-named directory, and that directory is recorded in
    /// `settings`.
    pub fn ensure_security_config(
        &mut self,
        settings: &mut BootstrapSettings,
    ) -> BootstrapResult<SecurityBundle> {
        if let Some(dir) = settings.conf_dir() {
            info!(flavor = self.flavor.label(), dir = %dir.display(), "configuration folder is already set");
            return Ok(SecurityBundle {
                dir: dir.to_path_buf(),
                written: Vec::new(),
            });
        }

        // This provisioner already owns a folder; hand it out again.
        if let Some(scratch) = &self.scratch {
            let dir = scratch.path().to_path_buf();
            settings.security_conf_dir = Some(dir.clone());
            info!(flavor = self.flavor.label(), dir = %dir.display(), "configuration folder reused");
            return Ok(SecurityBundle {
                dir,
                written: Vec::new(),
            });
        }

        // Read everything up front so a missing resource leaves no directory behind.
        let mut contents = Vec::with_capacity(BUNDLE.len());
        for (resource, file_name) in BUNDLE {
            let bytes = self
                .resources
                .read(resource)
                .map_err(|source| BootstrapError::ResourceRead {
                    name: resource.to_string(),
                    source,
                })?;
            contents.push((file_name, bytes));
        }

        let scratch = tempfile::Builder::new()
            .prefix(self.flavor.security_dir_prefix())
            .suffix(".d")
            .tempdir()
            .map_err(BootstrapError::DirectoryCreate)?;

        let mut written = Vec::with_capacity(contents.len());
        for (file_name, bytes) in contents {
            written.push(write_file(&scratch.path().join(file_name), &bytes)?);
        }

        let dir = scratch.path().to_path_buf();
        settings.security_conf_dir = Some(dir.clone());
        self.scratch = Some(scratch);

        info!(flavor = self.flavor.label(), dir = %dir.display(), "configuration folder provisioned");
        Ok(SecurityBundle { dir, written })
    }

    /// Like [`ensure_security_config`](Self::ensure_security_config), but a
    /// failure is logged and reported as `None` so startup can continue
    /// in a degraded state.
    pub fn ensure_or_degrade(&mut self, settings: &mut BootstrapSettings) -> Option<SecurityBundle> {
        match self.ensure_security_config(settings) {
            Ok(bundle) => Some(bundle),
            Err(e) => {
                error!(
                    flavor = self.flavor.label(),
                    error = %e,
                    "security configuration could not be provisioned; continuing without it"
                );
                None
            }
        }
    }

    /// Keep the provisioned folder on disk after the provisioner is dropped.
    pub fn retain(&mut self) -> Option<PathBuf> {
        self.scratch.take().map(TempDir::keep)
    }
}

/// Write `bytes` to `path`, replacing any existing file.
fn write_file(path: &Path, bytes: &[u8]) -> BootstrapResult<ProvisionedFile> {
    std::fs::write(path, bytes).map_err(|source| BootstrapError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let sha256 = hex::encode(Sha256::digest(bytes));
    debug!(path = %path.display(), size = bytes.len(), %sha256, "credential file written");
    Ok(ProvisionedFile {
        path: path.to_path_buf(),
        size_bytes: bytes.len() as u64,
        sha256,
    })
}
