//! kie.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::ServerFlavor;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub id: Option<String>,
    pub controller: Option<String>,
    #[serde(default)]
    pub flavor: ServerFlavor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateBackend {
    #[default]
    File,
    Redb,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateConfig {
    #[serde(default)]
    pub backend: StateBackend,
    /// Directory for the file backend, database file for redb.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Pre-provisioned credentials folder. When set, nothing is provisioned.
    pub conf_dir: Option<PathBuf>,
    /// Read the credential files from here instead of the bundled copies.
    pub resources_dir: Option<PathBuf>,
}

impl StateConfig {
    /// The configured path, or the backend's default location.
    pub fn resolved_path(&self) -> PathBuf {
        match (&self.path, self.backend) {
            (Some(path), _) => path.clone(),
            (None, StateBackend::File) => PathBuf::from("."),
            (None, StateBackend::Redb) => PathBuf::from("kie-server-state.redb"),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config.normalized())
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Server id, treating blank values as unset.
    pub fn server_id(&self) -> Option<&str> {
        non_blank(self.server.id.as_deref())
    }

    /// Controller address, treating blank values as unset.
    pub fn controller(&self) -> Option<&str> {
        non_blank(self.server.controller.as_deref())
    }

    /// Turn empty strings and empty paths into `None`.
    pub fn normalized(mut self) -> Self {
        self.server.id = self.server_id().map(str::to_string);
        self.server.controller = self.controller().map(str::to_string);
        self.security.conf_dir = self.security.conf_dir.filter(|p| !p.as_os_str().is_empty());
        self.security.resources_dir = self
            .security
            .resources_dir
            .filter(|p| !p.as_os_str().is_empty());
        self.state.path = self.state.path.filter(|p| !p.as_os_str().is_empty());
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
