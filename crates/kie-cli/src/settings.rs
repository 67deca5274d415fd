//! Resolves the effective `ServerConfig`: kie.toml first, flags on top.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Args;
use kie_bootstrap::{BundledResources, DirectoryResources, ResourceProvider};
use kie_core::config::StateBackend;
use kie_core::{ServerConfig, ServerFlavor};
use kie_state::{FileStateRepository, StateRepository, StateStore};
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "kie.toml";

#[derive(Args, Debug, Default)]
pub struct CommonArgs {
    /// Path to kie.toml (default: ./kie.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Server identity used to address persisted state
    #[arg(long, global = true)]
    pub server_id: Option<String>,
    /// Controller URL; when set, local kjar installation is skipped
    #[arg(long, global = true)]
    pub controller: Option<String>,
    /// Server flavor: kie or drools
    #[arg(long, global = true)]
    pub flavor: Option<String>,
    /// Pre-provisioned credentials folder
    #[arg(long, global = true)]
    pub conf_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct StateArgs {
    /// State backend: file or redb
    #[arg(long)]
    pub backend: Option<String>,
    /// Directory (file backend) or database file (redb backend)
    #[arg(long)]
    pub state_path: Option<PathBuf>,
}

impl CommonArgs {
    pub fn load(&self) -> anyhow::Result<ServerConfig> {
        let mut config = match self.config_path() {
            Some(path) => ServerConfig::from_file(&path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(id) = &self.server_id {
            config.server.id = Some(id.clone());
        }
        if let Some(controller) = &self.controller {
            config.server.controller = Some(controller.clone());
        }
        if let Some(flavor) = &self.flavor {
            config.server.flavor = parse_flavor(flavor)?;
        }
        if let Some(dir) = &self.conf_dir {
            config.security.conf_dir = Some(dir.clone());
        }
        Ok(config.normalized())
    }

    fn config_path(&self) -> Option<PathBuf> {
        match &self.config {
            Some(path) => Some(path.clone()),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                default.exists().then(|| default.to_path_buf())
            }
        }
    }
}

impl StateArgs {
    pub fn apply(&self, mut config: ServerConfig) -> anyhow::Result<ServerConfig> {
        if let Some(backend) = &self.backend {
            config.state.backend = parse_backend(backend)?;
        }
        if let Some(path) = &self.state_path {
            config.state.path = Some(path.clone());
        }
        Ok(config.normalized())
    }
}

pub fn with_resources_dir(mut config: ServerConfig, dir: Option<String>) -> ServerConfig {
    if let Some(dir) = dir {
        config.security.resources_dir = Some(PathBuf::from(dir));
    }
    config.normalized()
}

fn parse_flavor(value: &str) -> anyhow::Result<ServerFlavor> {
    match value {
        "kie" => Ok(ServerFlavor::Kie),
        "drools" => Ok(ServerFlavor::Drools),
        other => bail!("unknown flavor `{other}` (expected kie or drools)"),
    }
}

fn parse_backend(value: &str) -> anyhow::Result<StateBackend> {
    match value {
        "file" => Ok(StateBackend::File),
        "redb" => Ok(StateBackend::Redb),
        other => bail!("unknown state backend `{other}` (expected file or redb)"),
    }
}

/// Open the configured state repository.
pub fn open_repository(config: &ServerConfig) -> anyhow::Result<Box<dyn StateRepository>> {
    let path = config.state.resolved_path();
    debug!(backend = ?config.state.backend, path = %path.display(), "opening state repository");
    let repository: Box<dyn StateRepository> = match config.state.backend {
        StateBackend::File => Box::new(FileStateRepository::new(path)),
        StateBackend::Redb => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            Box::new(StateStore::open(&path)?)
        }
    };
    Ok(repository)
}

/// Where the credential files are read from.
pub fn resource_provider(config: &ServerConfig) -> Box<dyn ResourceProvider> {
    match &config.security.resources_dir {
        Some(dir) => Box::new(DirectoryResources::new(dir)),
        None => Box::new(BundledResources),
    }
}
