//! Shared types used across the KIE bootstrap crates.
//!
//! These represent the persisted deployment state of one server instance:
//! which kjars it runs as containers, and in which lifecycle status.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coordinate::ReleaseId;

/// Stable identity of one running server instance.
pub type ServerId = String;

/// Container identifier, derived from the kjar's artifact id.
pub type ContainerId = String;

// ── Container ─────────────────────────────────────────────────────

/// Lifecycle status of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerStatus {
    Creating,
    Started,
    Failed,
    Disposing,
    Stopped,
    Deactivated,
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContainerStatus::Creating => "CREATING",
            ContainerStatus::Started => "STARTED",
            ContainerStatus::Failed => "FAILED",
            ContainerStatus::Disposing => "DISPOSING",
            ContainerStatus::Stopped => "STOPPED",
            ContainerStatus::Deactivated => "DEACTIVATED",
        };
        f.write_str(label)
    }
}

/// One deployed kjar within a server.
///
/// Equality and ordering are structural over all fields, so a set of
/// resources collapses repeated identical kjars into one entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContainerResource {
    pub container_id: ContainerId,
    pub release_id: ReleaseId,
    pub status: ContainerStatus,
}

impl ContainerResource {
    pub fn new(
        container_id: impl Into<ContainerId>,
        release_id: ReleaseId,
        status: ContainerStatus,
    ) -> Self {
        Self {
            container_id: container_id.into(),
            release_id,
            status,
        }
    }

    /// A started container named after the kjar's artifact id.
    pub fn started(release_id: ReleaseId) -> Self {
        let container_id = release_id.artifact_id.clone();
        Self::new(container_id, release_id, ContainerStatus::Started)
    }
}

// ── Server state ──────────────────────────────────────────────────

/// Persisted deployment state of one server, keyed by server id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerState {
    pub server_id: ServerId,
    /// Controller URLs this server has been registered with.
    #[serde(default)]
    pub controllers: BTreeSet<String>,
    /// Free-form server configuration items.
    #[serde(default)]
    pub configuration: BTreeMap<String, String>,
    #[serde(default)]
    pub containers: BTreeSet<ContainerResource>,
}

impl ServerState {
    /// An empty record for `server_id`.
    pub fn new(server_id: impl Into<ServerId>) -> Self {
        Self {
            server_id: server_id.into(),
            controllers: BTreeSet::new(),
            configuration: BTreeMap::new(),
            containers: BTreeSet::new(),
        }
    }

    /// Replace the whole container set.
    pub fn set_containers(&mut self, containers: BTreeSet<ContainerResource>) {
        self.containers = containers;
    }

    pub fn container(&self, container_id: &str) -> Option<&ContainerResource> {
        self.containers.iter().find(|c| c.container_id == container_id)
    }
}

// ── Flavor ────────────────────────────────────────────────────────

/// Which server distribution is being bootstrapped.
///
/// Both run the same bootstrap; they differ in directory naming and in the
/// configuration keys they publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerFlavor {
    #[default]
    Kie,
    Drools,
}

impl ServerFlavor {
    /// Prefix of the scratch directory holding provisioned credentials.
    pub fn security_dir_prefix(&self) -> &'static str {
        match self {
            ServerFlavor::Kie => "swarm-kie-security-config",
            ServerFlavor::Drools => "swarm-drools-security-config",
        }
    }

    /// Configuration key under which the credentials folder is published.
    pub fn security_conf_key(&self) -> &'static str {
        match self {
            ServerFlavor::Kie => "org.kie.server.swarm.security.conf",
            ServerFlavor::Drools => "org.drools.server.swarm.security.conf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServerFlavor::Kie => "kie",
            ServerFlavor::Drools => "drools",
        }
    }
}
