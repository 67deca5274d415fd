//! Reconciler — computes the desired container set and persists it.

use std::collections::BTreeSet;
use std::fmt;

use kie_core::{ContainerResource, CoordinateError, ReleaseId, ServerState};
use kie_state::StateRepository;
use tracing::{debug, info};

use crate::error::InstallResult;

/// Why an install call did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No coordinates were supplied.
    NoCoordinates,
    /// A controller is authoritative for deployment state.
    ControllerConfigured(String),
    /// No server id to address persisted state with.
    MissingServerId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCoordinates => f.write_str("no kjars requested"),
            SkipReason::ControllerConfigured(controller) => write!(
                f,
                "controller is configured ({controller}) - no local kjars can be installed"
            ),
            SkipReason::MissingServerId => f.write_str("no server id configured"),
        }
    }
}

/// Result of a successful install call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Skipped(SkipReason),
    Installed(ServerState),
}

/// Parse every coordinate into a started container, collapsing duplicates.
///
/// All-or-nothing: the first malformed coordinate fails the whole batch.
pub fn desired_containers<S: AsRef<str>>(
    coordinates: &[S],
) -> Result<BTreeSet<ContainerResource>, CoordinateError> {
    let mut containers = BTreeSet::new();
    for gav in coordinates {
        let release_id = ReleaseId::parse(gav.as_ref())?;
        containers.insert(ContainerResource::started(release_id));
    }
    Ok(containers)
}

/// Decide whether an install call has anything to do, and for which server.
///
/// Checked in order: no coordinates, a non-empty controller address, a
/// missing or blank server id. Each of these means the repository must not
/// be touched.
pub fn install_target<'a, S: AsRef<str>>(
    server_id: Option<&'a str>,
    controller: Option<&str>,
    coordinates: &[S],
) -> Result<&'a str, SkipReason> {
    if coordinates.is_empty() {
        debug!("no kjars requested");
        return Err(SkipReason::NoCoordinates);
    }

    if let Some(controller) = controller.filter(|c| !c.trim().is_empty()) {
        info!(%controller, "controller is configured, no local kjars can be installed");
        return Err(SkipReason::ControllerConfigured(controller.to_string()));
    }

    match server_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(server_id) => Ok(server_id),
        None => {
            debug!("no server id configured, skipping kjar install");
            Err(SkipReason::MissingServerId)
        }
    }
}

/// Installs kjars into the state repository of one host.
pub struct Reconciler<R> {
    repository: R,
}

impl<R: StateRepository> Reconciler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Replace the container set of `server_id`'s record with one started
    /// container per distinct coordinate, and persist the record.
    ///
    /// Returns [`InstallOutcome::Skipped`] without touching the repository
    /// whenever [`install_target`] declines the call.
    pub fn reconcile_containers<S: AsRef<str>>(
        &self,
        server_id: Option<&str>,
        controller: Option<&str>,
        coordinates: &[S],
    ) -> InstallResult<InstallOutcome> {
        let server_id = match install_target(server_id, controller, coordinates) {
            Ok(server_id) => server_id,
            Err(reason) => return Ok(InstallOutcome::Skipped(reason)),
        };

        let mut state = self.repository.load(server_id)?;
        let containers = desired_containers(coordinates)?;
        for container in &containers {
            info!(%server_id, kjar = %container.release_id, container_id = %container.container_id, "installing kjar");
        }

        let previous = state.containers.len();
        state.set_containers(containers);
        self.repository.store(server_id, &state)?;

        info!(
            %server_id,
            containers = state.containers.len(),
            previous,
            "server state updated"
        );
        Ok(InstallOutcome::Installed(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kie_core::ContainerStatus;

    #[test]
    fn duplicates_collapse() {
        let set = desired_containers(&["g:a:1", "g:a:1", "g:b:2"]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|c| c.status == ContainerStatus::Started));
    }

    #[test]
    fn same_artifact_different_versions_are_distinct() {
        let set = desired_containers(&["g:a:1", "g:a:2"]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|c| c.container_id == "a"));
    }

    #[test]
    fn one_bad_coordinate_fails_the_batch() {
        let err = desired_containers(&["g:a:1", "g:b", "g:c:3"]).unwrap_err();
        assert!(matches!(err, CoordinateError::Invalid { ref input, .. } if input == "g:b"));
    }

    #[test]
    fn install_target_order() {
        let none: [&str; 0] = [];
        assert_eq!(
            install_target(Some("S1"), Some("http://ctrl"), &none),
            Err(SkipReason::NoCoordinates)
        );
        assert_eq!(
            install_target(None, Some(" http://ctrl "), &["g:a:1"]),
            Err(SkipReason::ControllerConfigured(" http://ctrl ".to_string()))
        );
        assert_eq!(
            install_target(Some("  "), None, &["g:a:1"]),
            Err(SkipReason::MissingServerId)
        );
        assert_eq!(install_target(Some("S1"), Some(""), &["g:a:1"]), Ok("S1"));
        assert_eq!(install_target(Some(" S1 "), None, &["g:a:1"]), Ok("S1"));
    }

    #[test]
    fn skip_reason_messages() {
        let reason = SkipReason::ControllerConfigured("http://ctrl:8080".to_string());
        assert_eq!(
            reason.to_string(),
            "controller is configured (http://ctrl:8080) - no local kjars can be installed"
        );
    }

    #[test]
    fn empty_input_gives_empty_set() {
        let none: [&str; 0] = [];
        assert!(desired_containers(&none).unwrap().is_empty());
    }
}
