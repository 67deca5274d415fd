//! FileStateRepository — one JSON document per server id.
//!
//! Records live at `{dir}/{server_id}.json`. A store writes the new record
//! to a temporary file in the same directory and renames it over the old
//! one, so readers never observe a half-written record.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use kie_core::ServerState;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::repository::{StateRepository, validate_server_id};

#[derive(Debug, Clone)]
pub struct FileStateRepository {
    dir: PathBuf,
}

impl FileStateRepository {
    /// Use `dir` as the repository root. Created lazily on first store.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document holding `server_id`'s record.
    pub fn record_path(&self, server_id: &str) -> StateResult<PathBuf> {
        validate_server_id(server_id)?;
        Ok(self.dir.join(format!("{server_id}.json")))
    }
}

impl StateRepository for FileStateRepository {
    fn load(&self, server_id: &str) -> StateResult<ServerState> {
        let path = self.record_path(server_id)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(%server_id, ?path, "no stored server state, starting empty");
                return Ok(ServerState::new(server_id));
            }
            Err(e) => return Err(StateError::Read(format!("{}: {e}", path.display()))),
        };
        let state: ServerState = serde_json::from_slice(&bytes)
            .map_err(|e| StateError::Deserialize(format!("{}: {e}", path.display())))?;
        debug!(%server_id, containers = state.containers.len(), "server state loaded");
        Ok(state)
    }

    fn store(&self, server_id: &str, state: &ServerState) -> StateResult<()> {
        let path = self.record_path(server_id)?;
        let value =
            serde_json::to_vec_pretty(state).map_err(|e| StateError::Serialize(e.to_string()))?;

        std::fs::create_dir_all(&self.dir)
            .map_err(|e| StateError::Open(format!("{}: {e}", self.dir.display())))?;
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| StateError::Write(format!("{}: {e}", self.dir.display())))?;
        tmp.write_all(&value)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StateError::Write(format!("{}: {e}", tmp.path().display())))?;
        tmp.persist(&path)
            .map_err(|e| StateError::Write(format!("{}: {}", path.display(), e.error)))?;

        debug!(%server_id, ?path, containers = state.containers.len(), "server state stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kie_core::{ContainerResource, ReleaseId};

    fn state_with(server_id: &str, artifact: &str) -> ServerState {
        let mut state = ServerState::new(server_id);
        state
            .containers
            .insert(ContainerResource::started(ReleaseId::new("org.acme", artifact, "1.0")));
        state
    }

    #[test]
    fn load_missing_returns_empty_record() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path());
        assert_eq!(repo.load("S1").unwrap(), ServerState::new("S1"));
    }

    #[test]
    fn store_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path().join("nested/state"));
        let state = state_with("S1", "rules-a");

        repo.store("S1", &state).unwrap();

        assert!(repo.record_path("S1").unwrap().exists());
        assert_eq!(repo.load("S1").unwrap(), state);
    }

    #[test]
    fn store_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path());
        repo.store("S1", &state_with("S1", "rules-x")).unwrap();
        repo.store("S1", &state_with("S1", "rules-a")).unwrap();

        let loaded = repo.load("S1").unwrap();
        assert!(loaded.container("rules-x").is_none());
        assert!(loaded.container("rules-a").is_some());

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn corrupt_record_is_a_deserialize_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path());
        std::fs::write(repo.record_path("S1").unwrap(), b"not json").unwrap();

        assert!(matches!(repo.load("S1"), Err(StateError::Deserialize(_))));
    }

    #[test]
    fn path_like_server_id_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileStateRepository::new(dir.path());
        assert!(matches!(repo.load("../S1"), Err(StateError::InvalidKey(_))));
    }
}
