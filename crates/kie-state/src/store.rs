//! StateStore — redb-backed persistence of server state.
//!
//! Each record is JSON-serialized into a `&[u8]` value under its server id.
//! Every store runs in its own write transaction, so a record is either
//! fully replaced or left untouched.

use std::path::Path;
use std::sync::Arc;

use kie_core::ServerState;
use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::repository::{StateRepository, validate_server_id};
use crate::tables::SERVER_STATES;

/// Convert any `Display` error into a `StateError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StateError::$variant(e.to_string())
    };
}

/// Thread-safe state store backed by redb.
#[derive(Clone)]
pub struct StateStore {
    db: Arc<Database>,
}

impl StateStore {
    /// Open (or create) a persistent state store at the given path.
    pub fn open(path: &Path) -> StateResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "state store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory state store (for testing).
    pub fn open_in_memory() -> StateResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory state store opened");
        Ok(store)
    }

    fn ensure_tables(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(SERVER_STATES).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    /// Get the stored record, or `None` if this server has never been stored.
    pub fn get_server_state(&self, server_id: &str) -> StateResult<Option<ServerState>> {
        validate_server_id(server_id)?;
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(SERVER_STATES).map_err(map_err!(Table))?;
        match table.get(server_id).map_err(map_err!(Read))? {
            Some(guard) => {
                let state: ServerState =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    /// Insert or replace the record for `server_id`.
    pub fn put_server_state(&self, server_id: &str, state: &ServerState) -> StateResult<()> {
        validate_server_id(server_id)?;
        let value = serde_json::to_vec(state).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(SERVER_STATES).map_err(map_err!(Table))?;
            table
                .insert(server_id, value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%server_id, containers = state.containers.len(), "server state stored");
        Ok(())
    }

    /// List the ids of all stored servers.
    pub fn list_server_ids(&self) -> StateResult<Vec<String>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(SERVER_STATES).map_err(map_err!(Table))?;
        let mut ids = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (key, _) = entry.map_err(map_err!(Read))?;
            ids.push(key.value().to_string());
        }
        Ok(ids)
    }

    /// Delete a server's record. Returns true if it existed.
    pub fn delete_server_state(&self, server_id: &str) -> StateResult<bool> {
        validate_server_id(server_id)?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut table = txn.open_table(SERVER_STATES).map_err(map_err!(Table))?;
            existed = table.remove(server_id).map_err(map_err!(Write))?.is_some();
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%server_id, existed, "server state deleted");
        Ok(existed)
    }
}

impl StateRepository for StateStore {
    fn load(&self, server_id: &str) -> StateResult<ServerState> {
        let state = self
            .get_server_state(server_id)?
            .unwrap_or_else(|| ServerState::new(server_id));
        debug!(%server_id, containers = state.containers.len(), "server state loaded");
        Ok(state)
    }

    fn store(&self, server_id: &str, state: &ServerState) -> StateResult<()> {
        self.put_server_state(server_id, state)
    }
}
