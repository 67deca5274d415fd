//! The load/store contract every state backend implements.

use kie_core::ServerState;

use crate::error::{StateError, StateResult};

/// Whole-record persistence of server state, keyed by server id.
pub trait StateRepository {
    /// Load the record for `server_id`.
    ///
    /// A missing record is not an error: an empty [`ServerState`] for
    /// `server_id` is returned instead.
    fn load(&self, server_id: &str) -> StateResult<ServerState>;

    /// Replace the record for `server_id`. Either the whole record is
    /// written or the previous one is left in place.
    fn store(&self, server_id: &str, state: &ServerState) -> StateResult<()>;
}

impl<R: StateRepository + ?Sized> StateRepository for &R {
    fn load(&self, server_id: &str) -> StateResult<ServerState> {
        (**self).load(server_id)
    }

    fn store(&self, server_id: &str, state: &ServerState) -> StateResult<()> {
        (**self).store(server_id, state)
    }
}

impl<R: StateRepository + ?Sized> StateRepository for Box<R> {
    fn load(&self, server_id: &str) -> StateResult<ServerState> {
        (**self).load(server_id)
    }

    fn store(&self, server_id: &str, state: &ServerState) -> StateResult<()> {
        (**self).store(server_id, state)
    }
}

/// Reject server ids that cannot address a record safely.
pub(crate) fn validate_server_id(server_id: &str) -> StateResult<()> {
    let invalid = server_id.trim().is_empty()
        || server_id == "."
        || server_id == ".."
        || server_id.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StateError::InvalidKey(server_id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_ids() {
        assert!(validate_server_id("S1").is_ok());
        assert!(validate_server_id("kie-server.prod_01").is_ok());
    }

    #[test]
    fn rejects_unaddressable_ids() {
        for bad in ["", "  ", ".", "..", "a/b", "a\\b"] {
            assert!(
                matches!(validate_server_id(bad), Err(StateError::InvalidKey(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
