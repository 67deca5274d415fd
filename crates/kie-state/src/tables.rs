//! redb table definitions for the state store.

use redb::TableDefinition;

/// Server state records keyed by `{server_id}`, JSON-encoded.
pub const SERVER_STATES: TableDefinition<&str, &[u8]> = TableDefinition::new("server_states");
