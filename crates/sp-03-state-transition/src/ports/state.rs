use crate::domain::errors::StateStoreError;
use shared_types::{StateAddress, StateEntry};

/// Versioned key-value state as seen by a handler.
///
/// `get_state` returns only the requested addresses that hold a value.
/// `set_state` returns the addresses actually written; a handler treats a
/// shorter list as a storage fault.
pub trait StateStore: Send + Sync {
    fn get_state(&self, addresses: &[StateAddress]) -> Result<Vec<StateEntry>, StateStoreError>;
    fn set_state(&self, entries: Vec<StateEntry>) -> Result<Vec<StateAddress>, StateStoreError>;
}
