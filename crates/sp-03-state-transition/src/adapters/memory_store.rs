use crate::domain::errors::StateStoreError;
use crate::ports::state::StateStore;
use shared_types::{StateAddress, StateEntry};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory implementation of StateStore for testing and local replay.
pub struct InMemoryStateStore {
    entries: RwLock<BTreeMap<StateAddress, Vec<u8>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Value stored at `address`, if any.
    pub fn get(&self, address: &StateAddress) -> Result<Option<Vec<u8>>, StateStoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StateStoreError::LockPoisoned)?;
        Ok(entries.get(address).cloned())
    }

    /// Every entry under `prefix`, in address order.
    pub fn list(&self, prefix: &str) -> Result<Vec<StateEntry>, StateStoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StateStoreError::LockPoisoned)?;
        Ok(entries
            .iter()
            .filter(|(address, _)| address.as_str().starts_with(prefix))
            .map(|(address, data)| StateEntry::new(address.clone(), data.clone()))
            .collect())
    }

    pub fn len(&self) -> Result<usize, StateStoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StateStoreError::LockPoisoned)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, StateStoreError> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for InMemoryStateStore {
    fn get_state(&self, addresses: &[StateAddress]) -> Result<Vec<StateEntry>, StateStoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StateStoreError::LockPoisoned)?;
        Ok(addresses
            .iter()
            .filter_map(|address| {
                entries
                    .get(address)
                    .map(|data| StateEntry::new(address.clone(), data.clone()))
            })
            .collect())
    }

    fn set_state(&self, batch: Vec<StateEntry>) -> Result<Vec<StateAddress>, StateStoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StateStoreError::LockPoisoned)?;
        let mut written = Vec::with_capacity(batch.len());
        for entry in batch {
            written.push(entry.address.clone());
            entries.insert(entry.address, entry.data);
        }
        Ok(written)
    }
}
