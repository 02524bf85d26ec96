//! Copy-on-write overlay used to make a batch all-or-nothing.
//!
//! Reads see the overlay's own pending writes first, then the base store.
//! Nothing reaches the base store until [`StagedState::commit`].

use crate::domain::errors::StateStoreError;
use crate::ports::state::StateStore;
use shared_types::{StateAddress, StateEntry};
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::debug;

pub struct StagedState<'a> {
    base: &'a dyn StateStore,
    pending: RwLock<BTreeMap<StateAddress, Vec<u8>>>,
}

impl<'a> StagedState<'a> {
    pub fn new(base: &'a dyn StateStore) -> Self {
        Self {
            base,
            pending: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of addresses with a pending write.
    pub fn pending_len(&self) -> Result<usize, StateStoreError> {
        let pending = self
            .pending
            .read()
            .map_err(|_| StateStoreError::LockPoisoned)?;
        Ok(pending.len())
    }

    /// Flush pending writes to the base store in one `set_state` call.
    pub fn commit(self) -> Result<Vec<StateAddress>, StateStoreError> {
        let pending = self
            .pending
            .into_inner()
            .map_err(|_| StateStoreError::LockPoisoned)?;
        if pending.is_empty() {
            return Ok(Vec::new());
        }

        let expected = pending.len();
        let written = self.base.set_state(
            pending
                .into_iter()
                .map(|(address, data)| StateEntry::new(address, data))
                .collect(),
        )?;
        if written.len() != expected {
            return Err(StateStoreError::ShortWrite {
                written: written.len(),
                expected,
            });
        }

        debug!(addresses = written.len(), "Committed staged state");
        Ok(written)
    }
}

impl StateStore for StagedState<'_> {
    fn get_state(&self, addresses: &[StateAddress]) -> Result<Vec<StateEntry>, StateStoreError> {
        let pending = self
            .pending
            .read()
            .map_err(|_| StateStoreError::LockPoisoned)?;

        let unstaged: Vec<StateAddress> = addresses
            .iter()
            .filter(|address| !pending.contains_key(*address))
            .cloned()
            .collect();
        let mut from_base: BTreeMap<StateAddress, Vec<u8>> = if unstaged.is_empty() {
            BTreeMap::new()
        } else {
            self.base
                .get_state(&unstaged)?
                .into_iter()
                .map(|entry| (entry.address, entry.data))
                .collect()
        };

        Ok(addresses
            .iter()
            .filter_map(|address| {
                pending
                    .get(address)
                    .cloned()
                    .or_else(|| from_base.remove(address))
                    .map(|data| StateEntry::new(address.clone(), data))
            })
            .collect())
    }

    fn set_state(&self, entries: Vec<StateEntry>) -> Result<Vec<StateAddress>, StateStoreError> {
        let mut pending = self
            .pending
            .write()
            .map_err(|_| StateStoreError::LockPoisoned)?;
        let mut written = Vec::with_capacity(entries.len());
        for entry in entries {
            written.push(entry.address.clone());
            pending.insert(entry.address, entry.data);
        }
        Ok(written)
    }
}
