//! # Submission API
//!
//! The surface tooling uses to reach the ledger. The record helpers and the
//! commit poll are provided on top of the four primitive calls.

use crate::domain::entities::BatchStatus;
use crate::domain::errors::ClientError;
use shared_types::{AddressDeriver, Family, StateAddress, StateEntry, StoredEntity};
use std::thread;
use std::time::{Duration, Instant};

/// Pause between status polls when the server answers before the wait.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub trait SubmissionApi: Send + Sync {
    /// Post serialized batch list bytes; returns the batch id.
    fn submit(&self, batch_list: &[u8]) -> Result<String, ClientError>;

    /// Batch status, letting the server hold the request up to `wait_seconds`.
    fn status(&self, batch_id: &str, wait_seconds: u64) -> Result<BatchStatus, ClientError>;

    /// Raw value at `address`, `None` when nothing is stored there.
    fn get_state(&self, address: &StateAddress) -> Result<Option<Vec<u8>>, ClientError>;

    /// Every entry whose address starts with `prefix`.
    fn list_state(&self, prefix: &str) -> Result<Vec<StateEntry>, ClientError>;

    /// Poll until the batch is committed or invalid, or `budget` runs out.
    ///
    /// Running out of budget is not an error; the last observed status
    /// (usually `Pending`) is returned.
    fn wait_for_commit(&self, batch_id: &str, budget: Duration) -> Result<BatchStatus, ClientError> {
        let deadline = Instant::now() + budget;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let status = self.status(batch_id, remaining.as_secs())?;
            let remaining = deadline.saturating_duration_since(Instant::now());
            if status.is_final() || remaining.is_zero() {
                return Ok(status);
            }
            thread::sleep(POLL_INTERVAL.min(remaining));
        }
    }

    /// Decode the stored record of one entity.
    fn show(&self, family: Family, entity_id: &str) -> Result<Option<StoredEntity>, ClientError> {
        let address = AddressDeriver::for_family(family).address(entity_id);
        self.get_state(&address)?
            .map(|bytes| StoredEntity::decode(&bytes))
            .transpose()
            .map_err(ClientError::from)
    }

    /// Decode every stored record in a family's namespace.
    fn list(&self, family: Family) -> Result<Vec<StoredEntity>, ClientError> {
        let deriver = AddressDeriver::for_family(family);
        self.list_state(deriver.prefix())?
            .iter()
            .map(|entry| StoredEntity::decode(&entry.data).map_err(ClientError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// In-process fake whose batches commit after a fixed number of polls.
    struct FakeApi {
        state: BTreeMap<StateAddress, Vec<u8>>,
        polls: Mutex<u32>,
        commit_after: u32,
    }

    impl FakeApi {
        fn new(commit_after: u32) -> Self {
            Self {
                state: BTreeMap::new(),
                polls: Mutex::new(0),
                commit_after,
            }
        }

        fn store(&mut self, family: Family, id: &str, value: &str) {
            let address = AddressDeriver::for_family(family).address(id);
            self.state.insert(address, value.as_bytes().to_vec());
        }
    }

    impl SubmissionApi for FakeApi {
        fn submit(&self, _batch_list: &[u8]) -> Result<String, ClientError> {
            Ok("b1".into())
        }

        fn status(&self, _batch_id: &str, _wait_seconds: u64) -> Result<BatchStatus, ClientError> {
            let mut polls = self.polls.lock().unwrap();
            *polls += 1;
            Ok(if *polls >= self.commit_after {
                BatchStatus::Committed
            } else {
                BatchStatus::Pending
            })
        }

        fn get_state(&self, address: &StateAddress) -> Result<Option<Vec<u8>>, ClientError> {
            Ok(self.state.get(address).cloned())
        }

        fn list_state(&self, prefix: &str) -> Result<Vec<StateEntry>, ClientError> {
            Ok(self
                .state
                .iter()
                .filter(|(address, _)| address.as_str().starts_with(prefix))
                .map(|(address, data)| StateEntry::new(address.clone(), data.clone()))
                .collect())
        }
    }

    #[test]
    fn test_wait_for_commit_polls_until_final() {
        let api = FakeApi::new(3);
        let status = api.wait_for_commit("b1", Duration::from_secs(5)).unwrap();
        assert_eq!(status, BatchStatus::Committed);
        assert_eq!(*api.polls.lock().unwrap(), 3);
    }

    #[test]
    fn test_wait_for_commit_out_of_budget_is_pending() {
        let api = FakeApi::new(u32::MAX);
        let status = api.wait_for_commit("b1", Duration::ZERO).unwrap();
        assert_eq!(status, BatchStatus::Pending);
        assert_eq!(*api.polls.lock().unwrap(), 1);
    }

    #[test]
    fn test_show_and_list_decode_records() {
        let mut api = FakeApi::new(1);
        api.store(Family::Supplier, "s1", r#"s1,{"supplier_id":"s1","parts":[]}"#);
        api.store(Family::Supplier, "s2", r#"s2,{"supplier_id":"s2","parts":[]}"#);
        api.store(Family::Part, "p1", r#"p1,{"pt_id":"p1"}"#);

        let shown = api.show(Family::Supplier, "s1").unwrap().unwrap();
        assert_eq!(shown.entity_id, "s1");
        assert_eq!(shown.record.scalar("supplier_id"), Some("s1"));
        assert!(api.show(Family::Supplier, "missing").unwrap().is_none());

        let listed = api.list(Family::Supplier).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|e| e.entity_id.starts_with('s')));
    }

    #[test]
    fn test_show_surfaces_undecodable_entry() {
        let mut api = FakeApi::new(1);
        api.store(Family::Category, "c1", "garbage");
        assert!(matches!(
            api.show(Family::Category, "c1"),
            Err(ClientError::Record(_))
        ));
    }
}
