//! # Handler API
//!
//! What the transaction processor needs from a family handler: routing
//! metadata and a deterministic `apply`.

use crate::domain::errors::ApplyError;
use crate::domain::outcome::ApplyOutcome;
use crate::ports::state::StateStore;
use shared_types::Transaction;

pub trait TransactionHandler: Send + Sync {
    /// Family this handler serves.
    fn family_name(&self) -> &str;

    /// Family versions accepted.
    fn family_versions(&self) -> Vec<String>;

    /// Payload encodings accepted.
    fn encodings(&self) -> Vec<String>;

    /// Address prefixes this handler reads and writes.
    fn namespaces(&self) -> Vec<String>;

    /// Apply one transaction against `state`.
    fn apply(
        &self,
        transaction: &Transaction,
        state: &dyn StateStore,
    ) -> Result<ApplyOutcome, ApplyError>;
}
