//! # Inbound Ports (Driving Ports / API)
//!
//! The builder API consumed by command-line tooling and tests.

use crate::domain::errors::BuildError;
use crate::domain::payloads::EntityPayload;
use shared_types::{Batch, BatchList, Transaction};

/// Transaction and batch construction.
///
/// Implementations must be thread-safe (`Send + Sync`) and perform no I/O.
pub trait TransactionBuilderApi: Send + Sync {
    /// Hex public key used as both signer and batcher.
    fn public_key(&self) -> String;

    /// Encode, address and sign a single entity mutation.
    fn build_transaction(&self, payload: &dyn EntityPayload) -> Result<Transaction, BuildError>;

    /// Wrap transactions, in order, into one signed batch.
    fn build_batch(&self, transactions: Vec<Transaction>) -> Result<Batch, BuildError>;

    /// Build one batch holding a transaction per payload, wrapped in a list.
    fn build_batch_list(&self, payloads: &[&dyn EntityPayload]) -> Result<BatchList, BuildError>;
}
