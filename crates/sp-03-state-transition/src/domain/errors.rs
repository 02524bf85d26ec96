//! # Apply Errors
//!
//! `MalformedPayload` and `InvalidTransaction` are deterministic rejections:
//! every replica reaches the same verdict and the transaction is never
//! retried. `InternalError` means the state store misbehaved and is fatal.

use shared_types::{CodecError, WireError};
use thiserror::Error;

/// Errors raised while applying one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// Payload failed to decode against the family schema.
    #[error(transparent)]
    MalformedPayload(#[from] CodecError),

    /// Transaction is well-formed but not allowed against current state.
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// State store fault or unreadable stored entry.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplyError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidTransaction(reason.into())
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::InternalError(reason.into())
    }

    /// Whether the rejection follows from the transaction and state alone.
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, Self::InternalError(_))
    }
}

impl From<StateStoreError> for ApplyError {
    fn from(error: StateStoreError) -> Self {
        Self::InternalError(error.to_string())
    }
}

/// State store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateStoreError {
    #[error("Lock poisoned")]
    LockPoisoned,

    #[error("State backend error: {0}")]
    Backend(String),

    /// The backend acknowledged fewer addresses than it was given.
    #[error("State Error: wrote {written} of {expected} addresses")]
    ShortWrite { written: usize, expected: usize },
}

/// Errors raised while applying a batch.
///
/// A batch is all-or-nothing: on any error no write reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// Batch header does not match its transactions.
    #[error(transparent)]
    InvalidBatch(#[from] WireError),

    /// The transaction at `index` was rejected.
    #[error("Transaction {index} ({transaction_id}) rejected: {source}")]
    TransactionRejected {
        index: usize,
        transaction_id: String,
        source: ApplyError,
    },

    /// Staged writes could not be committed; always an `InternalError`.
    #[error("Failed to commit batch: {0}")]
    Commit(ApplyError),
}
