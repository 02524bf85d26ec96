//! # Build Errors

use shared_types::{CodecError, WireError};
use thiserror::Error;

/// Errors that can occur while building transactions and batches.
///
/// All of these are reported before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Payload fields could not be canonically encoded.
    #[error("Payload encoding failed: {0}")]
    Codec(#[from] CodecError),

    /// Header or batch list serialization failed.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// A batch must carry at least one transaction.
    #[error("Cannot build a batch with no transactions")]
    EmptyBatch,
}
