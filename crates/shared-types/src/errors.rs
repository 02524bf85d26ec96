//! # Error Types
//!
//! Errors raised by the shared codec, address parsing and wire decoding.

use thiserror::Error;

/// Canonical payload codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Split did not yield the family's field count.
    #[error("Invalid payload serialization: expected {expected} fields, got {actual}")]
    MalformedPayload { expected: usize, actual: usize },

    /// Payload bytes are not UTF-8.
    #[error("Invalid payload serialization: not valid UTF-8")]
    InvalidUtf8,

    /// A field contains the delimiter and cannot be encoded unambiguously.
    #[error("Field {index} contains the reserved ',' delimiter")]
    EmbeddedDelimiter { index: usize },
}

/// State address validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Invalid address length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Address is not lowercase hex: {0}")]
    NotLowercaseHex(String),
}

/// Header and batch-list (de)serialization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("Serialization failed: {0}")]
    Encode(String),

    #[error("Deserialization failed: {0}")]
    Decode(String),

    /// Batch header does not list exactly its transactions.
    #[error("Batch {batch_id} header does not match its transactions")]
    TransactionIdMismatch { batch_id: String },
}

/// Stored-record encoding and parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Record JSON error: {0}")]
    Json(String),

    #[error("Stored value is not valid UTF-8")]
    InvalidUtf8,

    /// Stored value lacks the `entity_id,` prefix.
    #[error("Stored value has no id delimiter")]
    MissingDelimiter,

    #[error("Record has no relation list `{0}`")]
    MissingRelationList(String),
}
