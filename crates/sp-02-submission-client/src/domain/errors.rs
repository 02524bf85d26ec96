//! # Client Errors

use shared_types::{AddressError, RecordError, WireError};
use thiserror::Error;

/// Errors that can occur when talking to the REST API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The REST API refused the connection.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// HTTP 404, with the server's reason.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-2xx response, with the server's reason verbatim.
    #[error("Error {status}: {reason}")]
    RemoteError { status: u16, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Batch list bytes could not be decoded; nothing was sent.
    #[error("Invalid batch list: {0}")]
    InvalidBatch(#[from] WireError),

    #[error("Invalid stored entry: {0}")]
    Record(#[from] RecordError),

    #[error("Invalid state address: {0}")]
    Address(#[from] AddressError),
}
