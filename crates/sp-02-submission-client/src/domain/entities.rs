//! Batch status values and the JSON envelopes returned by the REST API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Commit status of a submitted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Pending,
    Committed,
    Invalid,
    Unknown,
}

impl BatchStatus {
    /// Map the API's status string; anything unrecognised is `Unknown`.
    pub fn from_wire(status: &str) -> Self {
        match status {
            "PENDING" => Self::Pending,
            "COMMITTED" => Self::Committed,
            "INVALID" => Self::Invalid,
            _ => Self::Unknown,
        }
    }

    /// Committed or invalid; polling further cannot change the answer.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Committed | Self::Invalid)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Committed => "COMMITTED",
            Self::Invalid => "INVALID",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected transaction reported alongside an `INVALID` batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidTransactionInfo {
    pub id: String,
    #[serde(default)]
    pub message: String,
}

/// Status of one batch with any rejection details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchStatusReport {
    pub id: String,
    pub status: BatchStatus,
    pub invalid_transactions: Vec<InvalidTransactionInfo>,
}

impl BatchStatusReport {
    pub(crate) fn without_details(id: &str, status: BatchStatus) -> Self {
        Self {
            id: id.to_string(),
            status,
            invalid_transactions: Vec::new(),
        }
    }
}

/// `{"data": ..., "paging": {...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub paging: Option<Paging>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Paging {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchStatusItem {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub invalid_transactions: Vec<InvalidTransactionInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StateItem {
    pub address: String,
    pub data: String,
}

/// `{"error": {"code": .., "title": .., "message": ..}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_wire() {
        assert_eq!(BatchStatus::from_wire("COMMITTED"), BatchStatus::Committed);
        assert_eq!(BatchStatus::from_wire("INVALID"), BatchStatus::Invalid);
        assert_eq!(BatchStatus::from_wire("PENDING"), BatchStatus::Pending);
        assert_eq!(BatchStatus::from_wire("committed"), BatchStatus::Unknown);
    }

    #[test]
    fn test_final_states() {
        assert!(BatchStatus::Committed.is_final());
        assert!(BatchStatus::Invalid.is_final());
        assert!(!BatchStatus::Pending.is_final());
        assert!(!BatchStatus::Unknown.is_final());
    }

    #[test]
    fn test_status_envelope_parses() {
        let body = r#"{
            "data": [{"id": "b1", "status": "INVALID",
                      "invalid_transactions": [{"id": "t1", "message": "Part already exists"}]}],
            "link": "http://localhost:8008/batch_status?id=b1"
        }"#;
        let envelope: DataEnvelope<Vec<BatchStatusItem>> = serde_json::from_str(body).unwrap();

        assert_eq!(envelope.data[0].status, "INVALID");
        assert_eq!(envelope.data[0].invalid_transactions[0].message, "Part already exists");
        assert!(envelope.paging.is_none());
    }
}
