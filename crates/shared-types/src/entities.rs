//! # Wire Entities
//!
//! Signed transactions and batches as they travel from the builder to the
//! REST API and from the validator to the family handlers.
//!
//! ## Structure
//!
//! - **Transaction**: serialized [`TransactionHeader`] + payload + header
//!   signature (the transaction id)
//! - **Batch**: serialized [`BatchHeader`] listing transaction ids + the
//!   transactions + header signature (the batch id)
//! - **BatchList**: the body posted to `/batches`
//!
//! Headers are carried as serialized bytes because the signature covers
//! those exact bytes; re-encoding a decoded header is never signed.

use crate::address::StateAddress;
use crate::errors::WireError;
use serde::{Deserialize, Serialize};

/// Metadata a transaction's signature commits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    /// Hex public key of the batch signer.
    pub batcher_public_key: String,
    /// Transaction ids that must commit first (unused by these families).
    pub dependencies: Vec<String>,
    /// Family routing key.
    pub family_name: String,
    /// Family version.
    pub family_version: String,
    /// Addresses the handler may read.
    pub inputs: Vec<StateAddress>,
    /// Addresses the handler may write.
    pub outputs: Vec<StateAddress>,
    /// Wall-clock derived uniqueness token.
    pub nonce: String,
    /// Declared payload encoding.
    pub payload_encoding: String,
    /// SHA-512 hex of the exact payload bytes.
    pub payload_sha512: String,
    /// Hex public key of the transaction signer.
    pub signer_public_key: String,
}

impl TransactionHeader {
    pub fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
        bincode::serialize(self).map_err(|e| WireError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        bincode::deserialize(bytes).map_err(|e| WireError::Decode(e.to_string()))
    }
}

/// A signed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Serialized [`TransactionHeader`].
    pub header: Vec<u8>,
    /// Hex signature over `header`; the transaction id.
    pub header_signature: String,
    /// Canonical-encoded payload.
    pub payload: Vec<u8>,
}

impl Transaction {
    pub fn id(&self) -> &str {
        &self.header_signature
    }

    pub fn decode_header(&self) -> Result<TransactionHeader, WireError> {
        TransactionHeader::from_bytes(&self.header)
    }
}

/// Metadata a batch signature commits to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchHeader {
    /// Hex public key of the batcher.
    pub signer_public_key: String,
    /// Header signatures of the contained transactions, in order.
    pub transaction_ids: Vec<String>,
}

impl BatchHeader {
    pub fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
        bincode::serialize(self).map_err(|e| WireError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        bincode::deserialize(bytes).map_err(|e| WireError::Decode(e.to_string()))
    }
}

/// The atomic unit of acceptance: all transactions commit or none do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Serialized [`BatchHeader`].
    pub header: Vec<u8>,
    /// Hex signature over `header`; the batch id.
    pub header_signature: String,
    pub transactions: Vec<Transaction>,
}

impl Batch {
    pub fn id(&self) -> &str {
        &self.header_signature
    }

    pub fn decode_header(&self) -> Result<BatchHeader, WireError> {
        BatchHeader::from_bytes(&self.header)
    }

    /// Check that the header lists exactly the contained transactions, in order.
    pub fn check_transaction_ids(&self) -> Result<(), WireError> {
        let header = self.decode_header()?;
        let ids: Vec<&str> = self.transactions.iter().map(Transaction::id).collect();
        if header.transaction_ids != ids {
            return Err(WireError::TransactionIdMismatch {
                batch_id: self.header_signature.clone(),
            });
        }
        Ok(())
    }
}

/// Body of a `POST /batches` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchList {
    pub batches: Vec<Batch>,
}

impl BatchList {
    pub fn to_bytes(&self) -> Result<Vec<u8>, WireError> {
        bincode::serialize(self).map_err(|e| WireError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WireError> {
        bincode::deserialize(bytes).map_err(|e| WireError::Decode(e.to_string()))
    }

    /// Batch ids in submission order.
    pub fn batch_ids(&self) -> Vec<&str> {
        self.batches.iter().map(Batch::id).collect()
    }
}

/// One `(address, value)` pair of ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    pub address: StateAddress,
    pub data: Vec<u8>,
}

impl StateEntry {
    pub fn new(address: StateAddress, data: Vec<u8>) -> Self {
        Self { address, data }
    }
}
