//! # Batch Builder Service
//!
//! Implements `TransactionBuilderApi` on top of a secp256k1 keypair.
//!
//! ## Invariants
//!
//! - A transaction's `inputs` and `outputs` are both exactly the single
//!   address of its own entity.
//! - `payload_sha512` is the digest of the exact payload bytes; the
//!   serialized header, never the payload, is what gets signed.
//! - A batch header lists its transactions' header signatures in order.

use crate::domain::errors::BuildError;
use crate::domain::nonce::{NonceSource, WallClockNonce};
use crate::domain::payloads::EntityPayload;
use crate::ports::inbound::TransactionBuilderApi;
use shared_crypto::{sha512_hex, Secp256k1KeyPair};
use shared_types::{
    encode, AddressDeriver, Batch, BatchHeader, BatchList, Transaction, TransactionHeader,
    FAMILY_VERSION, PAYLOAD_ENCODING,
};
use tracing::debug;

/// Signs transactions and batches with one keypair.
pub struct BatchBuilder<N: NonceSource = WallClockNonce> {
    keypair: Secp256k1KeyPair,
    public_key: String,
    nonces: N,
}

impl BatchBuilder<WallClockNonce> {
    /// Create a builder using wall-clock nonces.
    pub fn new(keypair: Secp256k1KeyPair) -> Self {
        Self::with_nonce_source(keypair, WallClockNonce)
    }
}

impl<N: NonceSource> BatchBuilder<N> {
    /// Create a builder with a custom nonce source.
    pub fn with_nonce_source(keypair: Secp256k1KeyPair, nonces: N) -> Self {
        let public_key = keypair.public_key().to_hex();
        Self {
            keypair,
            public_key,
            nonces,
        }
    }

    /// Serialize a batch list holding one transaction per payload.
    pub fn batch_list_bytes(&self, payloads: &[&dyn EntityPayload]) -> Result<Vec<u8>, BuildError> {
        Ok(self.build_batch_list(payloads)?.to_bytes()?)
    }
}

impl<N: NonceSource> TransactionBuilderApi for BatchBuilder<N> {
    fn public_key(&self) -> String {
        self.public_key.clone()
    }

    fn build_transaction(&self, payload: &dyn EntityPayload) -> Result<Transaction, BuildError> {
        let family = payload.family();
        let payload_bytes = encode(&payload.values())?;
        let address = AddressDeriver::for_family(family).address(payload.entity_id());

        let header = TransactionHeader {
            batcher_public_key: self.public_key.clone(),
            dependencies: Vec::new(),
            family_name: family.name().to_string(),
            family_version: FAMILY_VERSION.to_string(),
            inputs: vec![address.clone()],
            outputs: vec![address],
            nonce: self.nonces.next_nonce(),
            payload_encoding: PAYLOAD_ENCODING.to_string(),
            payload_sha512: sha512_hex(&payload_bytes),
            signer_public_key: self.public_key.clone(),
        }
        .to_bytes()?;

        let header_signature = self.keypair.sign(&header).to_hex();
        debug!(
            family = family.name(),
            entity_id = payload.entity_id(),
            txn_id = %header_signature,
            "Built transaction"
        );

        Ok(Transaction {
            header,
            header_signature,
            payload: payload_bytes,
        })
    }

    fn build_batch(&self, transactions: Vec<Transaction>) -> Result<Batch, BuildError> {
        if transactions.is_empty() {
            return Err(BuildError::EmptyBatch);
        }

        let header = BatchHeader {
            signer_public_key: self.public_key.clone(),
            transaction_ids: transactions
                .iter()
                .map(|t| t.header_signature.clone())
                .collect(),
        }
        .to_bytes()?;

        let header_signature = self.keypair.sign(&header).to_hex();
        debug!(
            batch_id = %header_signature,
            transactions = transactions.len(),
            "Built batch"
        );

        Ok(Batch {
            header,
            header_signature,
            transactions,
        })
    }

    fn build_batch_list(&self, payloads: &[&dyn EntityPayload]) -> Result<BatchList, BuildError> {
        let transactions = payloads
            .iter()
            .map(|payload| self.build_transaction(*payload))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BatchList {
            batches: vec![self.build_batch(transactions)?],
        })
    }
}
