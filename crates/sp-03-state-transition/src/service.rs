//! # Transaction Processor
//!
//! Routes transactions to family handlers by `(family_name, family_version)`
//! and applies batches atomically.
//!
//! ## Batch Semantics
//!
//! Transactions run in submission order against a [`StagedState`] overlay,
//! so a later transaction sees the writes of earlier ones in the same batch.
//! The overlay is committed only when every transaction succeeds; the first
//! failure is reported with its index and nothing is written.

use crate::adapters::staged::StagedState;
use crate::config::ProcessorConfig;
use crate::domain::errors::{ApplyError, BatchError};
use crate::domain::outcome::ApplyOutcome;
use crate::families::all_handlers;
use crate::ports::inbound::TransactionHandler;
use crate::ports::state::StateStore;
use shared_types::{Batch, Transaction};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Registry of family handlers.
#[derive(Default)]
pub struct TransactionProcessor {
    handlers: HashMap<(String, String), Arc<dyn TransactionHandler>>,
}

impl TransactionProcessor {
    /// An empty processor.
    pub fn new() -> Self {
        Self::default()
    }

    /// A processor with the category, supplier, part and envelope handlers.
    pub fn with_families(config: &ProcessorConfig) -> Self {
        let mut processor = Self::new();
        for handler in all_handlers(config) {
            processor.register(Arc::new(handler));
        }
        processor
    }

    /// Register a handler under each of its versions.
    pub fn register(&mut self, handler: Arc<dyn TransactionHandler>) {
        for version in handler.family_versions() {
            info!(
                family = handler.family_name(),
                version = %version,
                namespaces = ?handler.namespaces(),
                "Registered handler"
            );
            self.handlers
                .insert((handler.family_name().to_string(), version), Arc::clone(&handler));
        }
    }

    pub fn handler_for(&self, family_name: &str, version: &str) -> Option<&dyn TransactionHandler> {
        self.handlers
            .get(&(family_name.to_string(), version.to_string()))
            .map(|handler| handler.as_ref())
    }

    /// Registered `(family_name, version)` pairs, sorted.
    pub fn families(&self) -> Vec<(String, String)> {
        let mut keys: Vec<_> = self.handlers.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Route one transaction to its handler and apply it.
    pub fn apply_transaction(
        &self,
        transaction: &Transaction,
        state: &dyn StateStore,
    ) -> Result<ApplyOutcome, ApplyError> {
        let header = transaction
            .decode_header()
            .map_err(|e| ApplyError::invalid(format!("Invalid transaction header: {e}")))?;
        let handler = self
            .handler_for(&header.family_name, &header.family_version)
            .ok_or_else(|| {
                ApplyError::invalid(format!(
                    "No handler for family {} version {}",
                    header.family_name, header.family_version
                ))
            })?;

        match handler.apply(transaction, state) {
            Ok(outcome) => {
                info!(
                    family = %header.family_name,
                    txn_id = %transaction.header_signature,
                    ?outcome,
                    "Transaction accepted"
                );
                Ok(outcome)
            }
            Err(error) => {
                warn!(
                    family = %header.family_name,
                    txn_id = %transaction.header_signature,
                    %error,
                    "Transaction rejected"
                );
                Err(error)
            }
        }
    }

    /// Apply every transaction of `batch`, all or nothing.
    pub fn apply_batch(
        &self,
        batch: &Batch,
        state: &dyn StateStore,
    ) -> Result<Vec<ApplyOutcome>, BatchError> {
        batch.check_transaction_ids()?;

        let staged = StagedState::new(state);
        let outcomes = batch
            .transactions
            .iter()
            .enumerate()
            .map(|(index, transaction)| {
                self.apply_transaction(transaction, &staged)
                    .map_err(|source| BatchError::TransactionRejected {
                        index,
                        transaction_id: transaction.header_signature.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        staged
            .commit()
            .map_err(|error| BatchError::Commit(ApplyError::from(error)))?;
        info!(
            batch_id = %batch.header_signature,
            transactions = outcomes.len(),
            "Batch committed"
        );
        Ok(outcomes)
    }
}
