//! Command execution over the builder and the submission client.

use anyhow::{Context, Result};
use shared_types::StoredEntity;
use sp_01_batch_builder::{EntityPayload, TransactionBuilderApi};
use sp_02_submission_client::{BatchStatus, SubmissionApi};
use std::time::Duration;
use tracing::info;

/// Outcome of a submitted write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub batch_id: String,
    /// Final or last observed status when a wait budget was given.
    pub status: Option<BatchStatus>,
}

/// Build, sign and submit one batch carrying `payloads`.
pub fn submit_payloads(
    api: &dyn SubmissionApi,
    builder: &dyn TransactionBuilderApi,
    payloads: &[&dyn EntityPayload],
    wait: Option<Duration>,
) -> Result<Submission> {
    let bytes = builder
        .build_batch_list(payloads)
        .and_then(|list| Ok(list.to_bytes()?))
        .context("Failed to build batch")?;
    let batch_id = api.submit(&bytes).context("Failed to submit batch")?;
    info!(batch_id = %batch_id, transactions = payloads.len(), "Batch submitted");

    let status = match wait {
        Some(budget) => Some(
            api.wait_for_commit(&batch_id, budget)
                .context("Failed to poll batch status")?,
        ),
        None => None,
    };

    Ok(Submission { batch_id, status })
}

/// `entity_id` followed by the pretty-printed record.
pub fn render_entity(entity: &StoredEntity) -> Result<String> {
    let pretty = serde_json::to_string_pretty(&entity.record).context("Failed to render record")?;
    Ok(format!("{}: {}", entity.entity_id, pretty))
}
