//! # Submission Client (SP-02)
//!
//! Blocking client for the ledger's REST API: posts serialized batch lists,
//! polls batch status and reads entity state back.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): batch status values, REST envelopes, errors
//! - **Ports Layer** (`ports/`): the `SubmissionApi` trait tooling codes against
//! - **Client** (`client.rs`): the `reqwest` blocking adapter
//! - **Config** (`config.rs`): endpoint, timeout and basic auth
//!
//! ## Endpoints
//!
//! ```text
//! POST /batches                      application/octet-stream batch list
//! GET  /batch_status?id=<id>&wait=<s>
//! GET  /state?address=<prefix>       paged, follows paging.next
//! GET  /state/<address>              404 → absent
//! ```
//!
//! The client holds only immutable configuration, so one instance can be
//! shared across threads.

pub mod client;
pub mod config;
pub mod domain;
pub mod ports;

pub use client::RestSubmissionClient;
pub use config::{BasicAuth, ClientConfig};
pub use domain::entities::{BatchStatus, BatchStatusReport, InvalidTransactionInfo};
pub use domain::errors::ClientError;
pub use ports::inbound::SubmissionApi;
