//! # Batch Builder (SP-01)
//!
//! Client-side construction of signed transactions and batches for the
//! category, supplier, part and envelope families.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): typed payloads, nonce sources, errors
//! - **Ports Layer** (`ports/`): the builder API consumed by tooling
//! - **Service Layer** (`service.rs`): signs headers and assembles batches
//!
//! ## Flow
//!
//! ```text
//! payload ──encode──→ bytes ──sha512──→ TransactionHeader ──sign──→ Transaction
//!                                                                      │
//!                 BatchList ←──wrap── Batch ←──sign── BatchHeader ←────┘
//! ```
//!
//! No network I/O happens here; the output is the serialized batch list
//! handed to the submission client.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::errors::BuildError;
pub use domain::nonce::{FixedNonce, NonceSource, WallClockNonce};
pub use domain::payloads::{
    CategoryPayload, EntityPayload, EnvelopePayload, PartPayload, SupplierPayload,
};
pub use ports::inbound::TransactionBuilderApi;
pub use service::BatchBuilder;
