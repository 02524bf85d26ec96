//! # State Transition (SP-03)
//!
//! Server-side handlers that apply category, supplier, part and envelope
//! transactions to the ledger's key-value state.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): dedup policy, apply outcomes, errors
//! - **Ports Layer** (`ports/`): `TransactionHandler` and `StateStore`
//! - **Adapters** (`adapters/`): in-memory store and the staged batch overlay
//! - **Handler** (`handler.rs`): one generic handler driven by a family schema
//! - **Service** (`service.rs`): routes transactions and applies batches
//!
//! ## Entity Lifecycle
//!
//! ```text
//! Absent ──create──→ Created ──Add<Relation>──→ Mutated ──Add<Relation>──→ ...
//!    │                  │
//!    └─ Add<Relation> ──┴─ create ──→ InvalidTransaction
//! ```
//!
//! Each transaction reads and writes exactly one address. Handlers hold only
//! immutable configuration, so the outcome of `apply` depends on nothing but
//! the transaction and the state it reads.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod families;
pub mod handler;
pub mod ports;
pub mod service;

pub use adapters::memory_store::InMemoryStateStore;
pub use adapters::staged::StagedState;
pub use config::ProcessorConfig;
pub use domain::dedup::DedupPolicy;
pub use domain::errors::{ApplyError, BatchError, StateStoreError};
pub use domain::outcome::ApplyOutcome;
pub use handler::FamilyHandler;
pub use ports::inbound::TransactionHandler;
pub use ports::state::StateStore;
pub use service::TransactionProcessor;
