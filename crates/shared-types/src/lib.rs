//! # Shared Types Crate
//!
//! Everything both sides of a transaction family must agree on byte for
//! byte: the per-family payload schemas, the canonical comma-delimited
//! codec, the 70-hex state address derivation and the signed
//! transaction/batch wire entities, plus the ordered JSON record every
//! replica must store identically.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Field order, relation verbs and namespace
//!   prefixes are compile-time constants defined here, never re-declared by
//!   the builder or the handlers.
//! - **Pure Derivation**: Addresses are functions of `(family_name, entity_id)`
//!   alone; no randomness, no external state.
//! - **One Address per Transaction**: Every transaction reads and writes only
//!   its own entity's slot.

pub mod address;
pub mod codec;
pub mod display;
pub mod entities;
pub mod errors;
pub mod families;
pub mod record;

pub use address::*;
pub use codec::*;
pub use entities::*;
pub use errors::*;
pub use families::*;
pub use record::*;
