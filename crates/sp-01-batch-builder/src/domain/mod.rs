//! Domain layer for batch construction.

pub mod errors;
pub mod nonce;
pub mod payloads;
