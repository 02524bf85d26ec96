//! # Shared Crypto - Ledger Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-512 | Payload digests, namespace and address derivation |
//! | `ecdsa` | secp256k1 | Transaction and batch header signing |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, low-S normalized signatures
//! - **Key material**: zeroized when a keypair is dropped

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use ecdsa::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
pub use errors::CryptoError;
pub use hashing::{sha512, sha512_hex, Sha512Digest};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
