//! # ECDSA Signatures (secp256k1)
//!
//! Signing for transaction and batch headers.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalized signatures
//! - Secret scalars are wiped on drop
//!
//! ## Wire Representation
//!
//! Public keys travel as the lowercase hex of the 33-byte compressed SEC1
//! point. Signatures travel as the lowercase hex of the 64-byte compact
//! `r || s` form; a header signature doubles as the transaction or batch id.

use crate::CryptoError;
use k256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use zeroize::Zeroizing;

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1PublicKey([u8; 33]);

impl Secp256k1PublicKey {
    /// Create from compressed bytes (33 bytes, starting with 0x02 or 0x03).
    pub fn from_bytes(bytes: [u8; 33]) -> Result<Self, CryptoError> {
        VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Parse from the 66-char hex form used in headers.
    pub fn from_hex(value: &str) -> Result<Self, CryptoError> {
        let raw = hex::decode(value).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let bytes: [u8; 33] = raw
            .try_into()
            .map_err(|raw: Vec<u8>| CryptoError::InvalidKeyLength {
                expected: 33,
                actual: raw.len(),
            })?;
        Self::from_bytes(bytes)
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Lowercase hex of the compressed point.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Verify a signature over `message`.
    pub fn verify(
        &self,
        message: &[u8],
        signature: &Secp256k1Signature,
    ) -> Result<(), CryptoError> {
        let verifying_key =
            VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;

        let sig = Signature::from_slice(&signature.0).map_err(|_| CryptoError::InvalidSignature)?;

        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

/// ECDSA signature (64 bytes, r||s format).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1Signature([u8; 64]);

impl Secp256k1Signature {
    /// Create from bytes (64 bytes).
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Parse from the 128-char hex form used as transaction/batch ids.
    pub fn from_hex(value: &str) -> Result<Self, CryptoError> {
        let raw = hex::decode(value).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let bytes: [u8; 64] = raw
            .try_into()
            .map_err(|_| CryptoError::InvalidSignatureFormat)?;
        Ok(Self(bytes))
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Lowercase hex of `r || s`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// secp256k1 ECDSA keypair.
///
/// The same keypair signs transaction headers and the batch header that
/// wraps them, so the signer and batcher keys of a transaction coincide.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_slice(&bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Create from the 64-char hex form of the secret scalar.
    pub fn from_hex(value: &str) -> Result<Self, CryptoError> {
        let raw = Zeroizing::new(
            hex::decode(value.trim()).map_err(|e| CryptoError::InvalidHex(e.to_string()))?,
        );
        if raw.len() != 32 {
            return Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: raw.len(),
            });
        }
        let signing_key =
            SigningKey::from_slice(&raw).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get public key (compressed, 33 bytes).
    pub fn public_key(&self) -> Secp256k1PublicKey {
        let encoded = self.signing_key.verifying_key().to_encoded_point(true);
        let mut bytes = [0u8; 33];
        // A compressed SEC1 point is always 33 bytes.
        bytes.copy_from_slice(encoded.as_bytes());
        Secp256k1PublicKey(bytes)
    }

    /// Sign a message (deterministic RFC 6979 over SHA-256 of `message`).
    pub fn sign(&self, message: &[u8]) -> Secp256k1Signature {
        let sig: Signature = self.signing_key.sign(message);
        let bytes: [u8; 64] = sig.to_bytes().into();
        Secp256k1Signature(bytes)
    }

    /// Hex of the secret scalar, wrapped so the copy is wiped after use.
    pub fn to_hex(&self) -> Zeroizing<String> {
        let secret = Zeroizing::new(<[u8; 32]>::from(self.signing_key.to_bytes()));
        Zeroizing::new(hex::encode(*secret))
    }
}

impl std::fmt::Debug for Secp256k1KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1KeyPair")
            .field("public_key", &self.public_key().to_hex())
            .finish_non_exhaustive()
    }
}
