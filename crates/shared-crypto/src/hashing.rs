//! # SHA-512 Hashing
//!
//! Every hash on the ledger protocol is SHA-512: the payload digest carried
//! in transaction headers, the family namespace prefix and the per-entity
//! state address are all taken from its lowercase hex form.

use sha2::{Digest, Sha512};

/// SHA-512 digest output (512-bit).
pub type Sha512Digest = [u8; 64];

/// Hash data with SHA-512 (one-shot).
pub fn sha512(data: &[u8]) -> Sha512Digest {
    let mut hasher = Sha512::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash data with SHA-512 and return the 128-char lowercase hex digest.
pub fn sha512_hex(data: &[u8]) -> String {
    hex::encode(sha512(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // sha512("abc"), FIPS 180-2 appendix C.1
        assert_eq!(
            sha512_hex(b"abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(sha512(b"test"), sha512(b"test"));
    }

    #[test]
    fn test_different_inputs() {
        assert_ne!(sha512_hex(b"input1"), sha512_hex(b"input2"));
    }

    #[test]
    fn test_hex_length() {
        assert_eq!(sha512_hex(b"").len(), 128);
    }
}
