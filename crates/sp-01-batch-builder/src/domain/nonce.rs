//! Transaction nonces.
//!
//! Two transactions with identical payloads must still get distinct headers,
//! hence distinct signatures and ids. The nonce never influences how a
//! handler decides a transaction.

use chrono::Utc;

/// Supplier of per-transaction nonces.
pub trait NonceSource: Send + Sync {
    fn next_nonce(&self) -> String;
}

/// Hex nanoseconds since the Unix epoch plus 32 random bits, so that two
/// transactions built within the same clock tick still differ.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClockNonce;

impl NonceSource for WallClockNonce {
    fn next_nonce(&self) -> String {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        format!("{:x}-{:08x}", nanos, rand::random::<u32>())
    }
}

/// Constant nonce for reproducible headers in tests and fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedNonce(pub String);

impl NonceSource for FixedNonce {
    fn next_nonce(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock_nonces_differ() {
        let source = WallClockNonce;
        assert_ne!(source.next_nonce(), source.next_nonce());
    }

    #[test]
    fn test_fixed_nonce() {
        let source = FixedNonce("42".into());
        assert_eq!(source.next_nonce(), "42");
    }
}
