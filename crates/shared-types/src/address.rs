//! # State Address Derivation
//!
//! ```text
//! address = sha512_hex(family_name)[0..6] || sha512_hex(entity_id)[0..64]
//!           └──── namespace prefix ────┘    └────── entity slot ──────┘
//! ```
//!
//! 70 lowercase hex characters (35 bytes). Any two processes compute the
//! same address for the same `(family_name, entity_id)` pair without
//! coordination.

use crate::errors::AddressError;
use crate::families::Family;
use serde::{Deserialize, Serialize};
use shared_crypto::sha512_hex;
use std::fmt;

/// Hex length of a family namespace prefix.
pub const PREFIX_LEN: usize = 6;

/// Hex length of a full state address.
pub const ADDRESS_LEN: usize = 70;

/// A validated 70-hex-char key into the global state space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateAddress(String);

impl StateAddress {
    /// Validate an address received from outside (REST responses, headers).
    pub fn parse(value: &str) -> Result<Self, AddressError> {
        if value.len() != ADDRESS_LEN {
            return Err(AddressError::InvalidLength {
                expected: ADDRESS_LEN,
                actual: value.len(),
            });
        }
        if !value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(AddressError::NotLowercaseHex(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 6-hex family namespace prefix.
    pub fn prefix(&self) -> &str {
        &self.0[..PREFIX_LEN]
    }
}

impl fmt::Display for StateAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StateAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StateAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StateAddress> for String {
    fn from(address: StateAddress) -> Self {
        address.0
    }
}

/// First six hex characters of `sha512(family_name)`.
pub fn namespace_prefix(family_name: &str) -> String {
    let mut digest = sha512_hex(family_name.as_bytes());
    digest.truncate(PREFIX_LEN);
    digest
}

/// Address of `entity_id` under an already computed namespace prefix.
pub fn derive_address(prefix: &str, entity_id: &str) -> StateAddress {
    let digest = sha512_hex(entity_id.as_bytes());
    StateAddress(format!("{}{}", prefix, &digest[..ADDRESS_LEN - PREFIX_LEN]))
}

/// Address deriver for one family.
///
/// The prefix is computed once at construction and never mutated; the
/// deriver is freely shareable across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDeriver {
    prefix: String,
}

impl AddressDeriver {
    pub fn new(family_name: &str) -> Self {
        Self {
            prefix: namespace_prefix(family_name),
        }
    }

    pub fn for_family(family: Family) -> Self {
        Self::new(family.name())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn address(&self, entity_id: &str) -> StateAddress {
        derive_address(&self.prefix, entity_id)
    }

    /// Whether `address` lives in this family's namespace.
    pub fn owns(&self, address: &StateAddress) -> bool {
        address.prefix() == self.prefix
    }
}
