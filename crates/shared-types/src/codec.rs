//! # Canonical Payload Codec
//!
//! The single wire format shared by all four families: the payload fields,
//! in the family's fixed order, joined by a single comma and UTF-8 encoded.
//! There is no escaping, so the encoder refuses any field that already
//! contains the delimiter and the decoder insists on the exact arity.

use crate::errors::CodecError;
use crate::families::{Family, FamilySchema};

/// Reserved field delimiter.
pub const DELIMITER: char = ',';

/// Join `fields` with [`DELIMITER`].
pub fn encode<S: AsRef<str>>(fields: &[S]) -> Result<Vec<u8>, CodecError> {
    if let Some(index) = fields
        .iter()
        .position(|f| f.as_ref().contains(DELIMITER))
    {
        return Err(CodecError::EmbeddedDelimiter { index });
    }

    let joined = fields
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(",");
    Ok(joined.into_bytes())
}

/// Split `bytes` on [`DELIMITER`] into exactly `arity` fields.
pub fn decode(bytes: &[u8], arity: usize) -> Result<Vec<String>, CodecError> {
    let text = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
    let fields: Vec<String> = text.split(DELIMITER).map(str::to_owned).collect();

    if fields.len() != arity {
        return Err(CodecError::MalformedPayload {
            expected: arity,
            actual: fields.len(),
        });
    }
    Ok(fields)
}

/// A decoded payload bound to its family schema.
///
/// Construction guarantees the value count equals the schema arity, so
/// positional accessors never go out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    family: Family,
    values: Vec<String>,
}

impl Payload {
    /// Wrap already-split values, checking arity.
    pub fn new(family: Family, values: Vec<String>) -> Result<Self, CodecError> {
        let arity = family.schema().arity();
        if values.len() != arity {
            return Err(CodecError::MalformedPayload {
                expected: arity,
                actual: values.len(),
            });
        }
        Ok(Self { family, values })
    }

    /// Decode payload bytes for `family`.
    pub fn decode(family: Family, bytes: &[u8]) -> Result<Self, CodecError> {
        let values = decode(bytes, family.schema().arity())?;
        Ok(Self { family, values })
    }

    /// Encode back to wire bytes.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        encode(&self.values)
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn schema(&self) -> &'static FamilySchema {
        self.family.schema()
    }

    /// Value of a named payload field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.schema()
            .field_index(field)
            .map(|index| self.values[index].as_str())
    }

    pub fn entity_id(&self) -> &str {
        &self.values[0]
    }

    pub fn action(&self) -> &str {
        &self.values[self.schema().action_index]
    }

    /// All values in wire order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}
