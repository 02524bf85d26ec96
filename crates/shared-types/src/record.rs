//! # Entity Records
//!
//! The ledger-visible value of an entity and its stored form.
//!
//! A record is an *ordered* JSON object: the family's scalar fields in
//! payload order, then its relation lists in declared order. Every replica
//! must produce byte-identical JSON for the same history, so ordering is
//! carried explicitly instead of relying on a map type.
//!
//! ```text
//! stored value = entity_id "," {"pt_id":"p1",...,"envelopes":[],"suppliers":[{"supplier_id":"s1"}],...}
//! ```

use crate::codec::{Payload, DELIMITER};
use crate::errors::RecordError;
use crate::families::RelationSpec;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One element of a relation list: a single-entry object `{"<key>": id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRef {
    pub key: String,
    pub id: String,
}

impl RelationRef {
    pub fn new(key: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            id: id.into(),
        }
    }
}

impl Serialize for RelationRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.id)?;
        map.end()
    }
}

/// An entity record with ordered scalar fields and relation lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRecord {
    scalars: Vec<(String, String)>,
    relations: Vec<(String, Vec<RelationRef>)>,
}

impl EntityRecord {
    /// Fresh record for a `create` payload: the schema's scalar fields and
    /// an empty list per declared relation.
    pub fn create(payload: &Payload) -> Self {
        let schema = payload.schema();
        let scalars = schema
            .record_fields()
            .iter()
            .zip(payload.values())
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        let relations = schema
            .relations
            .iter()
            .map(|relation| (relation.list.to_string(), Vec::new()))
            .collect();
        Self { scalars, relations }
    }

    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.scalars
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn relation(&self, list: &str) -> Option<&[RelationRef]> {
        self.relations
            .iter()
            .find(|(name, _)| name == list)
            .map(|(_, refs)| refs.as_slice())
    }

    /// Ids in a relation list, in order.
    pub fn relation_ids(&self, list: &str) -> Vec<&str> {
        self.relation(list)
            .map(|refs| refs.iter().map(|r| r.id.as_str()).collect())
            .unwrap_or_default()
    }

    /// Exact membership of `id` in the relation list of `spec`.
    pub fn has_relation(&self, spec: &RelationSpec, id: &str) -> bool {
        self.relation(spec.list)
            .is_some_and(|refs| refs.iter().any(|r| r.key == spec.key && r.id == id))
    }

    /// Append `{"<key>": id}` to the relation list of `spec`.
    pub fn append_relation(&mut self, spec: &RelationSpec, id: &str) -> Result<(), RecordError> {
        let refs = self
            .relations
            .iter_mut()
            .find(|(name, _)| name == spec.list)
            .map(|(_, refs)| refs)
            .ok_or_else(|| RecordError::MissingRelationList(spec.list.to_string()))?;
        refs.push(RelationRef::new(spec.key, id));
        Ok(())
    }

    /// Compact JSON in record order.
    pub fn to_json(&self) -> Result<String, RecordError> {
        serde_json::to_string(self).map_err(|e| RecordError::Json(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        serde_json::from_str(json).map_err(|e| RecordError::Json(e.to_string()))
    }
}

impl Serialize for EntityRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scalars.len() + self.relations.len()))?;
        for (name, value) in &self.scalars {
            map.serialize_entry(name, value)?;
        }
        for (name, refs) in &self.relations {
            map.serialize_entry(name, refs)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EntityRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = EntityRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of string fields and relation lists")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<EntityRecord, A::Error> {
        let mut record = EntityRecord::default();
        while let Some((name, value)) = map.next_entry::<String, Value>()? {
            match value {
                Value::String(text) => record.scalars.push((name, text)),
                Value::Array(items) => {
                    let refs = items
                        .into_iter()
                        .map(relation_ref::<A::Error>)
                        .collect::<Result<Vec<_>, _>>()?;
                    record.relations.push((name, refs));
                }
                other => {
                    return Err(de::Error::custom(format!(
                        "field `{name}` must be a string or a list, got {other}"
                    )))
                }
            }
        }
        Ok(record)
    }
}

fn relation_ref<E: de::Error>(item: Value) -> Result<RelationRef, E> {
    match item {
        Value::Object(entry) if entry.len() == 1 => match entry.into_iter().next() {
            Some((key, Value::String(id))) => Ok(RelationRef { key, id }),
            _ => Err(E::custom("relation id must be a string")),
        },
        other => Err(E::custom(format!(
            "relation entry must be a single-key object, got {other}"
        ))),
    }
}

/// A decoded state value: the id prefix, the raw JSON and the parsed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntity {
    pub entity_id: String,
    pub json: String,
    pub record: EntityRecord,
}

impl StoredEntity {
    /// Split `entity_id,json` at the first delimiter and parse the record.
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        let text = std::str::from_utf8(bytes).map_err(|_| RecordError::InvalidUtf8)?;
        let (entity_id, json) = text
            .split_once(DELIMITER)
            .ok_or(RecordError::MissingDelimiter)?;
        let record = EntityRecord::from_json(json)?;
        Ok(Self {
            entity_id: entity_id.to_string(),
            json: json.to_string(),
            record,
        })
    }
}

/// Serialize `entity_id,json` for writing to state.
pub fn encode_state_value(entity_id: &str, record: &EntityRecord) -> Result<Vec<u8>, RecordError> {
    let json = record.to_json()?;
    let mut value = String::with_capacity(entity_id.len() + 1 + json.len());
    value.push_str(entity_id);
    value.push(DELIMITER);
    value.push_str(&json);
    Ok(value.into_bytes())
}
