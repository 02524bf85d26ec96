//! # Typed Family Payloads
//!
//! One struct per family whose fields mirror the wire order exactly.
//! Relation payloads leave every field except the entity id, the verb and
//! the relation target empty.
//!
//! ```
//! use sp_01_batch_builder::{EntityPayload, PartPayload};
//!
//! let part = PartPayload {
//!     pt_name: "zlib".into(),
//!     version: "1.3".into(),
//!     ..PartPayload::new("p1")
//! };
//! assert_eq!(part.action, "create");
//! assert_eq!(part.values()[0], "p1");
//! ```

use shared_types::{Family, Payload, CREATE_ACTION};

/// A family payload that can be canonically encoded.
pub trait EntityPayload {
    fn family(&self) -> Family;

    /// Field values in the family's wire order.
    fn values(&self) -> Vec<&str>;

    fn entity_id(&self) -> &str {
        self.values()[0]
    }
}

impl EntityPayload for Payload {
    fn family(&self) -> Family {
        Payload::family(self)
    }

    fn values(&self) -> Vec<&str> {
        Payload::values(self).iter().map(String::as_str).collect()
    }
}

/// `category_id,category_name,description,action`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPayload {
    pub category_id: String,
    pub category_name: String,
    pub description: String,
    pub action: String,
}

impl CategoryPayload {
    /// A `create` payload.
    pub fn new(
        category_id: impl Into<String>,
        category_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category_id: category_id.into(),
            category_name: category_name.into(),
            description: description.into(),
            action: CREATE_ACTION.to_string(),
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }
}

impl EntityPayload for CategoryPayload {
    fn family(&self) -> Family {
        Family::Category
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.category_id.as_str(),
            self.category_name.as_str(),
            self.description.as_str(),
            self.action.as_str(),
        ]
    }
}

/// `supplier_id,short_id,supplier_name,passwd,supplier_url,action,part_id`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierPayload {
    pub supplier_id: String,
    pub short_id: String,
    pub supplier_name: String,
    pub passwd: String,
    pub supplier_url: String,
    pub action: String,
    pub part_id: String,
}

impl SupplierPayload {
    /// A `create` payload with every descriptive field blank.
    pub fn new(supplier_id: impl Into<String>) -> Self {
        Self {
            supplier_id: supplier_id.into(),
            action: CREATE_ACTION.to_string(),
            ..Self::default()
        }
    }

    pub fn add_part(supplier_id: impl Into<String>, part_id: impl Into<String>) -> Self {
        Self {
            supplier_id: supplier_id.into(),
            action: "AddPart".to_string(),
            part_id: part_id.into(),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }
}

impl EntityPayload for SupplierPayload {
    fn family(&self) -> Family {
        Family::Supplier
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.supplier_id.as_str(),
            self.short_id.as_str(),
            self.supplier_name.as_str(),
            self.passwd.as_str(),
            self.supplier_url.as_str(),
            self.action.as_str(),
            self.part_id.as_str(),
        ]
    }
}

/// `pt_id,pt_name,checksum,version,src_uri,licensing,label,description,action,envelope_id,category_id,supplier_id`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartPayload {
    pub pt_id: String,
    pub pt_name: String,
    pub checksum: String,
    pub version: String,
    pub src_uri: String,
    pub licensing: String,
    pub label: String,
    pub description: String,
    pub action: String,
    pub envelope_id: String,
    pub category_id: String,
    pub supplier_id: String,
}

impl PartPayload {
    /// A `create` payload with every descriptive field blank.
    pub fn new(pt_id: impl Into<String>) -> Self {
        Self {
            pt_id: pt_id.into(),
            action: CREATE_ACTION.to_string(),
            ..Self::default()
        }
    }

    pub fn add_envelope(pt_id: impl Into<String>, envelope_id: impl Into<String>) -> Self {
        Self {
            pt_id: pt_id.into(),
            action: "AddEnvelope".to_string(),
            envelope_id: envelope_id.into(),
            ..Self::default()
        }
    }

    pub fn add_category(pt_id: impl Into<String>, category_id: impl Into<String>) -> Self {
        Self {
            pt_id: pt_id.into(),
            action: "AddCategory".to_string(),
            category_id: category_id.into(),
            ..Self::default()
        }
    }

    pub fn add_supplier(pt_id: impl Into<String>, supplier_id: impl Into<String>) -> Self {
        Self {
            pt_id: pt_id.into(),
            action: "AddSupplier".to_string(),
            supplier_id: supplier_id.into(),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }
}

impl EntityPayload for PartPayload {
    fn family(&self) -> Family {
        Family::Part
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.pt_id.as_str(),
            self.pt_name.as_str(),
            self.checksum.as_str(),
            self.version.as_str(),
            self.src_uri.as_str(),
            self.licensing.as_str(),
            self.label.as_str(),
            self.description.as_str(),
            self.action.as_str(),
            self.envelope_id.as_str(),
            self.category_id.as_str(),
            self.supplier_id.as_str(),
        ]
    }
}

/// `artifact_id,short_id,artifact_name,artifact_type,artifact_checksum,path,uri,label,openchain,action,sub_artifact_id`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvelopePayload {
    pub artifact_id: String,
    pub short_id: String,
    pub artifact_name: String,
    pub artifact_type: String,
    pub artifact_checksum: String,
    pub path: String,
    pub uri: String,
    pub label: String,
    pub openchain: String,
    pub action: String,
    pub sub_artifact_id: String,
}

impl EnvelopePayload {
    /// A `create` payload with every descriptive field blank.
    pub fn new(artifact_id: impl Into<String>) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            action: CREATE_ACTION.to_string(),
            ..Self::default()
        }
    }

    pub fn add_artifact(
        artifact_id: impl Into<String>,
        sub_artifact_id: impl Into<String>,
    ) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            action: "AddArtifact".to_string(),
            sub_artifact_id: sub_artifact_id.into(),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }
}

impl EntityPayload for EnvelopePayload {
    fn family(&self) -> Family {
        Family::Envelope
    }

    fn values(&self) -> Vec<&str> {
        vec![
            self.artifact_id.as_str(),
            self.short_id.as_str(),
            self.artifact_name.as_str(),
            self.artifact_type.as_str(),
            self.artifact_checksum.as_str(),
            self.path.as_str(),
            self.uri.as_str(),
            self.label.as_str(),
            self.openchain.as_str(),
            self.action.as_str(),
            self.sub_artifact_id.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::encode;

    fn assert_matches_schema(payload: &dyn EntityPayload) {
        let schema = payload.family().schema();
        let values = payload.values();
        assert_eq!(values.len(), schema.arity(), "{}", schema.name);
        // Round-trips through the shared decoder with the same field order.
        let decoded = Payload::decode(payload.family(), &encode(&values).unwrap()).unwrap();
        assert_eq!(decoded.entity_id(), payload.entity_id());
    }

    #[test]
    fn test_every_payload_matches_its_schema() {
        assert_matches_schema(&CategoryPayload::new("c1", "Libraries", "Libraries"));
        assert_matches_schema(&SupplierPayload::add_part("s1", "p1"));
        assert_matches_schema(&PartPayload::add_category("p1", "c1"));
        assert_matches_schema(&EnvelopePayload::add_artifact("e1", "e2"));
    }

    #[test]
    fn test_relation_target_lands_in_schema_field() {
        let payload = PartPayload::add_supplier("p1", "s1");
        let decoded = Payload::decode(Family::Part, &encode(&payload.values()).unwrap()).unwrap();

        let relation = Family::Part.schema().relation_for("AddSupplier").unwrap();
        assert_eq!(decoded.get(relation.target_field), Some("s1"));
        assert_eq!(decoded.get("category_id"), Some(""));
    }

    #[test]
    fn test_supplier_wire_bytes() {
        let payload = SupplierPayload {
            supplier_name: "Acme".into(),
            supplier_url: "https://acme.example".into(),
            ..SupplierPayload::new("s1")
        };
        assert_eq!(
            encode(&payload.values()).unwrap(),
            b"s1,,Acme,,https://acme.example,create,"
        );
    }

    #[test]
    fn test_query_action() {
        let payload = CategoryPayload::new("c1", "", "").with_action("show-category");
        assert_eq!(payload.values()[3], "show-category");
    }
}
