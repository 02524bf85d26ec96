//! # Family Schemas
//!
//! A family is a named class of ledger entities sharing one address
//! namespace and one payload schema. The schema fixes:
//!
//! - the positional payload fields (the id is always first, the action verb
//!   is itself a positional field),
//! - the scalar fields copied onto a freshly created record (every field
//!   before `action`),
//! - the relation verbs, which payload field carries their target id, and
//!   which relation list on the record they append to,
//! - the query verbs that are accepted but never change state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the positional field carrying the action verb.
pub const ACTION_FIELD: &str = "action";

/// Verb that creates a record at an empty address.
pub const CREATE_ACTION: &str = "create";

/// Declared payload encoding for every family.
pub const PAYLOAD_ENCODING: &str = "csv-utf8";

/// Version shared by all four families.
pub const FAMILY_VERSION: &str = "1.0";

/// A relation-adding verb and where its target id lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationSpec {
    /// Action verb, e.g. `AddPart`.
    pub action: &'static str,
    /// Payload field holding the target id.
    pub target_field: &'static str,
    /// Relation list on the stored record.
    pub list: &'static str,
    /// Key of the single-entry object appended to the list.
    pub key: &'static str,
}

/// Compile-time description of one family's payload and record layout.
#[derive(Debug, PartialEq, Eq)]
pub struct FamilySchema {
    /// Family name; also the namespace seed.
    pub name: &'static str,
    /// Family version.
    pub version: &'static str,
    /// Payload fields in wire order.
    pub fields: &'static [&'static str],
    /// Position of [`ACTION_FIELD`] in `fields`.
    pub action_index: usize,
    /// Relation verbs, in the order their lists appear on the record.
    pub relations: &'static [RelationSpec],
    /// Query verbs accepted as no-ops.
    pub passive_actions: &'static [&'static str],
}

impl FamilySchema {
    /// Number of comma-separated fields in a payload.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Name of the id field (always the first payload field).
    pub fn id_field(&self) -> &'static str {
        self.fields[0]
    }

    /// Scalar fields stored on the record, in payload order.
    pub fn record_fields(&self) -> &'static [&'static str] {
        &self.fields[..self.action_index]
    }

    /// Position of `name` in the payload.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| *f == name)
    }

    /// Relation spec for a relation-adding verb.
    pub fn relation_for(&self, action: &str) -> Option<&'static RelationSpec> {
        self.relations.iter().find(|r| r.action == action)
    }

    /// Whether `action` is a query verb.
    pub fn is_passive(&self, action: &str) -> bool {
        self.passive_actions.contains(&action)
    }

    /// Whether the family recognises `action` at all.
    pub fn knows_action(&self, action: &str) -> bool {
        action == CREATE_ACTION || self.relation_for(action).is_some() || self.is_passive(action)
    }
}

pub static CATEGORY_SCHEMA: FamilySchema = FamilySchema {
    name: "category",
    version: FAMILY_VERSION,
    fields: &["category_id", "category_name", "description", ACTION_FIELD],
    action_index: 3,
    relations: &[],
    // `update` has no defined semantics yet; it is accepted and ignored.
    passive_actions: &[
        "list",
        "show",
        "update",
        "list-category",
        "show-category",
        "update-category",
    ],
};

pub static SUPPLIER_SCHEMA: FamilySchema = FamilySchema {
    name: "supplier",
    version: FAMILY_VERSION,
    fields: &[
        "supplier_id",
        "short_id",
        "supplier_name",
        "passwd",
        "supplier_url",
        ACTION_FIELD,
        "part_id",
    ],
    action_index: 5,
    relations: &[RelationSpec {
        action: "AddPart",
        target_field: "part_id",
        list: "parts",
        key: "part_id",
    }],
    passive_actions: &["list", "show", "list-supplier", "show-supplier"],
};

pub static PART_SCHEMA: FamilySchema = FamilySchema {
    name: "part",
    version: FAMILY_VERSION,
    fields: &[
        "pt_id",
        "pt_name",
        "checksum",
        "version",
        "src_uri",
        "licensing",
        "label",
        "description",
        ACTION_FIELD,
        "envelope_id",
        "category_id",
        "supplier_id",
    ],
    action_index: 8,
    relations: &[
        RelationSpec {
            action: "AddEnvelope",
            target_field: "envelope_id",
            list: "envelopes",
            key: "envelope_id",
        },
        RelationSpec {
            action: "AddSupplier",
            target_field: "supplier_id",
            list: "suppliers",
            key: "supplier_id",
        },
        RelationSpec {
            action: "AddCategory",
            target_field: "category_id",
            list: "categories",
            key: "category_id",
        },
    ],
    passive_actions: &["list", "show", "list-part", "show-part"],
};

pub static ENVELOPE_SCHEMA: FamilySchema = FamilySchema {
    name: "envelope",
    version: FAMILY_VERSION,
    fields: &[
        "artifact_id",
        "short_id",
        "artifact_name",
        "artifact_type",
        "artifact_checksum",
        "path",
        "uri",
        "label",
        "openchain",
        ACTION_FIELD,
        "sub_artifact_id",
    ],
    action_index: 9,
    relations: &[RelationSpec {
        action: "AddArtifact",
        target_field: "sub_artifact_id",
        list: "sub_artifact",
        key: "artifact_id",
    }],
    passive_actions: &["list", "show", "list-envelope", "show-envelope"],
};

/// The four ledger families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Category,
    Supplier,
    Part,
    Envelope,
}

impl Family {
    /// All families, in registration order.
    pub const ALL: [Family; 4] = [
        Family::Category,
        Family::Supplier,
        Family::Part,
        Family::Envelope,
    ];

    /// Static schema for this family.
    pub fn schema(self) -> &'static FamilySchema {
        match self {
            Family::Category => &CATEGORY_SCHEMA,
            Family::Supplier => &SUPPLIER_SCHEMA,
            Family::Part => &PART_SCHEMA,
            Family::Envelope => &ENVELOPE_SCHEMA,
        }
    }

    /// Family name as carried in transaction headers.
    pub fn name(self) -> &'static str {
        self.schema().name
    }

    /// Look a family up by its header name.
    pub fn from_name(name: &str) -> Option<Family> {
        Family::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
