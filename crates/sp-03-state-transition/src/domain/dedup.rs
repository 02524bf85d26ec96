//! Relation deduplication.

use serde::{Deserialize, Serialize};
use shared_types::{RelationSpec, StoredEntity};
use std::fmt;
use std::str::FromStr;

/// How a relation-adding action decides the target is already related.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupPolicy {
    /// Exact id match within the decoded relation list.
    #[default]
    Membership,

    /// Substring match over the serialized stored record.
    ///
    /// Reproduces how existing chain state was written: an id that is a
    /// substring of anything already stored (`p1` inside `p10`, or inside a
    /// scalar field) is treated as present and not appended.
    LegacySubstring,
}

impl DedupPolicy {
    pub fn is_related(self, stored: &StoredEntity, relation: &RelationSpec, id: &str) -> bool {
        match self {
            Self::Membership => stored.record.has_relation(relation, id),
            Self::LegacySubstring => stored.json.contains(id),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Membership => "membership",
            Self::LegacySubstring => "legacy-substring",
        }
    }
}

impl fmt::Display for DedupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DedupPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "membership" => Ok(Self::Membership),
            "legacy-substring" => Ok(Self::LegacySubstring),
            other => Err(format!(
                "unknown dedup policy `{other}` (expected `membership` or `legacy-substring`)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::SUPPLIER_SCHEMA;

    fn supplier_with_part(part_id: &str) -> StoredEntity {
        let json = format!(r#"{{"supplier_id":"s1","parts":[{{"part_id":"{part_id}"}}]}}"#);
        StoredEntity::decode(format!("s1,{json}").as_bytes()).unwrap()
    }

    #[test]
    fn test_membership_is_exact() {
        let stored = supplier_with_part("p10");
        let relation = SUPPLIER_SCHEMA.relation_for("AddPart").unwrap();

        assert!(DedupPolicy::Membership.is_related(&stored, relation, "p10"));
        assert!(!DedupPolicy::Membership.is_related(&stored, relation, "p1"));
    }

    #[test]
    fn test_legacy_substring_misses_prefix_ids() {
        let stored = supplier_with_part("p10");
        let relation = SUPPLIER_SCHEMA.relation_for("AddPart").unwrap();

        assert!(DedupPolicy::LegacySubstring.is_related(&stored, relation, "p1"));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("membership".parse::<DedupPolicy>(), Ok(DedupPolicy::Membership));
        assert_eq!("legacy-substring".parse::<DedupPolicy>(), Ok(DedupPolicy::LegacySubstring));
        assert!("substring".parse::<DedupPolicy>().is_err());
        assert_eq!(DedupPolicy::LegacySubstring.to_string(), "legacy-substring");
    }
}
