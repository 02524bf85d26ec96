//! Processor configuration.

use crate::domain::dedup::DedupPolicy;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

pub const ENV_DEDUP_POLICY: &str = "SPARTS_DEDUP_POLICY";

/// Configuration shared by every family handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Relation dedup policy.
    pub dedup_policy: DedupPolicy,
}

impl ProcessorConfig {
    /// Defaults overridden by `SPARTS_DEDUP_POLICY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_DEDUP_POLICY) {
            match value.parse() {
                Ok(policy) => config.dedup_policy = policy,
                Err(reason) => warn!(%reason, "Ignoring {}", ENV_DEDUP_POLICY),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_membership() {
        assert_eq!(ProcessorConfig::default().dedup_policy, DedupPolicy::Membership);
    }

    #[test]
    fn test_lookup_override() {
        let config = ProcessorConfig::from_lookup(|key| {
            (key == ENV_DEDUP_POLICY).then(|| "legacy-substring".to_string())
        });
        assert_eq!(config.dedup_policy, DedupPolicy::LegacySubstring);

        let config =
            ProcessorConfig::from_lookup(|_| Some("nonsense".to_string()));
        assert_eq!(config.dedup_policy, DedupPolicy::Membership);
    }

    #[test]
    fn test_deserialize() {
        let config: ProcessorConfig =
            serde_json::from_str(r#"{"dedup_policy": "legacy-substring"}"#).unwrap();
        assert_eq!(config.dedup_policy, DedupPolicy::LegacySubstring);

        let config: ProcessorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProcessorConfig::default());
    }
}
