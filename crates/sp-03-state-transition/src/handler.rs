//! # Family Handler
//!
//! One handler implementation serves all four families; the family's
//! [`FamilySchema`] decides field layout, relation verbs and query verbs.
//!
//! ## Apply Flow
//!
//! ```text
//! Transaction
//!   │ decode header ── family/version/payload hash checks
//!   │ decode payload ── MalformedPayload on arity/UTF-8
//!   │ validate id + action ── inputs == outputs == [address]
//!   ▼
//! query verb? ──yes──→ NoOp (nothing read, nothing written)
//!   │
//!   ▼ read address (0 or 1 entries)
//! create ──────────→ exists? InvalidTransaction : write fresh record
//! Add<Relation> ───→ absent? InvalidTransaction : dedup, append, write
//! ```

use crate::domain::dedup::DedupPolicy;
use crate::domain::errors::ApplyError;
use crate::domain::outcome::ApplyOutcome;
use crate::ports::inbound::TransactionHandler;
use crate::ports::state::StateStore;
use shared_crypto::sha512_hex;
use shared_types::display::log_banner;
use shared_types::{
    encode_state_value, AddressDeriver, EntityRecord, Family, FamilySchema, Payload,
    StateAddress, StateEntry, StoredEntity, Transaction, TransactionHeader, CREATE_ACTION,
    PAYLOAD_ENCODING,
};
use tracing::debug;

/// Deterministic state-transition handler for one family.
#[derive(Debug, Clone)]
pub struct FamilyHandler {
    family: Family,
    deriver: AddressDeriver,
    dedup: DedupPolicy,
}

impl FamilyHandler {
    pub fn new(family: Family, dedup: DedupPolicy) -> Self {
        Self {
            family,
            deriver: AddressDeriver::for_family(family),
            dedup,
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn schema(&self) -> &'static FamilySchema {
        self.family.schema()
    }

    pub fn dedup_policy(&self) -> DedupPolicy {
        self.dedup
    }

    /// Apply a decoded payload with no header checks.
    ///
    /// Used directly by tooling replaying raw payloads.
    pub fn apply_payload(
        &self,
        payload: &Payload,
        state: &dyn StateStore,
    ) -> Result<ApplyOutcome, ApplyError> {
        self.validate(payload)?;
        self.apply_validated(payload, state)
    }

    /// State transition for a payload that already passed [`Self::validate`].
    fn apply_validated(
        &self,
        payload: &Payload,
        state: &dyn StateStore,
    ) -> Result<ApplyOutcome, ApplyError> {
        let schema = self.schema();
        let entity_id = payload.entity_id();
        let action = payload.action();

        if schema.is_passive(action) {
            debug!(family = schema.name, entity_id, action, "Query action, state untouched");
            return Ok(ApplyOutcome::NoOp);
        }

        let address = self.deriver.address(entity_id);
        let stored = self.load(&address, entity_id, state)?;

        if action == CREATE_ACTION {
            if stored.is_some() {
                return Err(ApplyError::invalid(format!(
                    "Invalid Action-{} already exists.",
                    schema.name
                )));
            }
            self.store(&address, entity_id, &EntityRecord::create(payload), state)?;
            log_banner(&format!("Created a {}.", schema.name));
            return Ok(ApplyOutcome::Created);
        }

        let relation = schema
            .relation_for(action)
            .ok_or_else(|| ApplyError::invalid(format!("Invalid Action '{action}'")))?;
        let target = payload.get(relation.target_field).unwrap_or_default();
        let mut stored = stored.ok_or_else(|| {
            ApplyError::invalid(format!(
                "Invalid Action-{} {} does not exist.",
                schema.name, entity_id
            ))
        })?;

        // An empty target is a substring of any stored record, so legacy
        // dedup accepts it as already related.
        if self.dedup.is_related(&stored, relation, target) {
            debug!(
                family = schema.name,
                entity_id,
                list = relation.list,
                target,
                "Relation already present"
            );
            return Ok(ApplyOutcome::AlreadyRelated {
                list: relation.list,
                id: target.to_string(),
            });
        }
        if target.is_empty() {
            return Err(ApplyError::invalid(format!(
                "{} requires {}",
                relation.action, relation.target_field
            )));
        }

        stored
            .record
            .append_relation(relation, target)
            .map_err(|e| ApplyError::internal(e.to_string()))?;
        self.store(&address, entity_id, &stored.record, state)?;
        log_banner(&format!("{} added to {}.", relation.key, schema.name));

        Ok(ApplyOutcome::RelationAdded {
            list: relation.list,
            id: target.to_string(),
        })
    }

    fn validate(&self, payload: &Payload) -> Result<(), ApplyError> {
        let schema = self.schema();
        if payload.family() != self.family {
            return Err(ApplyError::invalid(format!(
                "Payload for family {} sent to {} handler",
                payload.family(),
                schema.name
            )));
        }
        if payload.entity_id().is_empty() {
            return Err(ApplyError::invalid(format!("{} Data is required", schema.name)));
        }
        let action = payload.action();
        if action.is_empty() {
            return Err(ApplyError::invalid("Action is required"));
        }
        if !schema.knows_action(action) {
            return Err(ApplyError::invalid(format!("Invalid Action '{action}'")));
        }
        Ok(())
    }

    fn validate_header(
        &self,
        header: &TransactionHeader,
        payload: &[u8],
    ) -> Result<(), ApplyError> {
        let schema = self.schema();
        if header.family_name != schema.name {
            return Err(ApplyError::invalid(format!(
                "Family {} not handled by {}",
                header.family_name, schema.name
            )));
        }
        if header.family_version != schema.version {
            return Err(ApplyError::invalid(format!(
                "Unsupported {} version {}",
                schema.name, header.family_version
            )));
        }
        if header.payload_sha512 != sha512_hex(payload) {
            return Err(ApplyError::invalid("Payload hash does not match header"));
        }
        Ok(())
    }

    /// Read the single entry at `address` and check it belongs to `entity_id`.
    fn load(
        &self,
        address: &StateAddress,
        entity_id: &str,
        state: &dyn StateStore,
    ) -> Result<Option<StoredEntity>, ApplyError> {
        let entry = state
            .get_state(std::slice::from_ref(address))?
            .into_iter()
            .find(|entry| &entry.address == address);

        let Some(entry) = entry.filter(|entry| !entry.data.is_empty()) else {
            return Ok(None);
        };

        let stored = StoredEntity::decode(&entry.data)
            .map_err(|e| ApplyError::internal(format!("Failed to deserialize data: {e}")))?;
        if stored.entity_id != entity_id {
            return Err(ApplyError::internal(format!(
                "Stored id {} does not match {} at {}",
                stored.entity_id, entity_id, address
            )));
        }
        Ok(Some(stored))
    }

    fn store(
        &self,
        address: &StateAddress,
        entity_id: &str,
        record: &EntityRecord,
        state: &dyn StateStore,
    ) -> Result<(), ApplyError> {
        let value = encode_state_value(entity_id, record)
            .map_err(|e| ApplyError::internal(e.to_string()))?;
        let written = state.set_state(vec![StateEntry::new(address.clone(), value)])?;
        if !written.contains(address) {
            return Err(ApplyError::internal("State Error"));
        }
        Ok(())
    }
}

impl TransactionHandler for FamilyHandler {
    fn family_name(&self) -> &str {
        self.schema().name
    }

    fn family_versions(&self) -> Vec<String> {
        vec![self.schema().version.to_string()]
    }

    fn encodings(&self) -> Vec<String> {
        vec![PAYLOAD_ENCODING.to_string()]
    }

    fn namespaces(&self) -> Vec<String> {
        vec![self.deriver.prefix().to_string()]
    }

    fn apply(
        &self,
        transaction: &Transaction,
        state: &dyn StateStore,
    ) -> Result<ApplyOutcome, ApplyError> {
        let header = transaction
            .decode_header()
            .map_err(|e| ApplyError::invalid(format!("Invalid transaction header: {e}")))?;
        self.validate_header(&header, &transaction.payload)?;

        let payload = Payload::decode(self.family, &transaction.payload)?;
        self.validate(&payload)?;

        let address = self.deriver.address(payload.entity_id());
        let own = std::slice::from_ref(&address);
        if header.inputs != own || header.outputs != own {
            return Err(ApplyError::invalid(format!(
                "Transaction must read and write only {address}"
            )));
        }

        self.apply_validated(&payload, state)
    }
}
