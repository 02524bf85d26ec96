//! The four family handlers.

use crate::config::ProcessorConfig;
use crate::handler::FamilyHandler;
use shared_types::Family;

pub fn category_handler(config: &ProcessorConfig) -> FamilyHandler {
    FamilyHandler::new(Family::Category, config.dedup_policy)
}

pub fn supplier_handler(config: &ProcessorConfig) -> FamilyHandler {
    FamilyHandler::new(Family::Supplier, config.dedup_policy)
}

pub fn part_handler(config: &ProcessorConfig) -> FamilyHandler {
    FamilyHandler::new(Family::Part, config.dedup_policy)
}

pub fn envelope_handler(config: &ProcessorConfig) -> FamilyHandler {
    FamilyHandler::new(Family::Envelope, config.dedup_policy)
}

/// One handler per family, in registration order.
pub fn all_handlers(config: &ProcessorConfig) -> Vec<FamilyHandler> {
    Family::ALL
        .into_iter()
        .map(|family| FamilyHandler::new(family, config.dedup_policy))
        .collect()
}
