//! Ports layer for batch construction.

pub mod inbound;
