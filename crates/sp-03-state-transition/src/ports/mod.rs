pub mod inbound;
pub mod state;
