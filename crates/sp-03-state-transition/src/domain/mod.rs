pub mod dedup;
pub mod errors;
pub mod outcome;
