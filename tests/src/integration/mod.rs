pub mod flows;
pub mod submission;
