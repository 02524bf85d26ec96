//! # Sparts Ledger Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── flows.rs        # builder → processor, per-family scenarios
//! │   └── submission.rs   # builder → REST client against a mock API
//! └── benches/
//!     └── family_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sp-tests
//! cargo test -p sp-tests integration::flows
//! cargo bench -p sp-tests
//! ```

pub mod integration;
