//! # Kad-DHT Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks (run from benches/)
//! └── integration/      # End-to-end flows over a whole Network
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p kad-tests
//!
//! # Integration flows only
//! cargo test -p kad-tests integration::
//!
//! # Benchmarks
//! cargo bench -p kad-tests
//! ```

pub mod benchmarks;
pub mod integration;
