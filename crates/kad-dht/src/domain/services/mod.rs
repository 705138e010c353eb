//! Domain Services - Pure functions for Kademlia operations
//!
//! All functions in this module are pure (no I/O, no state mutation)
//! and deterministic (same inputs → same outputs).

// Semantic submodules
mod distance;
mod hashing;
mod sorting;

// Re-export public API
pub use distance::{bucket_index, calculate_bucket_index, xor_distance};
pub use hashing::{verify_content_address, ContentHasher, Sha1Hasher, Sha256Truncated};
pub use sorting::{find_k_closest, select_closest, sort_by_distance};
