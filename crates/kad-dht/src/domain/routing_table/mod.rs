//! Routing Table Implementation
//!
//! One routing table per peer: an array of k-buckets indexed by the bit
//! length of the XOR distance from the owner.

// Semantic submodules
mod bucket;
mod config;
mod stats;
mod table;

// Re-export public API
pub use bucket::{InsertOutcome, KBucket};
pub use config::{DEFAULT_K, NUM_BUCKETS};
pub use stats::RoutingTableStats;
pub use table::RoutingTable;
