//! Domain Layer - Pure business logic with no I/O
//!
//! This module contains the core Kademlia logic:
//! - 160-bit identifiers, content hashing and XOR distance
//! - Routing table with bounded k-buckets
//! - Content-addressed value store

pub mod routing_table;
pub mod services;
pub mod store;
/// Core domain types (entities, values, errors)
pub mod types;

pub use routing_table::*;
pub use services::*;
pub use store::ValueStore;
pub use types::*;
