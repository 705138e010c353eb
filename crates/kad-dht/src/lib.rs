//! # Kademlia DHT
//!
//! An in-process Kademlia-style distributed hash table: 160-bit identifiers
//! derived by hashing, XOR distance, bounded k-bucket routing tables, and
//! content-addressed storage replicated to the peers closest to each key.
//!
//! ## Architecture
//!
//! - **Domain Layer:** identifiers, XOR distance, k-buckets, routing table,
//!   value store
//! - **Ports Layer:** `PeerHandle` and `ClosestPeerResolver`, the seams
//!   between a peer and the rest of the network
//! - **Service Layer:** `Peer` and the in-memory `Network` directory
//! - **Adapters Layer:** config providers and the simulation driver
//!
//! ## Feature Flags
//!
//! - `config` - `TomlConfigProvider` (serde, toml)
//! - `test-utils` - fixtures for tests in other crates
//!
//! ## Example
//!
//! ```rust
//! use kad_dht::{Network, NodeId, StoreOutcome};
//!
//! let network = Network::new();
//! let peers: Vec<_> = (0..5).map(|i| network.spawn_peer(format!("{i:x}"))).collect();
//! for peer in &peers {
//!     network.join(peer.clone());
//! }
//!
//! let value = b"content-addressed";
//! let key = NodeId::from_name(value);
//!
//! let outcome = peers[0].set_value(key.as_bytes(), value, &network).unwrap();
//! assert_eq!(outcome, StoreOutcome::Stored { replicas: 2 });
//! assert_eq!(peers[3].get_value(key.as_bytes(), &network), Some(value.to_vec()));
//!
//! // A key that is not the value's hash is refused
//! assert!(peers[0].set_value(key.as_bytes(), b"forged", &network).is_err());
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Test fixtures (named peers, seeded networks, stub resolvers).
/// Requires feature: `test-utils`
#[cfg(feature = "test-utils")]
pub mod test_utils;

// =============================================================================
// RE-EXPORTS
// =============================================================================

// Domain entities
pub use domain::{
    ConfigError, DhtConfig, DhtError, Distance, EvictionPolicy, InsertOutcome, KBucket, NodeId,
    RoutingTable, RoutingTableStats, StoreOutcome, ValueStore, ID_BITS, ID_BYTES,
};

// Domain services
pub use domain::{
    calculate_bucket_index, find_k_closest, select_closest, sort_by_distance,
    verify_content_address, xor_distance, ContentHasher, Sha1Hasher, Sha256Truncated,
};

// Port traits
pub use ports::{ClosestPeerResolver, ConfigProvider, PeerHandle};

// Service
pub use service::{Network, Peer};

// Adapters
pub use adapters::{LookupRecord, Simulation, SimulationConfig, SimulationReport, StaticConfigProvider};

#[cfg(feature = "config")]
pub use adapters::TomlConfigProvider;
