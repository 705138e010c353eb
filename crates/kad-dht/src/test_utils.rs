//! Test utilities for the DHT.
//!
//! Fixtures for deterministic tests in this and other crates.
//! Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust
//! use kad_dht::test_utils::joined_network;
//!
//! let (network, peers) = joined_network(4);
//! assert_eq!(network.len(), 4);
//! assert!(peers.iter().all(|p| p.knows(&peers[0].id())));
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::{ContentHasher, NodeId, Sha1Hasher, ID_BYTES};
use crate::ports::{ClosestPeerResolver, PeerHandle};
use crate::service::{Network, Peer};

/// Identifier with the first byte set to `val`, rest zeroed.
pub fn make_node_id(val: u8) -> NodeId {
    let mut bytes = [0u8; ID_BYTES];
    bytes[0] = val;
    NodeId::new(bytes)
}

/// `(sha1(value), value)`: a key/value pair that passes the content check.
pub fn content_pair(value: impl AsRef<[u8]>) -> (NodeId, Vec<u8>) {
    let value = value.as_ref();
    (Sha1Hasher.digest(value), value.to_vec())
}

/// Default network with `count` peers named `0..count` in hex.
///
/// Every peer is registered first and then announced, so each routing table
/// has seen every identifier (`join` alone only teaches the newcomer's id to
/// peers already present).
pub fn joined_network(count: usize) -> (Network, Vec<Arc<Peer>>) {
    let network = Network::new();
    let peers: Vec<_> = (0..count)
        .map(|i| network.spawn_peer(format!("{i:x}")))
        .collect();
    for peer in &peers {
        network.add_peer(Arc::clone(peer));
    }
    for peer in &peers {
        network.broadcast_identity(peer.id());
    }
    (network, peers)
}

/// Resolver that answers every query with the same peers, ignoring the
/// target, and counts how often it was asked.
pub struct FixedResolver {
    peers: Vec<Arc<dyn PeerHandle>>,
    calls: AtomicUsize,
}

impl FixedResolver {
    pub fn new(peers: Vec<Arc<dyn PeerHandle>>) -> Self {
        Self {
            peers,
            calls: AtomicUsize::new(0),
        }
    }

    /// Resolver with no peers at all.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of `find_closest_peers` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ClosestPeerResolver for FixedResolver {
    fn find_closest_peers(&self, _target: &NodeId, count: usize) -> Vec<Arc<dyn PeerHandle>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.peers.iter().take(count).cloned().collect()
    }
}
