//! # Driven Ports (Outbound SPI)

use std::sync::Arc;

use crate::domain::{DhtConfig, NodeId};
use crate::ports::PeerHandle;

/// Picks the peers responsible for an identifier.
///
/// `Network` implements this with a scan of its global directory. A
/// Kademlia FIND_NODE walk over routing tables would be another
/// implementation.
pub trait ClosestPeerResolver: Send + Sync {
    /// Up to `count` peers closest to `target` by XOR distance, closest
    /// first. May return more than `count` when peers tie at the boundary
    /// distance, and fewer when fewer peers exist. Never fails; an empty
    /// directory yields an empty list.
    fn find_closest_peers(&self, target: &NodeId, count: usize) -> Vec<Arc<dyn PeerHandle>>;
}

/// Abstract interface for configuration loading.
pub trait ConfigProvider: Send + Sync {
    /// Get DHT configuration parameters.
    fn dht_config(&self) -> DhtConfig;
}
