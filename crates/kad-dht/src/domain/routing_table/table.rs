//! Main RoutingTable implementation.

use std::collections::HashSet;

use tracing::trace;

use crate::domain::{calculate_bucket_index, find_k_closest, DhtConfig, NodeId};

use super::bucket::{InsertOutcome, KBucket};
use super::stats::RoutingTableStats;

/// The routing table owned by one peer
///
/// Holds `config.table_size` buckets. An identifier at XOR distance `d`
/// from the owner lives in bucket `max(0, bit_len(d) - 1)`, so it can only
/// ever be found in that one bucket.
///
/// The owner's own identifier is admitted like any other (distance 0 maps
/// to bucket 0); broadcasts deliver a peer's own id back to it.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    /// Our own node ID (immutable after creation)
    local_node_id: NodeId,
    /// One bucket per distance class
    buckets: Vec<KBucket>,
    /// Configuration including k and table size
    config: DhtConfig,
}

impl RoutingTable {
    /// Create a new routing table with every bucket empty
    pub fn new(local_node_id: NodeId, config: DhtConfig) -> Self {
        let buckets = (0..config.table_size)
            .map(|_| KBucket::new(config.k, config.eviction))
            .collect();

        Self {
            local_node_id,
            buckets,
            config,
        }
    }

    /// Get our local node ID
    pub fn local_node_id(&self) -> &NodeId {
        &self.local_node_id
    }

    /// Get the configuration
    pub fn config(&self) -> &DhtConfig {
        &self.config
    }

    /// Bucket index a peer would occupy in this table
    pub fn bucket_index_for(&self, node_id: &NodeId) -> usize {
        calculate_bucket_index(&self.local_node_id, node_id, self.buckets.len())
    }

    /// Insert a peer into the bucket matching its distance class.
    pub fn insert(&mut self, node_id: NodeId) -> InsertOutcome {
        let bucket_idx = self.bucket_index_for(&node_id);
        let Some(bucket) = self.buckets.get_mut(bucket_idx) else {
            return InsertOutcome::Rejected;
        };

        let outcome = bucket.insert(node_id);
        trace!(
            owner = %self.local_node_id,
            peer = %node_id,
            bucket = bucket_idx,
            ?outcome,
            "routing table insert"
        );
        outcome
    }

    /// Check if the table knows a peer (looks in its one candidate bucket)
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.buckets
            .get(self.bucket_index_for(node_id))
            .is_some_and(|b| b.contains(node_id))
    }

    /// Union of all bucket contents
    pub fn all_known_peers(&self) -> HashSet<NodeId> {
        self.buckets
            .iter()
            .flat_map(|b| b.peers().iter().copied())
            .collect()
    }

    /// Get total peer count across all buckets
    pub fn total_peer_count(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).sum()
    }

    /// Find the `count` known peers closest to a target (strict, no ties)
    pub fn find_closest_peers(&self, target: &NodeId, count: usize) -> Vec<NodeId> {
        let known: Vec<NodeId> = self
            .buckets
            .iter()
            .flat_map(|b| b.peers().iter().copied())
            .collect();
        find_k_closest(&known, target, count)
    }

    /// Get routing table statistics
    pub fn stats(&self) -> RoutingTableStats {
        RoutingTableStats {
            total_peers: self.total_peer_count(),
            buckets_used: self.buckets.iter().filter(|b| !b.is_empty()).count(),
            buckets_full: self.buckets.iter().filter(|b| b.is_full()).count(),
            bucket_count: self.buckets.len(),
            capacity: self.buckets.len() * self.config.k,
        }
    }

    /// Get a reference to a bucket by index
    pub fn get_bucket(&self, index: usize) -> Option<&KBucket> {
        self.buckets.get(index)
    }

    /// Non-empty buckets with their index, lowest distance class first
    pub fn occupied_buckets(&self) -> impl Iterator<Item = (usize, &KBucket)> {
        self.buckets.iter().enumerate().filter(|(_, b)| !b.is_empty())
    }
}
