//! K-Bucket implementation for Kademlia routing.

use crate::domain::{EvictionPolicy, NodeId};

/// What a call to [`KBucket::insert`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Appended below capacity
    Inserted,
    /// Already present, bucket unchanged
    AlreadyPresent,
    /// Already present and moved to the tail (least-recently-seen policy)
    Refreshed,
    /// Bucket was full; the returned id was dropped from the head
    Evicted(NodeId),
    /// Zero-capacity bucket, nothing admitted
    Rejected,
}

/// A k-bucket storing up to k peer identifiers at one distance class.
///
/// The bucket is a bounded ordered sequence: index 0 is the head (oldest
/// entry), new entries go to the tail. Under the default
/// [`EvictionPolicy::OldestInserted`] a full bucket drops its head to admit
/// a newcomer. That deviates from canonical Kademlia, which pings the head
/// and only evicts it when it fails to answer; no liveness probes exist in
/// this in-process model.
#[derive(Debug, Clone)]
pub struct KBucket {
    /// Identifiers in insertion (or recency) order, never more than `k`
    pub(crate) peers: Vec<NodeId>,
    /// Capacity
    k: usize,
    policy: EvictionPolicy,
}

impl KBucket {
    /// Create a new empty k-bucket
    pub fn new(k: usize, policy: EvictionPolicy) -> Self {
        Self {
            peers: Vec::with_capacity(k),
            k,
            policy,
        }
    }

    /// Get the number of peers in this bucket
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// Check if the bucket is empty
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    /// Check if the bucket is full
    pub fn is_full(&self) -> bool {
        self.peers.len() >= self.k
    }

    pub fn capacity(&self) -> usize {
        self.k
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Get the entry that would be evicted next
    pub fn oldest_peer(&self) -> Option<&NodeId> {
        self.peers.first()
    }

    /// Get all peers in this bucket, head first
    pub fn peers(&self) -> &[NodeId] {
        &self.peers
    }

    /// Check if bucket contains a peer
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.peers.iter().any(|p| p == node_id)
    }

    /// Insert a peer identifier.
    ///
    /// Known ids are never duplicated. Below capacity the id is appended;
    /// at capacity the head is evicted first.
    pub fn insert(&mut self, node_id: NodeId) -> InsertOutcome {
        if let Some(pos) = self.peers.iter().position(|p| *p == node_id) {
            return match self.policy {
                EvictionPolicy::OldestInserted => InsertOutcome::AlreadyPresent,
                EvictionPolicy::LeastRecentlySeen => {
                    let seen = self.peers.remove(pos);
                    self.peers.push(seen);
                    InsertOutcome::Refreshed
                }
            };
        }

        if !self.is_full() {
            self.peers.push(node_id);
            return InsertOutcome::Inserted;
        }

        if self.peers.is_empty() {
            return InsertOutcome::Rejected;
        }
        let evicted = self.peers.remove(0);
        self.peers.push(node_id);
        InsertOutcome::Evicted(evicted)
    }
}
