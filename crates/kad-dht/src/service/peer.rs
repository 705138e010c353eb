use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace, warn};

use crate::domain::{
    verify_content_address, ContentHasher, DhtConfig, DhtError, InsertOutcome, NodeId,
    RoutingTable, RoutingTableStats, Sha1Hasher, StoreOutcome, ValueStore,
};
use crate::ports::{ClosestPeerResolver, PeerHandle};

/// A DHT participant: identity, routing table and local value store.
///
/// The routing table and the store sit behind their own locks, so one peer
/// can be driven from several threads. No lock is held while the peer talks
/// to the resolver or to other peers, which lets a peer appear among its own
/// replication targets.
///
/// # Example
///
/// ```rust
/// use kad_dht::{Network, NodeId, Peer};
/// use std::sync::Arc;
///
/// let network = Network::new();
/// let peers: Vec<_> = ["a", "b", "c"]
///     .into_iter()
///     .map(|name| Arc::new(Peer::from_name(name)))
///     .collect();
/// for peer in &peers {
///     network.join(Arc::clone(peer));
/// }
///
/// let value = b"hello";
/// let key = NodeId::from_name(value);
/// assert!(peers[0].set_value(key.as_bytes(), value, &network).is_ok());
/// assert_eq!(peers[2].get_value(key.as_bytes(), &network), Some(value.to_vec()));
/// ```
pub struct Peer {
    id: NodeId,
    name: String,
    config: DhtConfig,
    hasher: Arc<dyn ContentHasher>,
    routing_table: Mutex<RoutingTable>,
    store: RwLock<ValueStore>,
}

impl Peer {
    /// Create a peer whose identifier is `hasher(name)`.
    ///
    /// The routing table gets `config.table_size` empty buckets and the
    /// store starts empty.
    pub fn new(name: impl Into<String>, config: DhtConfig, hasher: Arc<dyn ContentHasher>) -> Self {
        let name = name.into();
        let id = hasher.digest(name.as_bytes());
        Self {
            id,
            routing_table: Mutex::new(RoutingTable::new(id, config.clone())),
            store: RwLock::new(ValueStore::new()),
            name,
            config,
            hasher,
        }
    }

    /// Create a peer with the default config and SHA-1 identifiers.
    pub fn from_name(name: impl Into<String>) -> Self {
        Self::new(name, DhtConfig::default(), Arc::new(Sha1Hasher))
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &DhtConfig {
        &self.config
    }

    pub fn hasher(&self) -> &dyn ContentHasher {
        self.hasher.as_ref()
    }

    // =========================================================================
    // Routing
    // =========================================================================

    /// Learn about a peer: insert it into the routing table.
    pub fn observe(&self, peer_id: NodeId) -> InsertOutcome {
        let outcome = self.routing_table.lock().insert(peer_id);
        if let InsertOutcome::Evicted(evicted) = outcome {
            trace!(peer = %self.id, observed = %peer_id, %evicted, "bucket full, evicted oldest");
        }
        outcome
    }

    /// Learn about a peer by name (hashes the name first).
    pub fn observe_name(&self, name: impl AsRef<[u8]>) -> InsertOutcome {
        self.observe(self.hasher.digest(name.as_ref()))
    }

    /// Whether the routing table currently holds `peer_id`.
    pub fn knows(&self, peer_id: &NodeId) -> bool {
        self.routing_table.lock().contains(peer_id)
    }

    /// Every identifier in the routing table.
    pub fn known_peers(&self) -> HashSet<NodeId> {
        self.routing_table.lock().all_known_peers()
    }

    pub fn routing_stats(&self) -> RoutingTableStats {
        self.routing_table.lock().stats()
    }

    /// Copy of the routing table for inspection.
    pub fn routing_table_snapshot(&self) -> RoutingTable {
        self.routing_table.lock().clone()
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// Store a value under its content address and replicate it.
    ///
    /// 1. `hash(value)` must equal `key`, otherwise nothing is touched.
    /// 2. A key already held locally is not replicated again.
    /// 3. The value is stored locally, then the closest `replication_factor`
    ///    peers to `key` each receive it without re-validation.
    ///
    /// Replication is best effort and not rolled back.
    pub fn set_value(
        &self,
        key: &[u8],
        value: &[u8],
        resolver: &dyn ClosestPeerResolver,
    ) -> Result<StoreOutcome, DhtError> {
        let inserted = self
            .store
            .write()
            .insert_verified(self.hasher.as_ref(), key, value)
            .inspect_err(|e| warn!(peer = %self.id, error = %e, "value rejected"))?;

        let Some(key_id) = inserted else {
            debug!(peer = %self.id, key = %hex::encode(key), "value already stored locally");
            return Ok(StoreOutcome::AlreadyStored);
        };

        let targets = resolver.find_closest_peers(&key_id, self.config.replication_factor);
        for target in &targets {
            target.store_replica(key_id, value.to_vec());
        }

        debug!(
            peer = %self.id,
            key = %key_id,
            replicas = targets.len(),
            "value stored"
        );
        Ok(StoreOutcome::Stored {
            replicas: targets.len(),
        })
    }

    /// Look a value up locally, then at the closest peers.
    ///
    /// Local values are trusted. Remote values must hash to `key`; a copy
    /// that does not is skipped. Only the peers the resolver names are
    /// asked (one hop).
    pub fn get_value(&self, key: &[u8], resolver: &dyn ClosestPeerResolver) -> Option<Vec<u8>> {
        let Ok(key_id) = NodeId::try_from(key) else {
            debug!(peer = %self.id, key_len = key.len(), "key has wrong width, cannot be stored");
            return None;
        };

        if let Some(value) = self.store.read().get(&key_id) {
            trace!(peer = %self.id, key = %key_id, "local hit");
            return Some(value.to_vec());
        }

        let candidates = resolver.find_closest_peers(&key_id, self.config.replication_factor);
        for candidate in &candidates {
            let Some(value) = candidate.fetch_replica(&key_id) else {
                continue;
            };
            if verify_content_address(self.hasher.as_ref(), key, &value).is_ok() {
                debug!(peer = %self.id, key = %key_id, from = %candidate.id(), "remote hit");
                return Some(value);
            }
            warn!(
                peer = %self.id,
                key = %key_id,
                from = %candidate.id(),
                "replica failed content check, skipped"
            );
        }

        debug!(peer = %self.id, key = %key_id, asked = candidates.len(), "value not found");
        None
    }

    /// Whether a value for `key` is held locally.
    pub fn holds(&self, key: &[u8]) -> bool {
        self.store.read().get_raw(key).is_some()
    }

    /// Locally held value for `key`, without consulting other peers.
    pub fn local_value(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.store.read().get_raw(key).map(<[u8]>::to_vec)
    }

    /// Number of values held locally.
    pub fn value_count(&self) -> usize {
        self.store.read().len()
    }
}

impl std::fmt::Debug for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Peer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("hasher", &self.hasher.name())
            .field("values", &self.value_count())
            .finish()
    }
}

impl PeerHandle for Peer {
    fn id(&self) -> NodeId {
        self.id
    }

    fn observe(&self, peer_id: NodeId) {
        Peer::observe(self, peer_id);
    }

    fn set_value(
        &self,
        key: &[u8],
        value: &[u8],
        resolver: &dyn ClosestPeerResolver,
    ) -> Result<StoreOutcome, DhtError> {
        Peer::set_value(self, key, value, resolver)
    }

    fn get_value(&self, key: &[u8], resolver: &dyn ClosestPeerResolver) -> Option<Vec<u8>> {
        Peer::get_value(self, key, resolver)
    }

    fn store_replica(&self, key: NodeId, value: Vec<u8>) {
        trace!(peer = %self.id, %key, "replica stored");
        self.store.write().insert_replica(key, value);
    }

    fn fetch_replica(&self, key: &NodeId) -> Option<Vec<u8>> {
        self.store.read().get(key).map(<[u8]>::to_vec)
    }
}
