use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{select_closest, xor_distance, ContentHasher, DhtConfig, DhtError, NodeId, Sha1Hasher};
use crate::ports::{ClosestPeerResolver, ConfigProvider, PeerHandle};

use super::peer::Peer;

/// Directory of every live peer, keyed by hex identifier.
///
/// Closest-peer resolution scans the whole directory. A `Network` is an
/// ordinary value: create as many independent ones as needed.
///
/// # Locking
///
/// `add_peer` takes the write lock. Resolution and broadcasts copy the peer
/// list under the read lock and release it before calling into any peer.
pub struct Network {
    directory: RwLock<HashMap<String, Arc<Peer>>>,
    config: DhtConfig,
    hasher: Arc<dyn ContentHasher>,
}

impl Network {
    /// Empty network with the default config and SHA-1 identifiers.
    pub fn new() -> Self {
        Self {
            directory: RwLock::new(HashMap::new()),
            config: DhtConfig::default(),
            hasher: Arc::new(Sha1Hasher),
        }
    }

    /// Empty network whose spawned peers use `config` and `hasher`.
    ///
    /// # Errors
    ///
    /// `DhtError::InvalidConfig` if `config` does not validate.
    pub fn with_config(config: DhtConfig, hasher: Arc<dyn ContentHasher>) -> Result<Self, DhtError> {
        config.validate()?;
        Ok(Self {
            directory: RwLock::new(HashMap::new()),
            config,
            hasher,
        })
    }

    /// Empty network configured from a provider, with SHA-1 identifiers.
    pub fn from_provider(provider: &dyn ConfigProvider) -> Result<Self, DhtError> {
        Self::with_config(provider.dht_config(), Arc::new(Sha1Hasher))
    }

    pub fn config(&self) -> &DhtConfig {
        &self.config
    }

    pub fn hasher(&self) -> &dyn ContentHasher {
        self.hasher.as_ref()
    }

    /// Build a peer with this network's config and hasher. Not registered.
    pub fn spawn_peer(&self, name: impl Into<String>) -> Arc<Peer> {
        Arc::new(Peer::new(name, self.config.clone(), Arc::clone(&self.hasher)))
    }

    // =========================================================================
    // Directory
    // =========================================================================

    /// Register a peer. A peer with the same identifier is replaced and
    /// returned.
    pub fn add_peer(&self, peer: Arc<Peer>) -> Option<Arc<Peer>> {
        let id = peer.id();
        let replaced = self.directory.write().insert(id.to_hex(), peer);
        debug!(peer = %id, replaced = replaced.is_some(), "peer registered");
        replaced
    }

    /// Register a peer, then announce its identifier to every peer
    /// (including itself).
    pub fn join(&self, peer: Arc<Peer>) -> Option<Arc<Peer>> {
        let id = peer.id();
        let replaced = self.add_peer(peer);
        self.broadcast_identity(id);
        replaced
    }

    pub fn get_peer(&self, id: &NodeId) -> Option<Arc<Peer>> {
        self.directory.read().get(&id.to_hex()).cloned()
    }

    /// Snapshot of every registered peer, in no particular order.
    pub fn peers(&self) -> Vec<Arc<Peer>> {
        self.directory.read().values().cloned().collect()
    }

    pub fn peer_ids(&self) -> Vec<NodeId> {
        self.directory.read().values().map(|p| p.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.directory.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.directory.read().is_empty()
    }

    // =========================================================================
    // Resolution & broadcast
    // =========================================================================

    /// Registered peers closest to `target`, closest first.
    ///
    /// Returns every peer whose distance is no greater than the `count`-th
    /// smallest, so a tie at the boundary yields more than `count`. An empty
    /// directory or `count == 0` yields nothing.
    pub fn find_closest_peers(&self, target: &NodeId, count: usize) -> Vec<Arc<Peer>> {
        let candidates = self.peers();
        let total = candidates.len();
        let closest = select_closest(candidates, target, count, |p| p.id());

        debug!(
            %target,
            count,
            scanned = total,
            returned = closest.len(),
            nearest = ?closest.first().map(|p| xor_distance(&p.id(), target)),
            "closest peers resolved"
        );
        closest
    }

    /// Every registered peer observes `id`.
    pub fn broadcast_identity(&self, id: NodeId) {
        let peers = self.peers();
        for peer in &peers {
            peer.observe(id);
        }
        debug!(announced = %id, reached = peers.len(), "identity broadcast");
    }

    /// Broadcast the identifier derived from `name` with this network's hasher.
    pub fn broadcast_name(&self, name: impl AsRef<[u8]>) -> NodeId {
        let id = self.hasher.digest(name.as_ref());
        self.broadcast_identity(id);
        id
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("peers", &self.len())
            .field("config", &self.config)
            .field("hasher", &self.hasher.name())
            .finish()
    }
}

impl ClosestPeerResolver for Network {
    fn find_closest_peers(&self, target: &NodeId, count: usize) -> Vec<Arc<dyn PeerHandle>> {
        Network::find_closest_peers(self, target, count)
            .into_iter()
            .map(|peer| peer as Arc<dyn PeerHandle>)
            .collect()
    }
}
