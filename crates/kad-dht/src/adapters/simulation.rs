//! # Simulation Driver
//!
//! Populates a `Network`, stores random content-addressed values from random
//! peers, then looks random keys up from random peers. Every lookup is
//! reported as a `tracing` event with the key and the value (or its absence).

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::domain::NodeId;
use crate::service::{Network, Peer};

/// Parameters for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Peers to create and join (default: 100)
    pub peer_count: usize,
    /// Random values to store (default: 200)
    pub value_count: usize,
    /// Random lookups to perform (default: 100)
    pub lookup_count: usize,
    /// Random bytes per value, hex-encoded before storing (default: 50)
    pub value_bytes: usize,
    /// RNG seed
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            peer_count: 100,
            value_count: 200,
            lookup_count: 100,
            value_bytes: 50,
            seed: 0,
        }
    }
}

/// Outcome of one `get_value` issued by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRecord {
    pub key: NodeId,
    /// Peer the lookup was issued from
    pub from: NodeId,
    pub value: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub records: Vec<LookupRecord>,
    /// Values accepted by `set_value`
    pub stored: usize,
    pub hits: usize,
    pub misses: usize,
}

impl SimulationReport {
    /// Fraction of lookups that found a value (1.0 when none were made).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 1.0;
        }
        self.hits as f64 / total as f64
    }
}

/// Seeded driver over one `Network`.
///
/// Peers are kept in join order so random picks are reproducible for a
/// given seed.
pub struct Simulation {
    network: Network,
    peers: Vec<Arc<Peer>>,
    keys: Vec<NodeId>,
    rng: StdRng,
}

impl Simulation {
    pub fn new(network: Network, seed: u64) -> Self {
        Self {
            network,
            peers: Vec::new(),
            keys: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Driver over a fresh default `Network`.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Network::new(), seed)
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Peers created by this driver, in join order.
    pub fn peers(&self) -> &[Arc<Peer>] {
        &self.peers
    }

    /// Keys stored so far, in store order.
    pub fn keys(&self) -> &[NodeId] {
        &self.keys
    }

    /// Create `count` peers named by hex index (continuing from earlier
    /// calls) and join each to the network.
    pub fn populate(&mut self, count: usize) {
        let start = self.peers.len();
        for i in start..start + count {
            let peer = self.network.spawn_peer(format!("{i:x}"));
            self.network.join(Arc::clone(&peer));
            self.peers.push(peer);
        }
        debug!(added = count, total = self.peers.len(), "network populated");
    }

    /// Store `count` random values, each from a randomly chosen peer.
    ///
    /// A value is `value_bytes` random bytes rendered as lowercase hex; its
    /// key is the hash of that string. Returns how many were accepted.
    pub fn store_random(&mut self, count: usize, value_bytes: usize) -> usize {
        let mut stored = 0;
        for _ in 0..count {
            let Some(peer) = self.random_peer() else {
                warn!("no peers to store from");
                break;
            };

            let mut raw = vec![0u8; value_bytes];
            self.rng.fill(&mut raw[..]);
            let value = hex::encode(raw).into_bytes();
            let key = peer.hasher().digest(&value);

            match peer.set_value(key.as_bytes(), &value, &self.network) {
                Ok(outcome) => {
                    debug!(from = %peer.id(), %key, ?outcome, "random value stored");
                    self.keys.push(key);
                    stored += 1;
                }
                Err(e) => warn!(from = %peer.id(), %key, error = %e, "random value rejected"),
            }
        }
        stored
    }

    /// Look up `count` previously stored keys, chosen at random with
    /// replacement, each from a randomly chosen peer.
    pub fn lookup_random(&mut self, count: usize) -> Vec<LookupRecord> {
        if self.keys.is_empty() {
            return Vec::new();
        }

        let mut records = Vec::with_capacity(count);
        for _ in 0..count {
            let key = self.keys[self.rng.gen_range(0..self.keys.len())];
            let Some(peer) = self.random_peer() else {
                break;
            };

            let value = peer.get_value(key.as_bytes(), &self.network);
            match &value {
                Some(v) => info!(%key, value = %String::from_utf8_lossy(v), "GetValue"),
                None => info!(%key, value = "nil", "GetValue"),
            }
            records.push(LookupRecord {
                key,
                from: peer.id(),
                value,
            });
        }
        records
    }

    /// Populate, store and look up as described by `config`.
    pub fn run(&mut self, config: &SimulationConfig) -> SimulationReport {
        self.populate(config.peer_count);
        let stored = self.store_random(config.value_count, config.value_bytes);
        let records = self.lookup_random(config.lookup_count);

        let hits = records.iter().filter(|r| r.value.is_some()).count();
        let report = SimulationReport {
            misses: records.len() - hits,
            hits,
            stored,
            records,
        };
        info!(
            peers = self.peers.len(),
            stored = report.stored,
            hits = report.hits,
            misses = report.misses,
            "simulation finished"
        );
        report
    }

    /// Emit every peer's occupied buckets at debug level.
    pub fn log_routing_tables(&self) {
        for peer in &self.peers {
            let table = peer.routing_table_snapshot();
            for (index, bucket) in table.occupied_buckets() {
                let ids: Vec<String> = bucket.peers().iter().map(NodeId::to_hex).collect();
                debug!(peer = %peer.id(), bucket = index, ids = ?ids, "bucket contents");
            }
        }
    }

    fn random_peer(&mut self) -> Option<Arc<Peer>> {
        if self.peers.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.peers.len());
        Some(Arc::clone(&self.peers[index]))
    }
}
