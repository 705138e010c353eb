//! # Integration Test Flows
//!
//! End-to-end scenarios over a whole `Network`:
//!
//! 1. **Reference run**: 100 peers, 200 random values, 100 random lookups
//! 2. **Mass join**: 205 peers announced by broadcast, buckets stay bounded
//! 3. **Config file → Network**: TOML config drives every spawned peer
//! 4. **Alternative resolver**: lookups through a peer's own routing table
//! 5. **Concurrent drivers**: parallel joins, stores and lookups

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::Write;
    use std::sync::Arc;
    use std::thread;

    use kad_dht::test_utils::{content_pair, joined_network};
    use kad_dht::{
        ClosestPeerResolver, ConfigProvider, DhtConfig, EvictionPolicy, Network, NodeId, Peer,
        PeerHandle, Simulation, SimulationConfig, StaticConfigProvider, StoreOutcome,
        TomlConfigProvider,
    };
    use parking_lot::Mutex;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// Assert every bucket of every peer holds at most `k` distinct ids.
    fn assert_buckets_bounded(network: &Network, k: usize) {
        for peer in network.peers() {
            let table = peer.routing_table_snapshot();
            for (index, bucket) in table.occupied_buckets() {
                let unique: HashSet<_> = bucket.peers().iter().collect();
                assert!(bucket.len() <= k, "{peer:?} bucket {index} over capacity");
                assert_eq!(unique.len(), bucket.len(), "{peer:?} bucket {index} has duplicates");
            }
        }
    }

    /// Resolves through one peer's routing table instead of the directory.
    struct RoutingTableResolver<'a> {
        origin: Arc<Peer>,
        network: &'a Network,
    }

    impl ClosestPeerResolver for RoutingTableResolver<'_> {
        fn find_closest_peers(&self, target: &NodeId, count: usize) -> Vec<Arc<dyn PeerHandle>> {
            self.origin
                .routing_table_snapshot()
                .find_closest_peers(target, count)
                .iter()
                .filter_map(|id| self.network.get_peer(id))
                .map(|peer| peer as Arc<dyn PeerHandle>)
                .collect()
        }
    }

    // =============================================================================
    // FLOW 1: Reference store/lookup run
    // =============================================================================

    #[test]
    fn test_reference_run_finds_every_value() {
        init_tracing();
        let config = SimulationConfig {
            seed: 2024,
            ..SimulationConfig::default()
        };

        let report = Simulation::with_seed(config.seed).run(&config);

        assert_eq!(report.stored, 200);
        assert_eq!(report.records.len(), 100);
        assert_eq!(report.hits, 100);
        assert_eq!(report.misses, 0);
    }

    #[test]
    fn test_every_value_held_by_its_two_closest_peers() {
        let mut sim = Simulation::with_seed(9);
        sim.populate(100);
        sim.store_random(50, 50);

        for key in sim.keys() {
            let holders = sim.network().find_closest_peers(key, 2);
            assert_eq!(holders.len(), 2);
            for holder in holders {
                assert!(holder.holds(key.as_bytes()), "{holder:?} missing {key}");
            }
        }
    }

    // =============================================================================
    // FLOW 2: Mass join under bucket pressure
    // =============================================================================

    #[test]
    fn test_mass_join_keeps_buckets_bounded() {
        init_tracing();
        let network = Network::new();

        // First five registered silently, the rest announced
        for i in 0..5 {
            network.add_peer(network.spawn_peer(format!("{i:x}")));
        }
        let mut last = None;
        for i in 5..205 {
            let peer = network.spawn_peer(format!("{i:x}"));
            last = Some(peer.id());
            network.join(peer);
        }

        assert_eq!(network.len(), 205);
        assert_buckets_bounded(&network, 3);

        // The newest announcement cannot have been evicted yet
        let last = last.unwrap();
        assert!(network.peers().iter().all(|p| p.knows(&last)));

        // Eviction bounded every table well below the network size
        for peer in network.peers() {
            assert!(peer.routing_stats().total_peers < 205);
        }
    }

    #[test]
    fn test_silent_peers_still_serve_values() {
        let network = Network::new();
        let silent: Vec<_> = (0..3).map(|i| network.spawn_peer(format!("silent-{i}"))).collect();
        for peer in &silent {
            network.add_peer(Arc::clone(peer));
        }
        let (key, value) = content_pair("unannounced");

        silent[0].set_value(key.as_bytes(), &value, &network).unwrap();

        // Resolution uses the directory, not routing tables
        assert!(silent.iter().all(|p| p.routing_stats().total_peers == 0));
        assert_eq!(silent[2].get_value(key.as_bytes(), &network), Some(value));
    }

    #[test]
    fn test_least_recently_seen_network_stays_bounded() {
        let config = DhtConfig::default().with_eviction(EvictionPolicy::LeastRecentlySeen);
        let network = Network::from_provider(&StaticConfigProvider::new().with_config(config)).unwrap();

        for i in 0..150 {
            network.join(network.spawn_peer(format!("{i:x}")));
        }
        // Re-announcing early peers refreshes them instead of duplicating
        for i in 0..10 {
            network.broadcast_name(format!("{i:x}"));
        }

        assert_buckets_bounded(&network, 3);
    }

    // =============================================================================
    // FLOW 3: Config file → Network
    // =============================================================================

    #[test]
    fn test_toml_config_drives_network() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[dht]\nk = 2\nreplication_factor = 3\ntable_size = 32\neviction = \"lrs\""
        )
        .unwrap();

        let provider = TomlConfigProvider::load(file.path()).unwrap();
        assert_eq!(provider.dht_config().replication_factor, 3);

        let network = Network::from_provider(&provider).unwrap();
        let peers: Vec<_> = (0..6).map(|i| network.spawn_peer(format!("{i}"))).collect();
        for peer in &peers {
            network.join(Arc::clone(peer));
        }
        let (key, value) = content_pair("three replicas");

        let outcome = peers[0].set_value(key.as_bytes(), &value, &network).unwrap();

        assert_eq!(outcome, StoreOutcome::Stored { replicas: 3 });
        assert_eq!(peers[0].routing_stats().bucket_count, 32);
        assert_buckets_bounded(&network, 2);
    }

    // =============================================================================
    // FLOW 4: Alternative resolver
    // =============================================================================

    #[test]
    fn test_routing_table_resolver_round_trip() {
        let (network, peers) = joined_network(4);
        let (key, value) = content_pair("resolved locally");
        assert!(peers[3].knows(&peers[0].id()));

        let writer = RoutingTableResolver {
            origin: Arc::clone(&peers[0]),
            network: &network,
        };
        peers[0].set_value(key.as_bytes(), &value, &writer).unwrap();

        let reader = RoutingTableResolver {
            origin: Arc::clone(&peers[3]),
            network: &network,
        };
        assert_eq!(peers[3].get_value(key.as_bytes(), &reader), Some(value));
    }

    // =============================================================================
    // FLOW 5: Concurrent drivers
    // =============================================================================

    #[test]
    fn test_concurrent_joins_stores_and_lookups() {
        init_tracing();
        let network = Arc::new(Network::new());
        let stored: Arc<Mutex<Vec<(NodeId, Vec<u8>)>>> = Arc::new(Mutex::new(Vec::new()));

        let joiners: Vec<_> = (0..4)
            .map(|t| {
                let network = Arc::clone(&network);
                thread::spawn(move || {
                    for i in 0..30 {
                        network.join(network.spawn_peer(format!("t{t}-{i}")));
                    }
                })
            })
            .collect();
        for handle in joiners {
            handle.join().unwrap();
        }
        assert_eq!(network.len(), 120);

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let network = Arc::clone(&network);
                let stored = Arc::clone(&stored);
                thread::spawn(move || {
                    let peers = network.peers();
                    for i in 0..25 {
                        let (key, value) = content_pair(format!("t{t}-value-{i}"));
                        let from = &peers[(t * 25 + i) % peers.len()];
                        from.set_value(key.as_bytes(), &value, &*network).unwrap();
                        stored.lock().push((key, value));
                    }
                })
            })
            .collect();
        for handle in writers {
            handle.join().unwrap();
        }

        let stored = stored.lock().clone();
        assert_eq!(stored.len(), 100);

        let misses = Arc::new(Mutex::new(0usize));
        let readers: Vec<_> = (0..4)
            .map(|t| {
                let network = Arc::clone(&network);
                let stored = stored.clone();
                let misses = Arc::clone(&misses);
                thread::spawn(move || {
                    let peers = network.peers();
                    for (i, (key, value)) in stored.iter().enumerate() {
                        let reader = &peers[(i * 3 + t) % peers.len()];
                        if reader.get_value(key.as_bytes(), &*network).as_ref() != Some(value) {
                            *misses.lock() += 1;
                        }
                    }
                })
            })
            .collect();
        for handle in readers {
            handle.join().unwrap();
        }

        assert_eq!(*misses.lock(), 0);
        assert_buckets_bounded(&network, 3);
    }
}
