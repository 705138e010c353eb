//! # Kad-DHT Benchmarks
//!
//! - Identifier hashing and XOR distance
//! - Bucket index and bucket insert under eviction pressure
//! - Closest-peer scan over the whole directory (O(P log P))
//! - set/get round trip through a populated `Network`

use std::time::Duration;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use kad_dht::{
    calculate_bucket_index, xor_distance, DhtConfig, EvictionPolicy, Network, NodeId,
    RoutingTable, Simulation, ID_BITS,
};
use rand::Rng;

fn random_id(rng: &mut impl Rng) -> NodeId {
    NodeId::new(rng.gen())
}

pub fn bench_identity(c: &mut Criterion) {
    let mut group = c.benchmark_group("kad-dht/identity");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("sha1_identifier", |b| {
        b.iter(|| black_box(NodeId::from_name(black_box("peer-name"))))
    });

    let a = NodeId::new([0xAA; 20]);
    let other = NodeId::new([0x55; 20]);
    group.bench_function("xor_distance", |b| b.iter(|| black_box(xor_distance(&a, &other))));

    group.bench_function("bucket_index", |b| {
        b.iter(|| black_box(calculate_bucket_index(&a, &other, ID_BITS)))
    });

    group.finish();
}

pub fn bench_routing_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("kad-dht/routing_table");
    group.measurement_time(Duration::from_secs(10));

    let mut rng = rand::thread_rng();
    let local = random_id(&mut rng);
    let incoming: Vec<NodeId> = (0..1000).map(|_| random_id(&mut rng)).collect();

    for policy in [EvictionPolicy::OldestInserted, EvictionPolicy::LeastRecentlySeen] {
        group.throughput(Throughput::Elements(incoming.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("insert_1000", policy),
            &incoming,
            |b, incoming| {
                b.iter(|| {
                    let config = DhtConfig::default().with_eviction(policy);
                    let mut table = RoutingTable::new(local, config);
                    for id in incoming {
                        table.insert(*id);
                    }
                    black_box(table.total_peer_count())
                })
            },
        );
    }

    group.finish();
}

pub fn bench_network(c: &mut Criterion) {
    let mut group = c.benchmark_group("kad-dht/network");
    group.measurement_time(Duration::from_secs(10));

    for count in [100usize, 1000, 5000] {
        let network = Network::new();
        for i in 0..count {
            network.add_peer(network.spawn_peer(format!("{i:x}")));
        }
        let target = NodeId::from_name("target");

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("find_closest_peers", count), &network, |b, network| {
            b.iter(|| black_box(network.find_closest_peers(&target, 2)))
        });
    }

    let mut sim = Simulation::with_seed(1);
    sim.populate(100);
    let peers = sim.peers().to_vec();
    let network = sim.network();
    group.bench_function("set_get_round_trip_100_peers", |b| {
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            let value = format!("value-{n}");
            let key = NodeId::from_name(&value);
            let from = &peers[(n as usize) % peers.len()];
            let to = &peers[(n as usize * 7) % peers.len()];
            let _ = from.set_value(key.as_bytes(), value.as_bytes(), network);
            black_box(to.get_value(key.as_bytes(), network))
        })
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_identity(c);
    bench_routing_table(c);
    bench_network(c);
}
