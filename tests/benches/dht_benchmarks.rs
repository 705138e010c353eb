//! # Kad-DHT Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Identity | SHA-1 identifier, XOR distance, bucket index |
//! | Routing | bucket insert under eviction pressure |
//! | Network | closest-peer scan, set/get round trip |

use criterion::{criterion_group, criterion_main, Criterion};

fn benches_all(c: &mut Criterion) {
    kad_tests::benchmarks::register_benchmarks(c);
}

criterion_group!(benches, benches_all);
criterion_main!(benches);
