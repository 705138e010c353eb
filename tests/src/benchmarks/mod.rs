//! # Kad-DHT Benchmarks
//!
//! Registered from `benches/dht_benchmarks.rs`.

pub mod dht;

pub use dht::register_benchmarks;
