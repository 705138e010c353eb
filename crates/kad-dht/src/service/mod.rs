//! # DHT Service
//!
//! `Peer` wires a routing table and a value store to the ports: it stores
//! and fetches through whatever `ClosestPeerResolver` it is handed.
//! `Network` is the in-memory directory that plays that resolver.

mod network;
mod peer;

pub use network::Network;
pub use peer::Peer;
