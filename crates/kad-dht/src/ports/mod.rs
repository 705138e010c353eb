//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** what a peer exposes to callers and to
//!   other peers (`PeerHandle`)
//! - **Driven Ports (Outbound):** what a peer needs from its environment
//!   (`ClosestPeerResolver`, `ConfigProvider`)
//!
//! Peer logic only talks to other peers through these traits, so the
//! in-memory `Network` can be swapped for a routing-table-driven resolver or
//! a transport-backed handle without touching `Peer`.

pub mod inbound;
pub mod outbound;

pub use inbound::PeerHandle;
pub use outbound::{ClosestPeerResolver, ConfigProvider};
