//! # Driving Ports (Inbound API)

use crate::domain::{DhtError, NodeId, StoreOutcome};
use crate::ports::ClosestPeerResolver;

/// Capability to address one peer.
///
/// The in-memory `Peer` implements this directly. A transport-backed
/// implementation would forward each call as an RPC with the same success
/// and failure semantics.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; any number of driver threads may
/// hold the same handle.
pub trait PeerHandle: Send + Sync {
    /// Identifier of the peer behind this handle.
    fn id(&self) -> NodeId;

    /// Record that `peer_id` exists (routing table insert).
    fn observe(&self, peer_id: NodeId);

    /// Store a content-addressed value and replicate it to the closest peers.
    ///
    /// # Errors
    ///
    /// `DhtError::ContentAddressMismatch` when `key != hash(value)`. No store
    /// is touched in that case.
    fn set_value(
        &self,
        key: &[u8],
        value: &[u8],
        resolver: &dyn ClosestPeerResolver,
    ) -> Result<StoreOutcome, DhtError>;

    /// Fetch a value locally, or from the closest peers (one hop).
    ///
    /// Remote values are only returned if they hash to `key`. `None` means
    /// no validated copy was found.
    fn get_value(&self, key: &[u8], resolver: &dyn ClosestPeerResolver) -> Option<Vec<u8>>;

    /// Accept a replica pushed by a peer that already validated it.
    fn store_replica(&self, key: NodeId, value: Vec<u8>);

    /// Return the locally held copy of `key`, unvalidated.
    fn fetch_replica(&self, key: &NodeId) -> Option<Vec<u8>>;
}
