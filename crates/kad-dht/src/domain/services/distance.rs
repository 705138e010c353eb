//! Kademlia distance calculations.

use crate::domain::{Distance, NodeId, ID_BYTES};

/// Calculate the XOR distance between two NodeIds
///
/// # Properties
/// - Symmetric: `xor_distance(a, b) == xor_distance(b, a)`
/// - Self is zero: `xor_distance(a, a) == Distance::zero()`
/// - Unidirectional: for a fixed `a`, every distance maps to exactly one `b`
pub fn xor_distance(a: &NodeId, b: &NodeId) -> Distance {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut out = [0u8; ID_BYTES];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = a_bytes[i] ^ b_bytes[i];
    }
    Distance::new(out)
}

/// Bucket index for a distance: `max(0, bit_len - 1)` clamped to the table.
#[inline]
pub fn bucket_index(distance: &Distance, table_size: usize) -> usize {
    distance.bucket_index(table_size)
}

/// Calculate the bucket index for a remote node relative to local node.
///
/// Peers whose distance has the same bit length share a bucket, so bucket
/// `i` covers distances in `[2^i, 2^(i+1))`.
pub fn calculate_bucket_index(local: &NodeId, remote: &NodeId, table_size: usize) -> usize {
    bucket_index(&xor_distance(local, remote), table_size)
}
