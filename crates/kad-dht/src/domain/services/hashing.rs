//! Content hashing into the identifier space.

use sha1::{Digest, Sha1};
use sha2::Sha256;

use crate::domain::{NodeId, ID_BYTES};

/// Fixed-length one-way hash producing identifiers.
///
/// Used both for naming peers and for content-addressing values. Every peer
/// of one network must use the same hasher, otherwise keys computed by one
/// peer fail verification on another.
pub trait ContentHasher: Send + Sync {
    /// Hash arbitrary bytes into the identifier space.
    fn digest(&self, data: &[u8]) -> NodeId;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// SHA-1, whose 160-bit output is exactly one identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha1Hasher;

impl ContentHasher for Sha1Hasher {
    fn digest(&self, data: &[u8]) -> NodeId {
        let mut hasher = Sha1::new();
        hasher.update(data);
        let result = hasher.finalize();
        let mut id = [0u8; ID_BYTES];
        id.copy_from_slice(&result);
        NodeId::new(id)
    }

    fn name(&self) -> &'static str {
        "sha1"
    }
}

/// SHA-256 truncated to the first 160 bits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Truncated;

impl ContentHasher for Sha256Truncated {
    fn digest(&self, data: &[u8]) -> NodeId {
        let result = Sha256::digest(data);
        let mut id = [0u8; ID_BYTES];
        id.copy_from_slice(&result[..ID_BYTES]);
        NodeId::new(id)
    }

    fn name(&self) -> &'static str {
        "sha256-160"
    }
}

/// Check that `key` is the content address of `value`.
///
/// Returns the digest on success so callers can reuse it as the store key,
/// or the digest in `Err` when the key does not match (including keys of
/// the wrong length, which can never match).
pub fn verify_content_address(
    hasher: &dyn ContentHasher,
    key: &[u8],
    value: &[u8],
) -> Result<NodeId, NodeId> {
    let actual = hasher.digest(value);
    match NodeId::try_from(key) {
        Ok(claimed) if claimed == actual => Ok(actual),
        _ => Err(actual),
    }
}
