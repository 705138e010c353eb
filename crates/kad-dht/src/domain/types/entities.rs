//! Core Domain Entities for the DHT
//!
//! Identifiers for peers and keys share one 160-bit space.

use std::fmt;

use crate::domain::{ContentHasher, Sha1Hasher};

/// Width of an identifier in bytes.
pub const ID_BYTES: usize = 20;

/// Width of an identifier in bits.
pub const ID_BITS: usize = ID_BYTES * 8;

/// 160-bit identifier in the Kademlia metric space.
///
/// Peers derive their identifier by hashing their name; keys are the hash
/// of the value stored under them. Both live in the same space so that the
/// XOR distance between a key and a peer is meaningful.
///
/// Bytes are big-endian: `as_bytes()[0]` holds the most significant bits.
///
/// # Security
///
/// Equality is constant-time. Content-address checks compare a claimed key
/// against a freshly computed digest, and a short-circuiting comparison
/// would leak how many leading bytes matched.
// SAFETY: derived_hash_with_manual_eq is intentionally allowed here.
// The manual PartialEq is constant-time but agrees with byte equality,
// so hashing the bytes stays consistent with Eq.
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Clone, Copy, Hash)]
pub struct NodeId(pub [u8; ID_BYTES]);

impl PartialEq for NodeId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        let mut result = 0u8;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            result |= a ^ b;
        }
        result == 0
    }
}

impl Eq for NodeId {}

impl NodeId {
    /// Create a NodeId from a raw 20-byte array.
    pub fn new(bytes: [u8; ID_BYTES]) -> Self {
        Self(bytes)
    }

    /// Derive an identifier from an opaque name with the default hasher (SHA-1).
    ///
    /// Deterministic and infallible for any input.
    pub fn from_name(name: impl AsRef<[u8]>) -> Self {
        Sha1Hasher.digest(name.as_ref())
    }

    /// Get the underlying bytes for XOR distance calculation.
    pub fn as_bytes(&self) -> &[u8; ID_BYTES] {
        &self.0
    }

    /// The all-zero identifier.
    pub fn zero() -> Self {
        Self([0u8; ID_BYTES])
    }

    /// Stable textual form: lowercase hex of all 20 bytes.
    ///
    /// Used as the Network directory key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse the textual form produced by [`NodeId::to_hex`].
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        Self::try_from(bytes.as_slice()).ok()
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for NodeId {
    type Error = std::array::TryFromSliceError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; ID_BYTES]>::try_from(bytes).map(Self)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
