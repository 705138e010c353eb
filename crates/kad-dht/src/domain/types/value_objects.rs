//! Value Objects for the DHT

use std::fmt;
use std::str::FromStr;

use super::entities::{ID_BITS, ID_BYTES};
use super::errors::DhtError;
use crate::domain::routing_table::{DEFAULT_K, NUM_BUCKETS};

/// XOR distance between two identifiers.
///
/// A full-width unsigned integer, ordered numerically: the derived `Ord` on
/// the big-endian byte array is exactly numeric order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(pub [u8; ID_BYTES]);

impl Distance {
    /// Create a Distance from raw big-endian bytes.
    pub fn new(bytes: [u8; ID_BYTES]) -> Self {
        Self(bytes)
    }

    /// The zero distance (an identifier to itself).
    pub fn zero() -> Self {
        Self([0u8; ID_BYTES])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn as_bytes(&self) -> &[u8; ID_BYTES] {
        &self.0
    }

    /// Number of significant bits (0 for the zero distance, 160 max).
    pub fn bit_len(&self) -> usize {
        for (i, byte) in self.0.iter().enumerate() {
            if *byte != 0 {
                return ID_BITS - (i * 8 + byte.leading_zeros() as usize);
            }
        }
        0
    }

    /// Bucket index for this distance in a table of `table_size` buckets.
    ///
    /// `max(0, bit_len - 1)` clamped into `[0, table_size - 1]`. Distance 0
    /// shares bucket 0 with distance 1.
    pub fn bucket_index(&self, table_size: usize) -> usize {
        let index = self.bit_len().saturating_sub(1);
        index.min(table_size.saturating_sub(1))
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance(bits={}, {})", self.bit_len(), hex::encode(&self.0[..8]))
    }
}

/// Successful result of a `set_value` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// Written locally and pushed to `replicas` closest peers
    Stored {
        /// Peers the value was pushed to (may include the caller itself)
        replicas: usize,
    },
    /// Key was already held locally; nothing replicated
    AlreadyStored,
}

/// How a full bucket makes room for a newcomer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Bounded FIFO: evict index 0 regardless of activity, re-insertion of a
    /// known id is a no-op.
    ///
    /// NOTE: this is not canonical Kademlia. Kademlia pings the
    /// least-recently-seen entry and keeps it if it answers.
    #[default]
    OldestInserted,
    /// Re-inserting a known id moves it to the tail; eviction takes the head,
    /// which is then the least recently seen entry. No liveness probe.
    LeastRecentlySeen,
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OldestInserted => write!(f, "oldest_inserted"),
            Self::LeastRecentlySeen => write!(f, "least_recently_seen"),
        }
    }
}

impl FromStr for EvictionPolicy {
    type Err = DhtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oldest_inserted" | "fifo" => Ok(Self::OldestInserted),
            "least_recently_seen" | "lrs" => Ok(Self::LeastRecentlySeen),
            other => Err(DhtError::InvalidConfig(format!(
                "unknown eviction policy '{other}'"
            ))),
        }
    }
}

/// Configuration constants for the DHT
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhtConfig {
    /// Bucket size (default: 3)
    pub k: usize,
    /// Number of closest peers asked to hold or serve a value (default: 2)
    pub replication_factor: usize,
    /// Buckets per routing table (default: 160, one per identifier bit)
    pub table_size: usize,
    /// Bucket eviction policy (default: oldest inserted)
    pub eviction: EvictionPolicy,
}

impl Default for DhtConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            replication_factor: 2,
            table_size: NUM_BUCKETS,
            eviction: EvictionPolicy::OldestInserted,
        }
    }
}

impl DhtConfig {
    /// Create a config suitable for testing (smaller tables)
    pub fn for_testing() -> Self {
        Self {
            k: DEFAULT_K,
            replication_factor: 2,
            table_size: 16,
            eviction: EvictionPolicy::OldestInserted,
        }
    }

    /// Same config with a different eviction policy.
    pub fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }

    /// Reject values that would make buckets or lookups meaningless.
    pub fn validate(&self) -> Result<(), DhtError> {
        if self.k == 0 {
            return Err(DhtError::InvalidConfig("k must be at least 1".into()));
        }
        if self.replication_factor == 0 {
            return Err(DhtError::InvalidConfig(
                "replication_factor must be at least 1".into(),
            ));
        }
        if self.table_size == 0 || self.table_size > ID_BITS {
            return Err(DhtError::InvalidConfig(format!(
                "table_size must be in 1..={ID_BITS}, got {}",
                self.table_size
            )));
        }
        Ok(())
    }
}
