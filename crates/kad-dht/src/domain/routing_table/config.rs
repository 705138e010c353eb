//! Routing table constants.

use crate::domain::ID_BITS;

/// Number of k-buckets (one per bit of NodeId)
pub const NUM_BUCKETS: usize = ID_BITS;

/// Default bucket capacity
pub const DEFAULT_K: usize = 3;
