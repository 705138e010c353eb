/// Snapshot of a routing table's occupancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTableStats {
    /// Identifiers across all buckets
    pub total_peers: usize,
    /// Buckets holding at least one identifier
    pub buckets_used: usize,
    /// Buckets at capacity
    pub buckets_full: usize,
    /// Number of buckets in the table
    pub bucket_count: usize,
    /// Upper bound on identifiers (`bucket_count * k`)
    pub capacity: usize,
}
