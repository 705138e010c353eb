//! Peer sorting and selection.

use super::distance::xor_distance;
use crate::domain::{Distance, NodeId};

/// Sort identifiers by XOR distance from a target (closest first).
pub fn sort_by_distance(ids: &[NodeId], target: &NodeId) -> Vec<NodeId> {
    let mut sorted = ids.to_vec();
    sorted.sort_by_key(|id| xor_distance(id, target));
    sorted
}

/// Find exactly the k closest identifiers to a target (no tie expansion).
///
/// # Returns
/// Up to k identifiers sorted by distance (closest first)
pub fn find_k_closest(ids: &[NodeId], target: &NodeId, k: usize) -> Vec<NodeId> {
    sort_by_distance(ids, target).into_iter().take(k).collect()
}

/// Select the candidates closest to `target`, expanding ties at the boundary.
///
/// Candidates are ranked by XOR distance. The distance of the `count`-th
/// ranked candidate is the boundary, and every candidate at or below it is
/// returned, so the result can hold MORE than `count` entries when several
/// candidates share the boundary distance. Within equal distances the input
/// order is kept.
///
/// Two distinct identifiers never share a distance to the same target, so
/// expansion only happens when the candidate list repeats an identifier.
///
/// Returns an empty list for `count == 0` or no candidates, and all
/// candidates when there are fewer than `count`.
pub fn select_closest<T, F>(candidates: Vec<T>, target: &NodeId, count: usize, id_of: F) -> Vec<T>
where
    F: Fn(&T) -> NodeId,
{
    if count == 0 || candidates.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<(Distance, T)> = candidates
        .into_iter()
        .map(|c| (xor_distance(&id_of(&c), target), c))
        .collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0));

    let boundary = ranked[count.min(ranked.len()) - 1].0;

    ranked
        .into_iter()
        .take_while(|(d, _)| *d <= boundary)
        .map(|(_, c)| c)
        .collect()
}
