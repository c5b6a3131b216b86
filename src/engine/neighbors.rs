use crate::domain::{Neighbor, UserId};
use crate::matrix::RatingMatrix;

use super::similarity::pearson_similarity;

/// Top-k most similar users to the target, descending by score.
///
/// Every other user in the population is scored. Ties keep ascending user id
/// order (the population enumeration order), so the result is deterministic.
/// Fewer than k other users yields all of them. A target with no ratings gets
/// a well-formed all-zero list, not an error.
pub fn nearest_neighbors(matrix: &RatingMatrix, target: UserId, k: usize) -> Vec<Neighbor> {
    rank_neighbors(matrix.users(), target, k, |other| {
        pearson_similarity(matrix, target, other).value()
    })
}

/// Shared ranking step: score every candidate, stable-sort descending,
/// truncate to k. Also serves the precomputed-similarity path.
pub(crate) fn rank_neighbors(
    users: &[UserId],
    target: UserId,
    k: usize,
    score: impl Fn(UserId) -> f64,
) -> Vec<Neighbor> {
    let mut neighbors: Vec<Neighbor> = users
        .iter()
        .copied()
        .filter(|&other| other != target)
        .map(|other| Neighbor {
            user_id: other,
            score: score(other),
        })
        .collect();

    // Stable sort keeps ascending-id input order among equal scores.
    neighbors.sort_by(|a, b| b.score.total_cmp(&a.score));
    neighbors.truncate(k);
    neighbors
}
