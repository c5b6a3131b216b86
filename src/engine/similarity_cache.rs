use std::collections::HashMap;

use log::info;

use crate::domain::{Neighbor, UserId};
use crate::matrix::RatingMatrix;

use super::neighbors::rank_neighbors;
use super::similarity::pearson_similarity;

/// Precomputed pairwise similarities, rebuilt whenever a snapshot refreshes.
///
/// Optional scaling aid: trades O(U^2) work at build time for O(1) lookups
/// during neighbor ranking. Results are identical to the on-demand path in
/// [`crate::engine::nearest_neighbors`].
#[derive(Debug)]
pub struct SimilarityCache {
    scores: HashMap<(UserId, UserId), f64>,
}

impl SimilarityCache {
    pub fn build(matrix: &RatingMatrix) -> Self {
        let users = matrix.users();
        let mut scores = HashMap::new();

        for (i, &a) in users.iter().enumerate() {
            for &b in &users[i + 1..] {
                let score = pearson_similarity(matrix, a, b).value();
                if score != 0.0 {
                    scores.insert((a, b), score);
                }
            }
        }

        info!(
            "Built similarity cache: {} users, {} nonzero pairs",
            users.len(),
            scores.len()
        );
        Self { scores }
    }

    /// Collapsed score for the pair; symmetric, 0.0 where no signal exists.
    pub fn score(&self, a: UserId, b: UserId) -> f64 {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.scores.get(&key).copied().unwrap_or(0.0)
    }

    /// Same contract as the on-demand neighbor selection, served from the
    /// cache.
    pub fn neighbors(&self, matrix: &RatingMatrix, target: UserId, k: usize) -> Vec<Neighbor> {
        rank_neighbors(matrix.users(), target, k, |other| self.score(target, other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RatingEntry;
    use crate::engine::nearest_neighbors;

    fn matrix() -> RatingMatrix {
        RatingMatrix::from_entries(&[
            RatingEntry::new(1, 10, 5.0),
            RatingEntry::new(1, 20, 3.0),
            RatingEntry::new(1, 30, 1.0),
            RatingEntry::new(2, 10, 5.0),
            RatingEntry::new(2, 20, 3.0),
            RatingEntry::new(2, 30, 4.0),
            RatingEntry::new(3, 10, 1.0),
            RatingEntry::new(3, 20, 5.0),
            RatingEntry::new(3, 30, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_cached_scores_are_symmetric() {
        let m = matrix();
        let cache = SimilarityCache::build(&m);
        for &a in m.users() {
            for &b in m.users() {
                assert_eq!(cache.score(a, b), cache.score(b, a));
            }
        }
    }

    #[test]
    fn test_cache_matches_on_demand_similarity() {
        let m = matrix();
        let cache = SimilarityCache::build(&m);
        for &a in m.users() {
            for &b in m.users() {
                if a != b {
                    assert_eq!(cache.score(a, b), pearson_similarity(&m, a, b).value());
                }
            }
        }
    }

    #[test]
    fn test_cached_neighbors_match_on_demand_neighbors() {
        let m = matrix();
        let cache = SimilarityCache::build(&m);
        for &user_id in m.users() {
            assert_eq!(
                cache.neighbors(&m, user_id, 5),
                nearest_neighbors(&m, user_id, 5)
            );
        }
    }
}
