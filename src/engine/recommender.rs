use log::debug;

use crate::config::EngineSettings;
use crate::domain::{MovieId, RatingValue, UserId};
use crate::matrix::RatingMatrix;

use super::predictor::predict_rating;

/// Top-n recommendations for a user: unseen movies ranked by predicted rating.
///
/// Candidates without a usable prediction are dropped; ties keep ascending
/// movie id order. An unknown user gets an empty list, not an error. Only ids
/// are returned: the caller re-fetches movie metadata itself.
pub fn recommend_movies(
    matrix: &RatingMatrix,
    user_id: UserId,
    n: usize,
    config: &EngineSettings,
) -> Vec<MovieId> {
    rank_candidates(matrix, user_id, n, |movie_id| {
        predict_rating(matrix, user_id, movie_id, config.neighbor_count)
    })
}

/// Shared candidate ranking: predict every unseen movie, drop the missing
/// ones, stable-sort descending, truncate to n.
pub(crate) fn rank_candidates(
    matrix: &RatingMatrix,
    user_id: UserId,
    n: usize,
    predict: impl Fn(MovieId) -> Option<RatingValue>,
) -> Vec<MovieId> {
    let candidates = matrix.unrated_movies(user_id);
    let candidate_count = candidates.len();

    let mut predictions: Vec<(MovieId, RatingValue)> = candidates
        .into_iter()
        .filter_map(|movie_id| predict(movie_id).map(|predicted| (movie_id, predicted)))
        .collect();

    // Stable sort keeps ascending-movie-id order among equal predictions.
    predictions.sort_by(|a, b| b.1.total_cmp(&a.1));

    debug!(
        "User {}: {} candidates, {} scored, returning up to {}",
        user_id,
        candidate_count,
        predictions.len(),
        n
    );

    predictions
        .into_iter()
        .take(n)
        .map(|(movie_id, _)| movie_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RatingEntry;

    fn matrix() -> RatingMatrix {
        RatingMatrix::from_entries(&[
            RatingEntry::new(1, 10, 5.0),
            RatingEntry::new(1, 20, 3.0),
            RatingEntry::new(2, 10, 5.0),
            RatingEntry::new(2, 20, 3.0),
            RatingEntry::new(2, 30, 4.0),
            RatingEntry::new(3, 10, 1.0),
            RatingEntry::new(3, 20, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_recommends_the_predictable_unseen_movie() {
        let config = EngineSettings::default();
        assert_eq!(recommend_movies(&matrix(), 1, 1, &config), vec![30]);
    }

    #[test]
    fn test_returns_only_unrated_movies() {
        let m = matrix();
        let config = EngineSettings::default();
        for movie_id in recommend_movies(&m, 1, 10, &config) {
            assert_eq!(m.rating(1, movie_id), None);
        }
    }

    #[test]
    fn test_unknown_user_gets_empty_list() {
        let config = EngineSettings::default();
        assert!(recommend_movies(&matrix(), 9, 5, &config).is_empty());
    }

    #[test]
    fn test_unpredictable_candidates_are_dropped() {
        // User 3 only matches zero-signal users, so nothing is predictable.
        let m = RatingMatrix::from_entries(&[
            RatingEntry::new(1, 10, 5.0),
            RatingEntry::new(2, 20, 3.0),
            RatingEntry::new(3, 30, 4.0),
        ])
        .unwrap();
        let config = EngineSettings::default();
        assert!(recommend_movies(&m, 3, 5, &config).is_empty());
    }

    #[test]
    fn test_equal_predictions_keep_ascending_movie_ids() {
        // Users 2 and 3 rate movies 30 and 40 identically, so user 1's
        // predictions for both tie and the lower movie id wins.
        let m = RatingMatrix::from_entries(&[
            RatingEntry::new(1, 10, 5.0),
            RatingEntry::new(1, 20, 3.0),
            RatingEntry::new(2, 10, 5.0),
            RatingEntry::new(2, 20, 3.0),
            RatingEntry::new(2, 30, 4.0),
            RatingEntry::new(2, 40, 4.0),
            RatingEntry::new(3, 10, 5.0),
            RatingEntry::new(3, 20, 3.0),
            RatingEntry::new(3, 30, 4.0),
            RatingEntry::new(3, 40, 4.0),
        ])
        .unwrap();
        let config = EngineSettings::default();
        assert_eq!(recommend_movies(&m, 1, 2, &config), vec![30, 40]);
    }

    #[test]
    fn test_n_truncates_the_list() {
        let m = RatingMatrix::from_entries(&[
            RatingEntry::new(1, 10, 5.0),
            RatingEntry::new(1, 20, 3.0),
            RatingEntry::new(2, 10, 5.0),
            RatingEntry::new(2, 20, 3.0),
            RatingEntry::new(2, 30, 5.0),
            RatingEntry::new(2, 40, 2.0),
        ])
        .unwrap();
        let config = EngineSettings::default();
        let top = recommend_movies(&m, 1, 1, &config);
        assert_eq!(top, vec![30]);
    }
}
