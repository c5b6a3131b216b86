use crate::domain::{MovieId, Neighbor, RatingValue, UserId};
use crate::matrix::RatingMatrix;

use super::neighbors::nearest_neighbors;

/// Predicted rating for a movie the user has not seen.
///
/// `None` means "no prediction possible": the user is unknown, or no neighbor
/// with nonzero similarity has rated the movie. Callers must not read `None`
/// as a zero rating.
pub fn predict_rating(
    matrix: &RatingMatrix,
    user_id: UserId,
    movie_id: MovieId,
    k: usize,
) -> Option<RatingValue> {
    if !matrix.contains_user(user_id) {
        return None;
    }
    let neighbors = nearest_neighbors(matrix, user_id, k);
    predict_with_neighbors(matrix, movie_id, &neighbors)
}

/// Similarity-weighted mean of the neighbors' raw ratings for the movie.
///
/// Neighbors without a rating for the movie contribute nothing. A zero
/// denominator (nobody rated it, or every contributing similarity is 0)
/// yields `None` rather than a division fault.
pub fn predict_with_neighbors(
    matrix: &RatingMatrix,
    movie_id: MovieId,
    neighbors: &[Neighbor],
) -> Option<RatingValue> {
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for neighbor in neighbors {
        if let Some(rating) = matrix.rating(neighbor.user_id, movie_id) {
            numerator += neighbor.score * rating;
            denominator += neighbor.score.abs();
        }
    }

    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}
