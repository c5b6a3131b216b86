use ndarray::Array1;

use crate::domain::{RatingValue, UserId};
use crate::matrix::RatingMatrix;

/// Similarity between two users' rating histories.
///
/// `NoSignal` covers every degenerate case: too little common support, or a
/// zero-variance vector where the correlation is undefined. Callers that need
/// a bare number collapse it with [`Similarity::value`], which maps `NoSignal`
/// to the 0.0 the numeric ranking contract expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Similarity {
    NoSignal,
    Score(f64),
}

impl Similarity {
    /// Collapse to the numeric contract used for neighbor ranking.
    pub fn value(self) -> f64 {
        match self {
            Similarity::NoSignal => 0.0,
            Similarity::Score(score) => score,
        }
    }
}

/// Pearson correlation of two users over the movies both have rated.
///
/// Total over all inputs, never panics and never divides by zero:
/// - a common support of 0 or 1 movies carries no signal;
/// - pointwise identical vectors score exactly 1;
/// - a constant vector that is not identical to the other carries no signal.
///
/// Computed over raw ratings, not centered ones: centering is per-user-global
/// while the correlation is local to the common support.
pub fn pearson_similarity(matrix: &RatingMatrix, a: UserId, b: UserId) -> Similarity {
    let (xs, ys) = match common_support(matrix, a, b) {
        Some(vectors) => vectors,
        None => return Similarity::NoSignal,
    };

    if xs == ys {
        return Similarity::Score(1.0);
    }
    if variance(&xs) > 0.0 && variance(&ys) > 0.0 {
        return Similarity::Score(pearson(&xs, &ys));
    }
    Similarity::NoSignal
}

/// Both users' ratings over their common support, aligned by ascending movie
/// id, or `None` when fewer than two movies are shared.
fn common_support(
    matrix: &RatingMatrix,
    a: UserId,
    b: UserId,
) -> Option<(Array1<RatingValue>, Array1<RatingValue>)> {
    let row_a = matrix.user_row(a)?;
    let row_b = matrix.user_row(b)?;

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for movie_id in matrix.movies() {
        if let (Some(&x), Some(&y)) = (row_a.get(movie_id), row_b.get(movie_id)) {
            xs.push(x);
            ys.push(y);
        }
    }

    if xs.len() <= 1 {
        return None;
    }
    Some((Array1::from_vec(xs), Array1::from_vec(ys)))
}

fn variance(values: &Array1<f64>) -> f64 {
    let mean = values.mean().unwrap_or(0.0);
    values.mapv(|v| (v - mean).powi(2)).sum() / values.len() as f64
}

fn pearson(xs: &Array1<f64>, ys: &Array1<f64>) -> f64 {
    let dx = xs - xs.mean().unwrap_or(0.0);
    let dy = ys - ys.mean().unwrap_or(0.0);

    let numerator = (&dx * &dy).sum();
    let denominator = (dx.mapv(|v| v * v).sum() * dy.mapv(|v| v * v).sum()).sqrt();

    // Callers guarantee nonzero variance, so the denominator is positive.
    // Clamp against float rounding nudging the ratio past the ends.
    (numerator / denominator).clamp(-1.0, 1.0)
}
