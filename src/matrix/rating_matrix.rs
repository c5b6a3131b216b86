use std::collections::HashMap;

use anyhow::{Result, bail};
use log::info;

use crate::domain::{MovieId, RatingEntry, RatingValue, UserId};

/// Sparse user-by-movie rating matrix with per-user means derived at build time.
///
/// Absent entries are genuinely absent: every accessor answers `Option`, and no
/// numeric sentinel stands in for "unrated". The matrix never changes after
/// construction; a refresh builds a new matrix and swaps it in whole.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    rows: HashMap<UserId, HashMap<MovieId, RatingValue>>,
    user_means: HashMap<UserId, RatingValue>,
    users: Vec<UserId>,
    movies: Vec<MovieId>,
}

impl RatingMatrix {
    /// Build the matrix from rating triples.
    ///
    /// Fails on caller contract violations: a duplicate (user, movie) pair or
    /// a non-finite rating value. Both indicate a bug in the surrounding
    /// system, not a runtime data condition.
    pub fn from_entries(entries: &[RatingEntry]) -> Result<Self> {
        let mut rows: HashMap<UserId, HashMap<MovieId, RatingValue>> = HashMap::new();
        let mut movies: Vec<MovieId> = Vec::new();

        for entry in entries {
            if !entry.rating.is_finite() {
                bail!(
                    "non-finite rating {} for user {} movie {}",
                    entry.rating,
                    entry.user_id,
                    entry.movie_id
                );
            }
            let row = rows.entry(entry.user_id).or_default();
            if row.insert(entry.movie_id, entry.rating).is_some() {
                bail!(
                    "duplicate rating for user {} movie {}",
                    entry.user_id,
                    entry.movie_id
                );
            }
            movies.push(entry.movie_id);
        }

        movies.sort_unstable();
        movies.dedup();

        let mut users: Vec<UserId> = rows.keys().copied().collect();
        users.sort_unstable();

        // A user only enters via a triple, so every stored row is non-empty
        // and every mean is defined over at least one present rating.
        let user_means = rows
            .iter()
            .map(|(&user_id, row)| {
                let sum: RatingValue = row.values().sum();
                (user_id, sum / row.len() as RatingValue)
            })
            .collect();

        info!(
            "Built rating matrix: {} users, {} movies, {} ratings",
            users.len(),
            movies.len(),
            entries.len()
        );

        Ok(Self {
            rows,
            user_means,
            users,
            movies,
        })
    }

    /// Users present in the matrix, ascending by id. This is the population
    /// enumeration order all tie-breaking is defined against.
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Movies with at least one rating, ascending by id. Movies nobody has
    /// rated are invisible here; the caller merges them in if it wants them.
    pub fn movies(&self) -> &[MovieId] {
        &self.movies
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    pub fn contains_user(&self, user_id: UserId) -> bool {
        self.rows.contains_key(&user_id)
    }

    /// Raw rating, or `None` when the user has not rated the movie.
    pub fn rating(&self, user_id: UserId, movie_id: MovieId) -> Option<RatingValue> {
        self.rows.get(&user_id)?.get(&movie_id).copied()
    }

    /// Mean of the user's present ratings only; `None` for an unknown user.
    pub fn user_mean(&self, user_id: UserId) -> Option<RatingValue> {
        self.user_means.get(&user_id).copied()
    }

    /// Raw rating minus the user's mean. Missing stays missing.
    pub fn centered_rating(&self, user_id: UserId, movie_id: MovieId) -> Option<RatingValue> {
        Some(self.rating(user_id, movie_id)? - self.user_mean(user_id)?)
    }

    pub(crate) fn user_row(&self, user_id: UserId) -> Option<&HashMap<MovieId, RatingValue>> {
        self.rows.get(&user_id)
    }

    /// Movies the user has not rated, ascending by id. Empty for an unknown
    /// user.
    pub fn unrated_movies(&self, user_id: UserId) -> Vec<MovieId> {
        match self.rows.get(&user_id) {
            Some(row) => self
                .movies
                .iter()
                .copied()
                .filter(|movie_id| !row.contains_key(movie_id))
                .collect(),
            None => Vec::new(),
        }
    }
}
