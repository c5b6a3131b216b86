use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::config::EngineSettings;
use crate::domain::{MovieId, Neighbor, RatingEntry, RatingValue, UserId};
use crate::engine::{self, SimilarityCache, recommender::rank_candidates};
use crate::matrix::{EngineSnapshot, RatingMatrix, SnapshotStore};

/// Facade a hosting service talks to: owns the current rating snapshot and
/// answers recommendation queries against it.
///
/// Every query pins the snapshot current at call time, so concurrent callers
/// are safe: a `refresh` swaps the whole snapshot and never mutates data under
/// a reader.
pub struct RecommendationService {
    store: SnapshotStore,
    config: EngineSettings,
}

impl RecommendationService {
    pub fn new(entries: &[RatingEntry], config: EngineSettings) -> Result<Self> {
        let snapshot = build_snapshot(entries, &config)?;
        Ok(Self {
            store: SnapshotStore::new(snapshot),
            config,
        })
    }

    /// Rebuild the matrix (and similarity cache, when configured) from a fresh
    /// corpus of triples and swap it in atomically.
    pub fn refresh(&self, entries: &[RatingEntry]) -> Result<()> {
        let snapshot = build_snapshot(entries, &self.config)?;
        self.store.swap(snapshot);
        Ok(())
    }

    /// Up to `n` unseen movies for the user, best predicted rating first.
    pub fn recommend(&self, user_id: UserId, n: usize) -> Vec<MovieId> {
        let snapshot = self.store.current();
        match &snapshot.similarities {
            Some(cache) => {
                // One neighbor list serves every candidate: the list does not
                // depend on the movie being predicted.
                let neighbors = cache.neighbors(&snapshot.matrix, user_id, self.config.neighbor_count);
                rank_candidates(&snapshot.matrix, user_id, n, |movie_id| {
                    engine::predict_with_neighbors(&snapshot.matrix, movie_id, &neighbors)
                })
            }
            None => engine::recommend_movies(&snapshot.matrix, user_id, n, &self.config),
        }
    }

    /// Up to the configured default number of recommendations.
    pub fn recommend_default(&self, user_id: UserId) -> Vec<MovieId> {
        self.recommend(user_id, self.config.recommendation_count)
    }

    /// Predicted rating for one (user, movie) pair; `None` when no prediction
    /// is possible.
    pub fn predict(&self, user_id: UserId, movie_id: MovieId) -> Option<RatingValue> {
        let snapshot = self.store.current();
        if !snapshot.matrix.contains_user(user_id) {
            return None;
        }
        let neighbors = self.neighbors_for(&snapshot, user_id);
        engine::predict_with_neighbors(&snapshot.matrix, movie_id, &neighbors)
    }

    /// The user's neighbor list under the configured neighbor count.
    pub fn neighbors(&self, user_id: UserId) -> Vec<Neighbor> {
        let snapshot = self.store.current();
        self.neighbors_for(&snapshot, user_id)
    }

    /// Pin the current snapshot, e.g. to answer several queries consistently.
    pub fn snapshot(&self) -> Arc<EngineSnapshot> {
        self.store.current()
    }

    fn neighbors_for(&self, snapshot: &EngineSnapshot, user_id: UserId) -> Vec<Neighbor> {
        match &snapshot.similarities {
            Some(cache) => cache.neighbors(&snapshot.matrix, user_id, self.config.neighbor_count),
            None => {
                engine::nearest_neighbors(&snapshot.matrix, user_id, self.config.neighbor_count)
            }
        }
    }
}

fn build_snapshot(entries: &[RatingEntry], config: &EngineSettings) -> Result<EngineSnapshot> {
    let matrix = RatingMatrix::from_entries(entries)?;
    let similarities = config
        .precompute_similarities
        .then(|| SimilarityCache::build(&matrix));
    info!(
        "Engine snapshot ready: {} users, {} movies, cache: {}",
        matrix.user_count(),
        matrix.movie_count(),
        similarities.is_some()
    );
    Ok(EngineSnapshot {
        matrix,
        similarities,
    })
}
