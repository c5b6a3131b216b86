use std::sync::{Arc, PoisonError, RwLock};

use log::info;

use crate::engine::SimilarityCache;
use crate::matrix::RatingMatrix;

/// One immutable view of the rating data plus everything derived from it.
#[derive(Debug)]
pub struct EngineSnapshot {
    pub matrix: RatingMatrix,
    pub similarities: Option<SimilarityCache>,
}

/// Holds the current snapshot and replaces it atomically on refresh.
///
/// Readers clone the `Arc` and keep computing against the snapshot they
/// grabbed; a concurrent swap never mutates data under them. In-place partial
/// updates are impossible by construction since snapshots are immutable.
pub struct SnapshotStore {
    current: RwLock<Arc<EngineSnapshot>>,
}

impl SnapshotStore {
    pub fn new(snapshot: EngineSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The snapshot current at call time.
    pub fn current(&self) -> Arc<EngineSnapshot> {
        // A poisoned lock only ever guards a fully-built Arc, so recover it.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a freshly built snapshot.
    pub fn swap(&self, snapshot: EngineSnapshot) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(snapshot);
        info!("Swapped in new rating snapshot");
    }
}
