pub mod rating_matrix;
pub mod snapshot;

pub use rating_matrix::RatingMatrix;
pub use snapshot::{EngineSnapshot, SnapshotStore};
