pub mod config;
pub mod domain;
pub mod engine;
pub mod matrix;
pub mod services;

pub use config::EngineSettings;
pub use domain::{MovieId, Neighbor, RatingEntry, RatingValue, UserId};
pub use engine::{
    Similarity, nearest_neighbors, pearson_similarity, predict_rating, recommend_movies,
};
pub use matrix::{EngineSnapshot, RatingMatrix, SnapshotStore};
pub use services::RecommendationService;
