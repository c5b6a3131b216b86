pub mod neighbors;
pub mod predictor;
pub mod recommender;
pub mod similarity;
pub mod similarity_cache;

pub use neighbors::nearest_neighbors;
pub use predictor::{predict_rating, predict_with_neighbors};
pub use recommender::recommend_movies;
pub use similarity::{Similarity, pearson_similarity};
pub use similarity_cache::SimilarityCache;
