pub mod models;

pub use models::{MovieId, Neighbor, RatingEntry, RatingValue, UserId};
