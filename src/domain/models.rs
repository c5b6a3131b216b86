use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type MovieId = i64;
pub type RatingValue = f64;

/// One (user, movie, rating) triple from the rating store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: RatingValue,
}

impl RatingEntry {
    pub fn new(user_id: UserId, movie_id: MovieId, rating: RatingValue) -> Self {
        Self {
            user_id,
            movie_id,
            rating,
        }
    }
}

/// One element of a neighbor list: another user and its similarity score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub user_id: UserId,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_entry_round_trips_through_json() {
        let entry = RatingEntry::new(1, 10, 4.5);
        let json = serde_json::to_string(&entry).unwrap();
        let back: RatingEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_neighbor_serializes_user_and_score() {
        let neighbor = Neighbor {
            user_id: 7,
            score: 0.5,
        };
        let json = serde_json::to_string(&neighbor).unwrap();
        assert!(json.contains("\"user_id\":7"));
        assert!(json.contains("\"score\":0.5"));
    }
}
