use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::MovieId;
use crate::error::RecommendError;

/// Identifier for a historical user in the rating dataset
pub type UserId = u32;

/// Lowest star rating a user can give
pub const MIN_RATING: f64 = 1.0;
/// Highest star rating a user can give
pub const MAX_RATING: f64 = 5.0;

/// Movie id to star rating, half stars allowed. Ordered by id so iteration
/// is deterministic.
pub type Ratings = BTreeMap<MovieId, f64>;

/// One historical user's ratings, loaded once with the dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingProfile {
    pub user_id: UserId,
    pub ratings: Ratings,
}

impl RatingProfile {
    pub fn new(user_id: UserId, ratings: Ratings) -> Self {
        Self { user_id, ratings }
    }

    /// Checks that every rating in the profile is a valid star value
    pub fn validate(&self) -> Result<(), RecommendError> {
        validate_ratings(&self.ratings)
    }
}

/// Rejects any rating outside [`MIN_RATING`, `MAX_RATING`], NaN included
pub fn validate_ratings(ratings: &Ratings) -> Result<(), RecommendError> {
    match ratings
        .iter()
        .find(|(_, rating)| !(MIN_RATING..=MAX_RATING).contains(*rating))
    {
        Some((&movie_id, &rating)) => Err(RecommendError::RatingOutOfRange { movie_id, rating }),
        None => Ok(()),
    }
}
