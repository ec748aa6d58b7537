mod dataset;
mod movie;
mod rating;
mod scored_movie;

pub use dataset::Dataset;
pub use movie::{Movie, MovieId};
pub use rating::{validate_ratings, RatingProfile, Ratings, UserId, MAX_RATING, MIN_RATING};
pub use scored_movie::{RecommendationMethod, ScoredMovie};

use serde::{Deserialize, Serialize};

/// Aggregate figures describing the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatistics {
    pub total_movies: usize,
    pub total_genres: usize,
    /// Mean catalog rating rendered to one decimal, e.g. "7.5"
    pub average_rating: String,
}
