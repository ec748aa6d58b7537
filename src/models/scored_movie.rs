use serde::{Deserialize, Serialize};

use super::Movie;

/// Which strategy produced a recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecommendationMethod {
    Content,
    Collaborative,
    Hybrid,
}

/// A movie returned by one of the recommenders, with the scores that ranked it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMovie {
    #[serde(flatten)]
    pub movie: Movie,
    /// Percentage in [0, 100]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<u8>,
    /// Predicted star rating in [1, 5], one decimal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<RecommendationMethod>,
}

impl ScoredMovie {
    pub fn with_similarity(movie: Movie, similarity_score: u8) -> Self {
        Self {
            movie,
            similarity_score: Some(similarity_score),
            predicted_rating: None,
            method: None,
        }
    }

    pub fn id(&self) -> super::MovieId {
        self.movie.id
    }

    /// Similarity score, treating a missing score as zero
    pub fn score(&self) -> u8 {
        self.similarity_score.unwrap_or(0)
    }
}
