use super::{
    CatalogQueryService, CollaborativeFilteringEngine, ContentSimilarityEngine, HybridRanker,
};
use crate::error::RecommendError;
use crate::models::{Dataset, MovieId, Ratings, ScoredMovie};

/// Owns the immutable dataset and runs each recommendation strategy against it.
///
/// Holds no per-user state: the active user's ratings are passed into every
/// call and dropped when it returns, so a single instance can serve
/// concurrent requests without locking.
pub struct Recommender {
    dataset: Dataset,
}

impl Recommender {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn catalog(&self) -> CatalogQueryService<'_> {
        CatalogQueryService::new(self.dataset.movies())
    }

    /// Movies most similar to `movie_id` by their attributes
    pub fn recommend_by_content(
        &self,
        movie_id: MovieId,
        count: usize,
    ) -> Result<Vec<ScoredMovie>, RecommendError> {
        let recs = ContentSimilarityEngine::new(self.dataset.movies()).recommend(movie_id, count)?;
        tracing::debug!(movie_id, count, returned = recs.len(), "Content recommendations");
        Ok(recs)
    }

    /// Movies liked by users whose ratings correlate with `ratings`
    pub fn recommend_collaborative(
        &self,
        ratings: &Ratings,
        count: usize,
    ) -> Result<Vec<ScoredMovie>, RecommendError> {
        let recs = CollaborativeFilteringEngine::new(self.dataset.movies(), self.dataset.profiles())
            .recommend(ratings, count)?;
        tracing::debug!(
            rated = ratings.len(),
            count,
            returned = recs.len(),
            "Collaborative recommendations"
        );
        Ok(recs)
    }

    /// Content and collaborative candidates blended into one ranking
    pub fn recommend_hybrid(
        &self,
        movie_id: MovieId,
        ratings: &Ratings,
        count: usize,
    ) -> Result<Vec<ScoredMovie>, RecommendError> {
        let recs = HybridRanker::new(self.dataset.movies(), self.dataset.profiles())
            .recommend(movie_id, ratings, count)?;
        tracing::debug!(
            movie_id,
            rated = ratings.len(),
            count,
            returned = recs.len(),
            "Hybrid recommendations"
        );
        Ok(recs)
    }
}
