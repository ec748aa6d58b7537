use std::sync::Arc;

use crate::config::Config;
use crate::services::Recommender;

/// Shared application state
///
/// The dataset never changes after startup, so handlers share it through an
/// `Arc` without any lock.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    /// Result size when a request omits `count`
    pub default_count: usize,
    /// Movies offered for rating when a request omits `count`
    pub sample_size: usize,
}

impl AppState {
    /// Creates application state from a loaded recommender and the request defaults in `config`
    pub fn new(recommender: Recommender, config: &Config) -> Self {
        Self {
            recommender: Arc::new(recommender),
            default_count: config.default_recommendation_count,
            sample_size: config.rating_sample_size,
        }
    }
}
