pub mod catalog;
pub mod collaborative;
pub mod content;
pub mod hybrid;
pub mod recommender;

pub use catalog::CatalogQueryService;
pub use collaborative::CollaborativeFilteringEngine;
pub use content::ContentSimilarityEngine;
pub use hybrid::HybridRanker;
pub use recommender::Recommender;

use crate::error::RecommendError;

/// Rejects a zero-length result request
fn ensure_count(count: usize) -> Result<(), RecommendError> {
    if count == 0 {
        return Err(RecommendError::InvalidCount);
    }
    Ok(())
}

/// Converts a fraction in [0, 1] to a whole percentage, rounding half up
fn to_percentage(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Rounds to one decimal place, half up
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
