use std::cmp::Reverse;
use std::collections::HashSet;

use super::{ensure_count, to_percentage};
use crate::error::RecommendError;
use crate::models::{Movie, MovieId, ScoredMovie};

const GENRE_WEIGHT: f64 = 0.50;
const DIRECTOR_WEIGHT: f64 = 0.20;
const YEAR_WEIGHT: f64 = 0.15;
const RATING_WEIGHT: f64 = 0.15;

/// Year gap at which two movies stop sharing any era similarity
const YEAR_HORIZON: f64 = 50.0;
/// Catalog rating gap at which two movies stop sharing any quality similarity
const RATING_SPAN: f64 = 5.0;

/// Jaccard index of two genre lists, treated as sets
pub fn genre_similarity(genres_a: &[String], genres_b: &[String]) -> f64 {
    let a: HashSet<&str> = genres_a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = genres_b.iter().map(String::as_str).collect();

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }

    a.intersection(&b).count() as f64 / union as f64
}

/// Attribute similarity of two movies as a percentage in [0, 100]
///
/// Blends genre overlap (50%), same director (20%), release year proximity
/// (15%) and catalog rating proximity (15%).
pub fn movie_similarity(a: &Movie, b: &Movie) -> u8 {
    let genre = genre_similarity(&a.genres, &b.genres).clamp(0.0, 1.0);
    let director = if a.director == b.director { 1.0 } else { 0.0 };

    let year_gap = (a.year - b.year).abs() as f64;
    let era = (1.0 - year_gap / YEAR_HORIZON).clamp(0.0, 1.0);

    let rating_gap = (a.rating - b.rating).abs();
    let quality = (1.0 - rating_gap / RATING_SPAN).clamp(0.0, 1.0);

    let score = genre * GENRE_WEIGHT
        + director * DIRECTOR_WEIGHT
        + era * YEAR_WEIGHT
        + quality * RATING_WEIGHT;

    to_percentage(score)
}

/// Ranks catalog movies by attribute similarity to a target movie
pub struct ContentSimilarityEngine<'a> {
    catalog: &'a [Movie],
}

impl<'a> ContentSimilarityEngine<'a> {
    pub fn new(catalog: &'a [Movie]) -> Self {
        Self { catalog }
    }

    /// Returns up to `count` movies most similar to `target_id`, best first.
    ///
    /// An unknown target yields an empty list. Equal scores keep catalog order.
    pub fn recommend(
        &self,
        target_id: MovieId,
        count: usize,
    ) -> Result<Vec<ScoredMovie>, RecommendError> {
        ensure_count(count)?;

        let Some(target) = self.catalog.iter().find(|m| m.id == target_id) else {
            tracing::debug!(movie_id = target_id, "Content target not in catalog");
            return Ok(Vec::new());
        };

        let mut scored: Vec<ScoredMovie> = self
            .catalog
            .iter()
            .filter(|m| m.id != target_id)
            .map(|m| ScoredMovie::with_similarity(m.clone(), movie_similarity(target, m)))
            .collect();

        scored.sort_by_key(|m| Reverse(m.score()));
        scored.truncate(count);

        Ok(scored)
    }
}
