use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::{ensure_count, round_to_tenth, to_percentage};
use crate::error::RecommendError;
use crate::models::{
    validate_ratings, Movie, MovieId, RatingProfile, Ratings, ScoredMovie, MAX_RATING, MIN_RATING,
};

/// How many of the most similar historical users vote on predictions
const NEIGHBOR_COUNT: usize = 5;

/// Similarity of two users' tastes in [0, 1]
///
/// Pearson correlation over the movies both have rated, shifted from [-1, 1]
/// to [0, 1]. No shared movies, or no variance on either side, yields 0.
pub fn user_similarity(active: &Ratings, profile: &Ratings) -> f64 {
    let common: Vec<(f64, f64)> = active
        .iter()
        .filter_map(|(id, &a)| profile.get(id).map(|&b| (a, b)))
        .collect();

    if common.is_empty() {
        return 0.0;
    }

    let n = common.len() as f64;
    let mean_a = common.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_b = common.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut variance_a = 0.0;
    let mut variance_b = 0.0;
    for (a, b) in &common {
        let diff_a = a - mean_a;
        let diff_b = b - mean_b;
        numerator += diff_a * diff_b;
        variance_a += diff_a * diff_a;
        variance_b += diff_b * diff_b;
    }

    if variance_a == 0.0 || variance_b == 0.0 {
        return 0.0;
    }

    let correlation = numerator / (variance_a * variance_b).sqrt();
    ((correlation + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Weighted vote tally for one candidate movie
#[derive(Default)]
struct Tally {
    total_score: f64,
    total_weight: f64,
}

/// Predicts ratings for unseen movies from the users whose ratings correlate
/// best with the active user's
pub struct CollaborativeFilteringEngine<'a> {
    catalog: &'a [Movie],
    profiles: &'a [RatingProfile],
}

impl<'a> CollaborativeFilteringEngine<'a> {
    pub fn new(catalog: &'a [Movie], profiles: &'a [RatingProfile]) -> Self {
        Self { catalog, profiles }
    }

    /// The most similar profiles with their similarity, best first.
    /// Profiles with equal similarity keep dataset order.
    pub fn neighbors(&self, active: &Ratings) -> Vec<(&'a RatingProfile, f64)> {
        let mut scored: Vec<(&'a RatingProfile, f64)> = self
            .profiles
            .iter()
            .map(|profile| (profile, user_similarity(active, &profile.ratings)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(NEIGHBOR_COUNT);
        scored
    }

    /// Returns up to `count` movies the active user has not rated, ordered by
    /// predicted rating. Equal predictions are ordered by ascending movie id.
    /// Empty active ratings yield an empty list.
    pub fn recommend(
        &self,
        active: &Ratings,
        count: usize,
    ) -> Result<Vec<ScoredMovie>, RecommendError> {
        ensure_count(count)?;
        validate_ratings(active)?;

        if active.is_empty() {
            return Ok(Vec::new());
        }

        let neighbors = self.neighbors(active);
        tracing::debug!(
            neighbors = ?neighbors.iter().map(|(p, w)| (p.user_id, *w)).collect::<Vec<_>>(),
            "Selected nearest users"
        );

        // Keyed by id so the stable sort below breaks ties by ascending id
        let mut tallies: BTreeMap<MovieId, Tally> = BTreeMap::new();

        for (profile, weight) in &neighbors {
            for (&movie_id, &rating) in &profile.ratings {
                if active.contains_key(&movie_id) {
                    continue;
                }

                let tally = tallies.entry(movie_id).or_default();
                tally.total_score += rating * weight;
                tally.total_weight += weight;
            }
        }

        let movies: HashMap<MovieId, &Movie> = self.catalog.iter().map(|m| (m.id, m)).collect();

        let mut scored: Vec<ScoredMovie> = tallies
            .into_iter()
            .filter(|(_, tally)| tally.total_weight > 0.0)
            .filter_map(|(movie_id, tally)| {
                let Some(movie) = movies.get(&movie_id) else {
                    tracing::warn!(movie_id, "Rated movie missing from catalog");
                    return None;
                };

                let predicted =
                    (tally.total_score / tally.total_weight).clamp(MIN_RATING, MAX_RATING);

                Some(ScoredMovie {
                    movie: (*movie).clone(),
                    similarity_score: Some(to_percentage(predicted / MAX_RATING)),
                    predicted_rating: Some(round_to_tenth(predicted)),
                    method: None,
                })
            })
            .collect();

        scored.sort_by(|a, b| {
            b.predicted_rating
                .partial_cmp(&a.predicted_rating)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(count);

        Ok(scored)
    }
}
