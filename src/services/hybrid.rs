use std::cmp::Reverse;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::{ensure_count, CollaborativeFilteringEngine, ContentSimilarityEngine};
use crate::error::RecommendError;
use crate::models::{Movie, MovieId, RatingProfile, Ratings, RecommendationMethod, ScoredMovie};

/// Candidates pulled from each engine before merging, independent of the
/// caller's requested count
const CANDIDATE_WIDTH: usize = 15;

const CONTENT_WEIGHT: f64 = 0.6;
const COLLABORATIVE_WEIGHT: f64 = 0.4;

/// A movie proposed by at least one engine, with each engine's weighted score
struct Candidate {
    movie: Movie,
    content: Option<f64>,
    collaborative: Option<f64>,
    predicted_rating: Option<f64>,
}

impl Candidate {
    fn new(movie: Movie) -> Self {
        Self {
            movie,
            content: None,
            collaborative: None,
            predicted_rating: None,
        }
    }

    fn method(&self) -> RecommendationMethod {
        let content = self.content.unwrap_or(0.0);
        let collaborative = self.collaborative.unwrap_or(0.0);

        match (content > 0.0, collaborative > 0.0) {
            (true, true) => RecommendationMethod::Hybrid,
            (true, false) => RecommendationMethod::Content,
            (false, true) => RecommendationMethod::Collaborative,
            // Both contributed nothing: credit the list the movie came from
            (false, false) if self.content.is_some() => RecommendationMethod::Content,
            (false, false) => RecommendationMethod::Collaborative,
        }
    }

    fn into_scored(self) -> ScoredMovie {
        let method = self.method();
        let total = self.content.unwrap_or(0.0) + self.collaborative.unwrap_or(0.0);

        ScoredMovie {
            movie: self.movie,
            similarity_score: Some(total.round().clamp(0.0, 100.0) as u8),
            predicted_rating: self.predicted_rating,
            method: Some(method),
        }
    }
}

/// Blends content similarity to a seed movie with collaborative predictions
/// for the active user (60/40)
pub struct HybridRanker<'a> {
    content: ContentSimilarityEngine<'a>,
    collaborative: CollaborativeFilteringEngine<'a>,
}

impl<'a> HybridRanker<'a> {
    pub fn new(catalog: &'a [Movie], profiles: &'a [RatingProfile]) -> Self {
        Self {
            content: ContentSimilarityEngine::new(catalog),
            collaborative: CollaborativeFilteringEngine::new(catalog, profiles),
        }
    }

    /// Merges both engines' top candidates into one list of up to `count`
    /// movies, best blended score first. Equal scores are ordered by ascending
    /// movie id. Only movies proposed by collaborative filtering alone carry a
    /// predicted rating.
    pub fn recommend(
        &self,
        movie_id: MovieId,
        active: &Ratings,
        count: usize,
    ) -> Result<Vec<ScoredMovie>, RecommendError> {
        ensure_count(count)?;

        let content_recs = self.content.recommend(movie_id, CANDIDATE_WIDTH)?;
        let collaborative_recs = self.collaborative.recommend(active, CANDIDATE_WIDTH)?;

        tracing::debug!(
            movie_id,
            content_candidates = content_recs.len(),
            collaborative_candidates = collaborative_recs.len(),
            "Merging hybrid candidates"
        );

        let mut candidates: BTreeMap<MovieId, Candidate> = BTreeMap::new();

        for rec in content_recs {
            let score = rec.score() as f64 * CONTENT_WEIGHT;
            let mut candidate = Candidate::new(rec.movie);
            candidate.content = Some(score);
            candidates.insert(candidate.movie.id, candidate);
        }

        for rec in collaborative_recs {
            let score = rec.score() as f64 * COLLABORATIVE_WEIGHT;
            match candidates.entry(rec.id()) {
                Entry::Occupied(mut entry) => entry.get_mut().collaborative = Some(score),
                Entry::Vacant(entry) => {
                    let predicted_rating = rec.predicted_rating;
                    let mut candidate = Candidate::new(rec.movie);
                    candidate.collaborative = Some(score);
                    candidate.predicted_rating = predicted_rating;
                    entry.insert(candidate);
                }
            }
        }

        let mut scored: Vec<ScoredMovie> = candidates
            .into_values()
            .map(Candidate::into_scored)
            .collect();

        scored.sort_by_key(|m| Reverse(m.score()));
        scored.truncate(count);

        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn movie(id: MovieId, genres: &[&str], year: i32, director: &str) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            year,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            director: director.to_string(),
            rating: 8.0,
            description: String::new(),
        }
    }

    fn ratings(pairs: &[(MovieId, f64)]) -> Ratings {
        pairs.iter().copied().collect()
    }

    fn create_test_catalog() -> Vec<Movie> {
        vec![
            movie(1, &["Action", "Sci-Fi"], 2010, "Nolan"),
            movie(2, &["Action", "Sci-Fi"], 2014, "Nolan"),
            movie(3, &["Drama"], 1994, "Darabont"),
            movie(4, &["Comedy"], 2007, "Mottola"),
            movie(5, &["Action"], 2012, "Miller"),
        ]
    }

    fn create_test_profiles() -> Vec<RatingProfile> {
        vec![
            RatingProfile::new(1, ratings(&[(1, 5.0), (3, 1.0), (2, 5.0), (4, 3.0)])),
            RatingProfile::new(2, ratings(&[(1, 4.0), (3, 2.0), (4, 4.0)])),
        ]
    }

    #[test]
    fn test_merges_both_sources() {
        let catalog = create_test_catalog();
        let profiles = create_test_profiles();
        let ranker = HybridRanker::new(&catalog, &profiles);
        let active = ratings(&[(1, 5.0), (3, 1.0)]);

        let recs = ranker.recommend(1, &active, 10).unwrap();

        // Content proposes 2..=5, collaborative proposes 2 and 4
        assert_eq!(recs.len(), 4);
        let by_id: HashMap<MovieId, &ScoredMovie> = recs.iter().map(|r| (r.id(), r)).collect();
        assert_eq!(by_id[&2].method, Some(RecommendationMethod::Hybrid));
        assert_eq!(by_id[&4].method, Some(RecommendationMethod::Hybrid));
        assert_eq!(by_id[&3].method, Some(RecommendationMethod::Content));
        assert_eq!(by_id[&5].method, Some(RecommendationMethod::Content));
        // Movies the content list proposed keep the content entry's fields
        assert!(by_id[&2].predicted_rating.is_none());
        assert!(by_id[&3].predicted_rating.is_none());
        assert_eq!(recs[0].id(), 2);
    }

    #[test]
    fn test_blended_score() {
        let catalog = create_test_catalog();
        let profiles = create_test_profiles();
        let ranker = HybridRanker::new(&catalog, &profiles);
        let active = ratings(&[(1, 5.0), (3, 1.0)]);

        let content = ContentSimilarityEngine::new(&catalog)
            .recommend(1, CANDIDATE_WIDTH)
            .unwrap();
        let collaborative = CollaborativeFilteringEngine::new(&catalog, &profiles)
            .recommend(&active, CANDIDATE_WIDTH)
            .unwrap();
        let content_score = content.iter().find(|r| r.id() == 2).unwrap().score() as f64;
        let collaborative_score = collaborative.iter().find(|r| r.id() == 2).unwrap().score() as f64;

        let recs = ranker.recommend(1, &active, 1).unwrap();
        let expected = (content_score * 0.6 + collaborative_score * 0.4).round() as u8;
        assert_eq!(recs[0].similarity_score, Some(expected));
    }

    #[test]
    fn test_collaborative_only_when_seed_unknown() {
        let catalog = create_test_catalog();
        let profiles = create_test_profiles();
        let ranker = HybridRanker::new(&catalog, &profiles);
        let active = ratings(&[(1, 5.0), (3, 1.0)]);

        let recs = ranker.recommend(404, &active, 10).unwrap();
        assert!(!recs.is_empty());
        assert!(recs
            .iter()
            .all(|r| r.method == Some(RecommendationMethod::Collaborative)));
        assert!(recs.iter().all(|r| r.predicted_rating.is_some()));
    }

    #[test]
    fn test_content_only_without_ratings() {
        let catalog = create_test_catalog();
        let profiles = create_test_profiles();
        let ranker = HybridRanker::new(&catalog, &profiles);

        let recs = ranker.recommend(3, &Ratings::new(), 10).unwrap();
        assert_eq!(recs.len(), catalog.len() - 1);
        assert!(recs
            .iter()
            .all(|r| r.method == Some(RecommendationMethod::Content)));
        assert!(recs.windows(2).all(|w| w[0].score() >= w[1].score()));
    }

    #[test]
    fn test_length_is_min_of_count_and_candidates() {
        let catalog = create_test_catalog();
        let profiles = create_test_profiles();
        let ranker = HybridRanker::new(&catalog, &profiles);
        let active = ratings(&[(1, 5.0), (3, 1.0)]);

        assert_eq!(ranker.recommend(1, &active, 2).unwrap().len(), 2);

        let all = ranker.recommend(1, &active, 50).unwrap();
        let distinct: HashSet<MovieId> = all.iter().map(|r| r.id()).collect();
        assert_eq!(all.len(), distinct.len());
    }

    #[test]
    fn test_ties_ordered_by_movie_id() {
        // 9 and 3 are identical, as are 10 and 4, listed out of id order
        let catalog = vec![
            movie(1, &["Action", "Sci-Fi"], 2010, "Nolan"),
            movie(9, &["Action", "Sci-Fi"], 2010, "Scott"),
            movie(3, &["Action", "Sci-Fi"], 2010, "Scott"),
            movie(10, &["Drama"], 1990, "Lean"),
            movie(4, &["Drama"], 1990, "Lean"),
        ];
        let ranker = HybridRanker::new(&catalog, &[]);

        let ids: Vec<MovieId> = ranker
            .recommend(1, &Ratings::new(), 10)
            .unwrap()
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(ids, vec![3, 9, 4, 10]);
    }

    #[test]
    fn test_nothing_to_merge() {
        let catalog = create_test_catalog();
        let profiles = create_test_profiles();
        let ranker = HybridRanker::new(&catalog, &profiles);
        assert!(ranker.recommend(404, &Ratings::new(), 5).unwrap().is_empty());
    }

    #[test]
    fn test_idempotent() {
        let catalog = create_test_catalog();
        let profiles = create_test_profiles();
        let ranker = HybridRanker::new(&catalog, &profiles);
        let active = ratings(&[(1, 5.0), (3, 1.0)]);
        assert_eq!(
            ranker.recommend(1, &active, 5).unwrap(),
            ranker.recommend(1, &active, 5).unwrap()
        );
    }

    #[test]
    fn test_zero_count_rejected() {
        let catalog = create_test_catalog();
        let ranker = HybridRanker::new(&catalog, &[]);
        assert_eq!(
            ranker.recommend(1, &Ratings::new(), 0),
            Err(RecommendError::InvalidCount)
        );
    }
}
