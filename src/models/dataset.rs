use std::collections::HashSet;
use std::path::Path;

use super::{Movie, RatingProfile};
use crate::error::{AppResult, RecommendError};

const SAMPLE_MOVIES: &str = include_str!("../../data/movies.json");
const SAMPLE_RATINGS: &str = include_str!("../../data/ratings.json");

/// Validated, read-only catalog and rating history shared by every recommender
#[derive(Debug, Clone)]
pub struct Dataset {
    movies: Vec<Movie>,
    profiles: Vec<RatingProfile>,
}

impl Dataset {
    /// Builds a dataset, rejecting id collisions, genre-less movies and
    /// out-of-range profile ratings
    pub fn new(movies: Vec<Movie>, profiles: Vec<RatingProfile>) -> Result<Self, RecommendError> {
        let mut movie_ids = HashSet::with_capacity(movies.len());
        for movie in &movies {
            if !movie_ids.insert(movie.id) {
                return Err(RecommendError::DuplicateMovieId(movie.id));
            }
            if movie.genres.is_empty() {
                return Err(RecommendError::EmptyGenres(movie.id));
            }
        }

        let mut user_ids = HashSet::with_capacity(profiles.len());
        for profile in &profiles {
            if !user_ids.insert(profile.user_id) {
                return Err(RecommendError::DuplicateUserId(profile.user_id));
            }
            profile.validate()?;
        }

        Ok(Self { movies, profiles })
    }

    /// Parses a catalog and rating history from JSON arrays
    pub fn from_json(movies_json: &str, ratings_json: &str) -> AppResult<Self> {
        let movies: Vec<Movie> = serde_json::from_str(movies_json)?;
        let profiles: Vec<RatingProfile> = serde_json::from_str(ratings_json)?;
        Ok(Self::new(movies, profiles)?)
    }

    /// The catalog and ratings bundled with the crate
    pub fn sample() -> AppResult<Self> {
        Self::from_json(SAMPLE_MOVIES, SAMPLE_RATINGS)
    }

    /// Loads each half of the dataset from its file when a path is given,
    /// falling back to the bundled sample otherwise
    pub fn load(catalog_path: Option<&Path>, ratings_path: Option<&Path>) -> AppResult<Self> {
        let movies_json = match catalog_path {
            Some(path) => std::fs::read_to_string(path)?,
            None => SAMPLE_MOVIES.to_string(),
        };
        let ratings_json = match ratings_path {
            Some(path) => std::fs::read_to_string(path)?,
            None => SAMPLE_RATINGS.to_string(),
        };

        let dataset = Self::from_json(&movies_json, &ratings_json)?;

        tracing::info!(
            movies = dataset.movies.len(),
            profiles = dataset.profiles.len(),
            catalog = ?catalog_path,
            ratings = ?ratings_path,
            "Dataset loaded"
        );

        Ok(dataset)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn profiles(&self) -> &[RatingProfile] {
        &self.profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::Ratings;

    fn movie(id: u32, genres: &[&str]) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            year: 2000,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            director: "Someone".to_string(),
            rating: 7.0,
            description: String::new(),
        }
    }

    #[test]
    fn test_sample_dataset_is_valid() {
        let dataset = Dataset::sample().unwrap();
        assert_eq!(dataset.movies().len(), 20);
        assert_eq!(dataset.profiles().len(), 8);
    }

    #[test]
    fn test_duplicate_movie_id_rejected() {
        let result = Dataset::new(vec![movie(1, &["Drama"]), movie(1, &["Comedy"])], vec![]);
        assert_eq!(result.unwrap_err(), RecommendError::DuplicateMovieId(1));
    }

    #[test]
    fn test_empty_genres_rejected() {
        let result = Dataset::new(vec![movie(4, &[])], vec![]);
        assert_eq!(result.unwrap_err(), RecommendError::EmptyGenres(4));
    }

    #[test]
    fn test_profile_rating_out_of_range_rejected() {
        let profiles = vec![RatingProfile::new(1, Ratings::from([(1, 9.0)]))];
        let result = Dataset::new(vec![movie(1, &["Drama"])], profiles);
        assert!(matches!(
            result,
            Err(RecommendError::RatingOutOfRange {
                movie_id: 1,
                rating: 9.0
            })
        ));
    }

    #[test]
    fn test_duplicate_user_rejected() {
        let profiles = vec![
            RatingProfile::new(2, Ratings::from([(1, 3.0)])),
            RatingProfile::new(2, Ratings::from([(1, 4.0)])),
        ];
        let result = Dataset::new(vec![movie(1, &["Drama"])], profiles);
        assert_eq!(result.unwrap_err(), RecommendError::DuplicateUserId(2));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = Dataset::from_json("[{\"id\": 1}]", "[]");
        assert!(matches!(result, Err(AppError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Dataset::load(Some(Path::new("/nonexistent/movies.json")), None);
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
