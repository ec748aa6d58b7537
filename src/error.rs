use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::models::{MovieId, UserId};

/// Errors raised by the recommendation engine for malformed input.
///
/// "Nothing to recommend" is not an error: unknown movies, empty ratings and
/// disjoint rating histories all produce empty results instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    #[error("Recommendation count must be greater than zero")]
    InvalidCount,

    #[error("Duplicate movie id {0} in catalog")]
    DuplicateMovieId(MovieId),

    #[error("Movie {0} has no genres")]
    EmptyGenres(MovieId),

    #[error("Duplicate rating profile for user {0}")]
    DuplicateUserId(UserId),

    #[error("Rating {rating} for movie {movie_id} is outside the range 1-5")]
    RatingOutOfRange { movie_id: MovieId, rating: f64 },
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Recommend(#[from] RecommendError),

    #[error("Dataset read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Recommend(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Io(_) | AppError::Json(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
