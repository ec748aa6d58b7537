use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{CatalogStatistics, Movie, MovieId, Ratings, ScoredMovie};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    pub q: Option<String>,
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CollaborativeRequest {
    pub ratings: Ratings,
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridRequest {
    pub movie_id: MovieId,
    #[serde(default)]
    pub ratings: Ratings,
    pub count: Option<usize>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List the catalog, optionally narrowed by title search and genre
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<BrowseQuery>,
) -> Json<Vec<Movie>> {
    let movies = state
        .recommender
        .catalog()
        .browse(params.q.as_deref(), params.genre.as_deref());
    Json(movies.into_iter().cloned().collect())
}

/// Search titles
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<Movie>> {
    let movies = state.recommender.catalog().search(&params.q);
    tracing::debug!(query = %params.q, matches = movies.len(), "Title search");
    Json(movies.into_iter().cloned().collect())
}

/// Random movies for a new user to rate
pub async fn sample_movies(
    State(state): State<AppState>,
    Query(params): Query<CountQuery>,
) -> Json<Vec<Movie>> {
    let count = params.count.unwrap_or(state.sample_size);
    let movies: Vec<Movie> = {
        let mut rng = rand::thread_rng();
        state
            .recommender
            .catalog()
            .sample_for_rating(count, &mut rng)
            .into_iter()
            .cloned()
            .collect()
    };
    Json(movies)
}

/// Get a single movie
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<Movie>> {
    state
        .recommender
        .catalog()
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Movie {}", id)))
}

/// Distinct genres, sorted
pub async fn list_genres(State(state): State<AppState>) -> Json<Vec<String>> {
    let genres = state.recommender.catalog().genres();
    Json(genres.into_iter().map(str::to_string).collect())
}

/// Catalog statistics
pub async fn statistics(State(state): State<AppState>) -> Json<CatalogStatistics> {
    Json(state.recommender.catalog().statistics())
}

/// Movies similar to the given one
pub async fn content_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<MovieId>,
    Query(params): Query<CountQuery>,
) -> AppResult<Json<Vec<ScoredMovie>>> {
    let count = params.count.unwrap_or(state.default_count);
    let recs = state.recommender.recommend_by_content(id, count)?;

    tracing::info!(
        request_id = %request_id,
        movie_id = id,
        returned = recs.len(),
        "Content recommendations served"
    );

    Ok(Json(recs))
}

/// Movies predicted from users with similar ratings
pub async fn collaborative_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<CollaborativeRequest>,
) -> AppResult<Json<Vec<ScoredMovie>>> {
    let count = request.count.unwrap_or(state.default_count);
    let recs = state
        .recommender
        .recommend_collaborative(&request.ratings, count)
        .inspect_err(|e| tracing::warn!(request_id = %request_id, error = %e, "Rejected ratings"))?;

    tracing::info!(
        request_id = %request_id,
        rated = request.ratings.len(),
        returned = recs.len(),
        "Collaborative recommendations served"
    );

    Ok(Json(recs))
}

/// Content and collaborative recommendations blended
pub async fn hybrid_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<HybridRequest>,
) -> AppResult<Json<Vec<ScoredMovie>>> {
    let count = request.count.unwrap_or(state.default_count);
    let recs = state
        .recommender
        .recommend_hybrid(request.movie_id, &request.ratings, count)
        .inspect_err(|e| tracing::warn!(request_id = %request_id, error = %e, "Rejected ratings"))?;

    tracing::info!(
        request_id = %request_id,
        movie_id = request.movie_id,
        rated = request.ratings.len(),
        returned = recs.len(),
        "Hybrid recommendations served"
    );

    Ok(Json(recs))
}
