use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            // Request ID first, so the trace span and handlers can see it
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/movies", get(handlers::list_movies))
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/sample", get(handlers::sample_movies))
        .route("/movies/:id", get(handlers::get_movie))
        .route("/genres", get(handlers::list_genres))
        .route("/statistics", get(handlers::statistics))
        // Recommendations
        .route(
            "/recommendations/content/:id",
            get(handlers::content_recommendations),
        )
        .route(
            "/recommendations/collaborative",
            post(handlers::collaborative_recommendations),
        )
        .route(
            "/recommendations/hybrid",
            post(handlers::hybrid_recommendations),
        )
}
