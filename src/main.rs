use reelrank::{
    api::{create_router, AppState},
    config::Config,
    models::Dataset,
    services::Recommender,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Load the catalog and rating history once; both are read-only from here on
    let dataset = Dataset::load(config.catalog_path.as_deref(), config.ratings_path.as_deref())?;
    let state = AppState::new(Recommender::new(dataset), &config);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
