//! Server binary: load the artifacts, build the recommender, serve HTTP.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use catalog::CatalogStore;
use engine::AntiRecommender;
use server::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;
    info!(
        "Initializing recommender with data path: {} and model path: {}",
        settings.data_path, settings.model_path
    );

    // Load-time failures are fatal: the server must not come up with a
    // missing or inconsistent catalog
    let store = Arc::new(
        CatalogStore::load(
            Path::new(&settings.data_path),
            Path::new(&settings.model_path),
        )
        .context("Failed to load catalog artifacts")?,
    );
    let recommender = AntiRecommender::new(store);
    info!("Recommender initialized successfully");

    let app = create_router(AppState::new(recommender));
    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
