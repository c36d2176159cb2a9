/// Red Planet Gallery: daily-cached NASA imagery served as one HTML page
mod clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod repo;
mod routes;
mod services;
mod utils;
mod views;

use crate::clients::NasaClient;
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::repo::JsonFileStore;
use crate::routes::build_router;
use crate::services::GalleryService;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    let nasa_client = NasaClient::new(
        config.nasa_api_url.clone(),
        config.nasa_api_key.clone(),
        config.http_timeout,
    )?;
    let store = JsonFileStore::new(config.cache_path.clone());
    info!("Using cache file {}", store.path().display());

    // Snapshot is read once here and refreshed lazily by requests
    let gallery = GalleryService::load(
        Arc::new(nasa_client),
        Arc::new(store),
        config.refresh.clone(),
    )
    .await;

    let state = AppState {
        gallery: Arc::new(gallery),
    };
    let app = build_router(state, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on {}", addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
