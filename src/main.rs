// Main entry point - Dependency injection and server setup
use std::sync::Arc;

use fitdash::application::fitness_repository::FitnessRepository;
use fitdash::infrastructure::config::load_app_config;
use fitdash::infrastructure::memory_store::{LayoutUpsert, MemoryStore};
use fitdash::presentation::app_state::AppState;
use fitdash::presentation::router::build_router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create store (infrastructure layer)
    let layout_upsert = LayoutUpsert::from_legacy_flag(config.store.legacy_layout_upsert);
    if layout_upsert == LayoutUpsert::TimestampOnly {
        tracing::warn!("Legacy layout upsert enabled: saves for existing layouts only refresh updatedAt");
    }
    let repository: Arc<dyn FitnessRepository> = if config.store.seed_demo_data {
        Arc::new(MemoryStore::with_demo_data(layout_upsert))
    } else {
        Arc::new(MemoryStore::new(layout_upsert))
    };

    // Create services and application state
    let state = AppState::new(repository);

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr = config.server.socket_addr()?;
    tracing::info!("Starting fitdash service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
