// Restore a user's dashboard to the default arrangement through the layout endpoint
use std::sync::Arc;

use fitdash::application::dashboard_cache::DashboardCache;
use fitdash::application::layout_gateway::LayoutGateway;
use fitdash::application::layout_sync::{LayoutSyncController, SyncState};
use fitdash::infrastructure::config::load_app_config;
use fitdash::infrastructure::http_api_client::HttpDashboardApi;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_app_config()?;
    let user_id: i32 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 1,
    };

    let api = Arc::new(HttpDashboardApi::new(config.client.base_url.clone()));
    let cache = Arc::new(DashboardCache::new(api.clone(), config.client.refetch_interval()));

    let Some(dashboard) = cache.get(user_id).await? else {
        anyhow::bail!("User {} not found", user_id);
    };
    let seed = dashboard
        .layout
        .and_then(|record| record.layout_data.as_snapshot().cloned());
    tracing::info!("User {} has a saved layout: {}", user_id, seed.is_some());

    let mut controller =
        LayoutSyncController::new(user_id, seed, api.clone(), cache.clone()).with_debounce(config.client.debounce());
    let mut state = controller.subscribe();
    controller.reset_layout();
    state.wait_for(|s| *s == SyncState::Idle).await?;

    // Write failures are dropped by the controller, so confirm against the server
    match api.fetch_layout(controller.user_id()).await? {
        Some(record) if record.layout_data.as_snapshot() == Some(controller.layouts()) => {
            tracing::info!("Layout {} reset for user {}", record.id, user_id);
            Ok(())
        }
        _ => anyhow::bail!("Layout reset for user {} was not persisted", user_id),
    }
}
