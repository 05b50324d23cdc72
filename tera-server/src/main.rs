use std::error::Error;
use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tera_server::config::ServerConfig;
use tera_server::graph::GraphStore;
use tera_server::teras::JsonFileSource;
use tera_server::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "tera_server=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Serve an empty graph rather than refusing to start; the refresh
    // endpoint can load the data later.
    let state = AppState::new(
        GraphStore::new(),
        JsonFileSource::new(&config.data_path),
        &config.cache,
        config.search.clone(),
    );
    if let Err(e) = state.refresh_graph().await {
        error!(error = %e, "initial graph load failed, starting empty");
    }

    if let Some(period) = config.refresh_interval {
        spawn_refresh(state.clone(), period);
    }
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, data = %config.data_path.display(), "tera planner listening");
    info!("  GET  /health");
    info!("  GET  /api/search?from=&to=&optimizeBy=");
    info!("  GET  /api/search/teras?q=");
    info!("  POST /api/_admin/refresh-graph");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Rebuild the graph every `period`.
fn spawn_refresh(state: AppState, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            if let Err(e) = state.refresh_graph().await {
                error!(error = %e, "scheduled graph refresh failed");
            }
        }
    });
}
