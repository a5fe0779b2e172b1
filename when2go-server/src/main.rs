use std::error::Error;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use when2go_server::cache::{CacheConfig, CachedProvider};
use when2go_server::config::AppConfig;
use when2go_server::history::HistoryLog;
use when2go_server::tomtom::TomTomClient;
use when2go_server::web::{AppState, create_router};

/// Static assets shipped with the crate.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    // Create TomTom client
    let client = TomTomClient::new(config.tomtom())?;

    // Memoize geocodes and route lookups
    let provider = CachedProvider::new(client, &CacheConfig::default());

    let history = HistoryLog::new(&config.history_file);
    if !history.path().exists() {
        warn!(path = %history.path().display(), "history file does not exist yet; it will be created on the first lookup");
    }

    let state = AppState::new(provider, history, config.zone);
    let app = create_router(state, STATIC_DIR);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "when2go listening");
    info!("open http://{} in your browser for the dashboard", config.bind);
    info!("API: GET /api/plan?start=..&end=.. , GET /api/history?start=..&end=.. , GET /health");

    axum::serve(listener, app).await?;
    Ok(())
}
