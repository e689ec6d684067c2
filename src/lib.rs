pub mod activity;
pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod folder;
pub mod profile;
pub mod state;
pub mod storage;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::Config;
use state::AppState;

pub async fn run() -> error::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("BLIO_LOG"))
        .init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "config loaded");

    let store = storage::open_store(config.store.as_deref())?;
    let app = AppState::new(store, config.sample_data);

    api::run_server(app, &config.listen).await
}
