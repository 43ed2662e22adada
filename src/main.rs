use std::sync::Arc;

use aerocast::api::AppState;
use aerocast::{AeroCastConfig, web};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AeroCastConfig::from_env()?;
    tracing::info!(
        "Starting AeroCast v{} with model {}",
        aerocast::VERSION,
        config.model
    );

    let state = Arc::new(AppState::new(&config));
    web::run(state, config.port).await
}
