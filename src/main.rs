use std::time::Duration;

use anyhow::Context;

use fee_tracker::config::AppConfig;
use fee_tracker::database::connection::connect_store;
use fee_tracker::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    tracing::info!("Store backend: {}", config.store_backend);

    let store = connect_store(&config)
        .await
        .context("failed to connect to the document store")?;

    let addr = config.bind_address();
    let state = AppState::new(config, store);
    state.sessions.spawn_reaper(Duration::from_secs(60));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!("Server starting on {}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
