use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use habitlog_core::AppConfig;
use habitlog_http::{AppState, create_router};
use habitlog_storage::Storage;

pub(crate) async fn run(db_path: PathBuf, host: &str, port: u16) -> Result<()> {
    let config = AppConfig { db_path, ..AppConfig::from_env()? };
    tracing::info!(?config, "Loaded configuration");

    let storage = Arc::new(Storage::with_pool_size(&config.db_path, config.db_pool_size)?);
    let state = Arc::new(AppState::new(storage, &config)?);

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
