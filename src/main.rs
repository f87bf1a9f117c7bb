//! `campus-dev`: static front-end server with an API reverse proxy.

mod config;
mod proxy;
mod routes;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::DevServerConfig;
use crate::proxy::Proxy;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Proxy(#[from] proxy::ProxyError),
    #[error("failed to bind {address}: {source}")]
    Bind { address: String, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            eprintln!("ignoring unreadable .env: {error}");
        }
    }
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = DevServerConfig::from_env()?;
    let proxy = Arc::new(Proxy::new(&config)?);
    let app = routes::app(&config, proxy);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address: address.clone(), source })?;

    tracing::info!(
        port = config.port,
        backend = %config.backend_url,
        prefix = %config.proxy_prefix,
        static_dir = %config.static_dir.display(),
        "campus dev server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("campus dev server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
        Err(error) => tracing::warn!(%error, "failed to listen for Ctrl+C"),
    }
}
