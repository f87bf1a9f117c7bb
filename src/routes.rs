//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three kinds of traffic share one listener: the proxy prefix goes to the
//! backend, `/healthz` answers locally, and everything else is a static asset
//! from the build directory. Unknown asset paths fall back to `index.html` so
//! history-mode front-end routes survive a reload.

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::DevServerConfig;
use crate::proxy::{self, Proxy};

pub fn app(config: &DevServerConfig, proxy: Arc<Proxy>) -> Router {
    let prefix = proxy.prefix().to_owned();
    let index = config.static_dir.join("index.html");
    let assets = ServeDir::new(&config.static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(index));

    Router::new()
        .route("/healthz", get(healthz))
        .route(&prefix, any(proxy::forward))
        .route(&format!("{prefix}/{{*rest}}"), any(proxy::forward))
        .with_state(proxy)
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
