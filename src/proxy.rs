//! `/api` reverse proxy.
//!
//! SYSTEM CONTEXT
//! ==============
//! The front end calls relative `/api/...` URLs. In development those land on
//! this server, which forwards them to the backend origin so the browser never
//! sees a cross-origin request.
//!
//! DESIGN
//! ======
//! Method, query, body and end-to-end headers pass through unchanged. `host`
//! and hop-by-hop headers are dropped in both directions. Bodies are buffered
//! whole; this is a development tool, not a streaming gateway.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::config::DevServerConfig;

/// Largest request body forwarded to the backend.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("backend unreachable: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("request body unreadable: {0}")]
    Body(String),
    #[error("failed to build http client: {0}")]
    Build(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Upstream(_) | Self::Build(_) => StatusCode::BAD_GATEWAY,
            Self::Body(_) => StatusCode::BAD_REQUEST,
        };
        tracing::warn!(error = %self, %status, "proxy failure");
        (status, self.to_string()).into_response()
    }
}

/// Forwarding target and the client used to reach it.
#[derive(Debug)]
pub struct Proxy {
    http: reqwest::Client,
    backend_url: String,
    prefix: String,
    strip_prefix: bool,
}

impl Proxy {
    /// # Errors
    ///
    /// Returns [`ProxyError::Build`] if the HTTP client cannot be constructed.
    pub fn new(config: &DevServerConfig) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.proxy_timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ProxyError::Build(e.to_string()))?;
        Ok(Self {
            http,
            backend_url: config.backend_url.clone(),
            prefix: config.proxy_prefix.clone(),
            strip_prefix: config.strip_prefix,
        })
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn target_url(&self, path: &str, query: Option<&str>) -> String {
        target_url(&self.backend_url, &self.prefix, self.strip_prefix, path, query)
    }
}

/// Backend URL for an incoming path, with the prefix optionally removed.
pub fn target_url(backend: &str, prefix: &str, strip_prefix: bool, path: &str, query: Option<&str>) -> String {
    let forwarded = if strip_prefix {
        match path.strip_prefix(prefix) {
            Some("") => "/",
            Some(rest) => rest,
            None => path,
        }
    } else {
        path
    };
    match query {
        Some(query) if !query.is_empty() => format!("{backend}{forwarded}?{query}"),
        _ => format!("{backend}{forwarded}"),
    }
}

pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Copy end-to-end headers; `host` is dropped so the backend sees its own.
fn forwardable(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_hop_by_hop(name) || *name == header::HOST || *name == header::CONTENT_LENGTH {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Axum handler for every method under the proxy prefix.
///
/// # Errors
///
/// [`ProxyError::Upstream`] (502) when the backend does not answer.
pub async fn forward(State(proxy): State<Arc<Proxy>>, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();
    let target = proxy.target_url(parts.uri.path(), parts.uri.query());
    let body: Bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    tracing::debug!(method = %parts.method, %target, "proxying");
    let upstream = proxy
        .http
        .request(parts.method, &target)
        .headers(forwardable(&parts.headers))
        .body(body)
        .send()
        .await?;

    let status = upstream.status();
    let headers = forwardable(upstream.headers());
    let bytes = upstream.bytes().await?;

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
