//! Shared HTTP request pipeline.
//!
//! ARCHITECTURE
//! ============
//! One `reqwest::Client` (base URL + static timeout) wrapped by two stages:
//!
//! - outbound: attach `Authorization: Bearer <token>` when the session holds
//!   a non-empty token, otherwise send the request untouched;
//! - inbound: unwrap the `{code, data, message}` envelope, or turn a failure
//!   into a `ClientError` after surfacing it exactly once.
//!
//! Classification (`classify_response`) is pure; side effects (notify, clear
//! session, navigate) happen only in `ApiClient::settle`.
//!
//! TRADE-OFFS
//! ==========
//! No retries, no backoff, no request deduplication. A failed call is reported
//! to the user and returned to the caller immediately.

use std::sync::Arc;
use std::time::Duration;

use envelope::{ApplicationError, FALLBACK_MESSAGE, Outcome};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::state::session::SessionStore;
use crate::util::auth::redirect_to_login;
use crate::util::notify::{Navigator, Notifier, TracingNavigator, TracingNotifier};

pub const NETWORK_ERROR_MESSAGE: &str = "Network error, please check your connection";
pub const TIMEOUT_MESSAGE: &str = "Request timed out, please try again later";

// =============================================================================
// REQUEST DESCRIPTOR
// =============================================================================

/// Verb, path, query and body of one call. Paths are relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// When false a 401 is returned as [`ClientError::Unauthorized`] without
    /// clearing the session or navigating.
    pub redirect_on_unauthorized: bool,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, redirect_on_unauthorized: true }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Leave 401 handling to the caller.
    #[must_use]
    pub fn without_login_redirect(mut self) -> Self {
        self.redirect_on_unauthorized = false;
        self
    }

    /// Append query parameters from any serializable record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] when `query` cannot be serialized.
    pub fn with_query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self, ClientError> {
        let value = serde_json::to_value(query).map_err(|e| ClientError::Encode(e.to_string()))?;
        self.query.extend(query_pairs(&value));
        Ok(self)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Encode`] when `body` cannot be serialized.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body).map_err(|e| ClientError::Encode(e.to_string()))?);
        Ok(self)
    }
}

/// Flatten a JSON object into query pairs. `null` fields are skipped, arrays
/// repeat the key, nested objects are sent as JSON text.
pub(crate) fn query_pairs(value: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = value else {
        return Vec::new();
    };
    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                pairs.extend(
                    items
                        .iter()
                        .filter(|item| !item.is_null())
                        .map(|item| (key.clone(), scalar_text(item))),
                );
            }
            other => pairs.push((key.clone(), scalar_text(other))),
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Header value for the outbound stage; `None` means send no header.
pub(crate) fn bearer_value(token: &str) -> Option<HeaderValue> {
    if token.is_empty() {
        return None;
    }
    match HeaderValue::from_str(&format!("Bearer {token}")) {
        Ok(mut value) => {
            value.set_sensitive(true);
            Some(value)
        }
        Err(error) => {
            tracing::warn!(%error, "stored token is not a valid header value; sending without it");
            None
        }
    }
}

// =============================================================================
// INBOUND CLASSIFICATION
// =============================================================================

/// What a response means, before any side effect.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Inbound {
    Data(Value),
    Application(ApplicationError),
    Malformed(String),
    Unauthorized,
    Http { status: u16, message: Option<String> },
}

pub(crate) fn classify_response(status: u16, body: &str) -> Inbound {
    if status == 401 {
        return Inbound::Unauthorized;
    }
    if !(200..300).contains(&status) {
        return Inbound::Http { status, message: envelope::message_of(body) };
    }
    match envelope::decode(body) {
        Ok(Outcome::Success(data)) => Inbound::Data(data),
        Ok(Outcome::Failure(err)) => Inbound::Application(err),
        Err(err) => Inbound::Malformed(err.to_string()),
    }
}

/// Generic message for a non-2xx status without a server message.
#[must_use]
pub fn http_failure_message(status: u16) -> String {
    format!("Request failed with status {status}")
}

// =============================================================================
// CLIENT
// =============================================================================

/// The shared client every API module calls through. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build the shared client around an existing session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(
        config: ClientConfig,
        session: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ClientError::HttpClientBuild(e.to_string()))?;
        tracing::debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "api client ready");
        Ok(Self { inner: Arc::new(Inner { http, config, session, notifier, navigator }) })
    }

    /// Build with `tracing`-backed notification and navigation.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn with_tracing(config: ClientConfig, session: Arc<SessionStore>) -> Result<Self, ClientError> {
        Self::new(config, session, Arc::new(TracingNotifier), Arc::new(TracingNavigator))
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Run one request through both stages.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Application`] for a non-zero envelope code
    /// - [`ClientError::Unauthorized`] for HTTP 401 (session already cleared)
    /// - [`ClientError::Http`] for any other non-2xx status
    /// - [`ClientError::Transport`] when no response arrived
    /// - [`ClientError::Decode`] for a 2xx body that is not JSON
    pub async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = self.inner.config.url(&request.path);
        tracing::debug!(method = %request.method, %url, "api request");

        let response = match self.outbound(&request, &url).send().await {
            Ok(response) => response,
            Err(err) => return Err(self.transport_failure(err)),
        };
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => return Err(self.transport_failure(err)),
        };

        let inbound = classify_response(status, &body);
        if inbound == Inbound::Unauthorized && !request.redirect_on_unauthorized {
            tracing::debug!(path = %request.path, "unauthorized response left to caller");
            return Err(ClientError::Unauthorized);
        }
        self.settle(inbound)
    }

    /// [`ApiClient::send`], then deserialize `data` into `T`.
    ///
    /// # Errors
    ///
    /// Everything [`ApiClient::send`] returns, plus [`ClientError::Decode`]
    /// when `data` does not match `T`.
    pub async fn send_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let data = self.send(request).await?;
        serde_json::from_value(data).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.send(ApiRequest::get(path)).await
    }

    /// `GET path?query`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get_with<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<Value, ClientError> {
        self.send(ApiRequest::get(path).with_query(query)?).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        self.send(ApiRequest::post(path).with_json(body)?).await
    }

    /// `POST path` without a body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post_empty(&self, path: &str) -> Result<Value, ClientError> {
        self.send(ApiRequest::post(path)).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ClientError> {
        self.send(ApiRequest::put(path).with_json(body)?).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.send(ApiRequest::delete(path)).await
    }

    // -------------------------------------------------------------------------
    // stages
    // -------------------------------------------------------------------------

    fn outbound(&self, request: &ApiRequest, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self.inner.http.request(request.method.clone(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        match bearer_value(&self.inner.session.token()) {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }

    pub(crate) fn settle(&self, inbound: Inbound) -> Result<Value, ClientError> {
        match inbound {
            Inbound::Data(data) => Ok(data),
            Inbound::Application(err) => {
                tracing::warn!(code = ?err.code, message = err.display_message(), "application error");
                self.inner.notifier.error(err.display_message());
                Err(ClientError::Application(err))
            }
            Inbound::Malformed(detail) => {
                tracing::warn!(%detail, "response body is not an envelope");
                self.inner.notifier.error(FALLBACK_MESSAGE);
                Err(ClientError::Decode(detail))
            }
            Inbound::Unauthorized => {
                tracing::warn!("unauthorized response");
                redirect_to_login(
                    &self.inner.session,
                    self.inner.navigator.as_ref(),
                    &self.inner.config.login_path,
                );
                Err(ClientError::Unauthorized)
            }
            Inbound::Http { status, message } => {
                let message = message.unwrap_or_else(|| http_failure_message(status));
                tracing::warn!(status, %message, "http error");
                self.inner.notifier.error(&message);
                Err(ClientError::Http { status, message })
            }
        }
    }

    fn transport_failure(&self, err: reqwest::Error) -> ClientError {
        tracing::warn!(error = %err, "transport error");
        let message = if err.is_timeout() { TIMEOUT_MESSAGE } else { NETWORK_ERROR_MESSAGE };
        self.inner.notifier.error(message);
        ClientError::Transport(err)
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
