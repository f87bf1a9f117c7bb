//! Client error type.

use envelope::ApplicationError;

use crate::util::storage::StorageError;

/// Errors produced by the request pipeline and the API modules.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-zero envelope code.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// The server answered HTTP 401; the session has been cleared.
    #[error("unauthorized: session cleared, please log in again")]
    Unauthorized,

    /// The server answered with another non-success HTTP status.
    #[error("http status {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (connect, timeout, body read).
    #[error("transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx body, or its `data`, did not have the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// A request parameter could not be serialized.
    #[error("invalid request parameters: {0}")]
    Encode(String),

    /// Persisted session storage failed.
    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Config(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ClientError {
    /// HTTP status carried by the error, where there is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
