//! Client configuration parsed from environment variables.

use std::path::PathBuf;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_STORAGE_FILE: &str = ".campus/storage.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Absolute base URL every API path is appended to, without trailing `/`.
    pub base_url: String,
    /// Whole-request timeout in milliseconds.
    pub timeout_ms: u64,
    pub connect_timeout_secs: u64,
    /// Location of the persisted session file.
    pub storage_path: PathBuf,
    /// Entry point navigated to when the server answers 401.
    pub login_path: String,
}

/// Same defaults as [`ClientConfig::from_env`] with no `CAMPUS_*` variables
/// set; the storage file still lives under `$HOME` when it is known.
impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            storage_path: default_storage_path(std::env::var("HOME").ok()),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `CAMPUS_BASE_URL`: default `http://127.0.0.1:8080/api`
    /// - `CAMPUS_TIMEOUT_MS`: default 10000
    /// - `CAMPUS_CONNECT_TIMEOUT_SECS`: default 10
    /// - `CAMPUS_STORAGE_PATH`: default `$HOME/.campus/storage.json`, or
    ///   `.campus/storage.json` relative to the working directory without `HOME`
    /// - `CAMPUS_LOGIN_PATH`: default `/login`
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the base URL is not absolute.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the base URL is not absolute.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = normalize_base_url(
            lookup("CAMPUS_BASE_URL")
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL),
        )?;
        let timeout_ms = parse_u64(lookup("CAMPUS_TIMEOUT_MS"), DEFAULT_TIMEOUT_MS);
        let connect_timeout_secs =
            parse_u64(lookup("CAMPUS_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS);
        let storage_path = lookup("CAMPUS_STORAGE_PATH").map_or_else(
            || default_storage_path(lookup("HOME")),
            PathBuf::from,
        );
        let login_path = lookup("CAMPUS_LOGIN_PATH")
            .filter(|path| path.starts_with('/'))
            .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_owned());

        Ok(Self { base_url, timeout_ms, connect_timeout_secs, storage_path, login_path })
    }

    /// Join an API path onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::Config(format!("CAMPUS_BASE_URL must be absolute: {raw}")));
    }
    Ok(trimmed.to_owned())
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    match raw.as_deref().map(|v| v.trim().parse::<u64>()) {
        Some(Ok(value)) => value,
        _ => default,
    }
}

fn default_storage_path(home: Option<String>) -> PathBuf {
    match home {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(DEFAULT_STORAGE_FILE),
        _ => PathBuf::from(DEFAULT_STORAGE_FILE),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
