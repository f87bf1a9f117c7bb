//! Development server configuration.
//!
//! DESIGN
//! ======
//! Every knob has a default that matches the front end's local setup, so a
//! bare `campus-dev` serves `dist/` on 5173 and forwards `/api` to a backend
//! on 8080. `.env` is loaded before the environment is read.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5173;
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_PROXY_PREFIX: &str = "/api";
pub const DEFAULT_STATIC_DIR: &str = "dist";
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port `{0}`")]
    InvalidPort(String),
    #[error("backend URL must be absolute http(s): `{0}`")]
    InvalidBackendUrl(String),
    #[error("proxy prefix must start with `/` and not be `/` alone: `{0}`")]
    InvalidPrefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevServerConfig {
    pub port: u16,
    /// Backend origin, no trailing slash.
    pub backend_url: String,
    /// Path prefix routed to the backend, no trailing slash.
    pub proxy_prefix: String,
    /// Drop `proxy_prefix` from the forwarded path.
    pub strip_prefix: bool,
    pub static_dir: PathBuf,
    pub proxy_timeout_secs: u64,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backend_url: DEFAULT_BACKEND_URL.to_owned(),
            proxy_prefix: DEFAULT_PROXY_PREFIX.to_owned(),
            strip_prefix: false,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            proxy_timeout_secs: DEFAULT_PROXY_TIMEOUT_SECS,
        }
    }
}

impl DevServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `CAMPUS_DEV_PORT` (default 5173)
    /// - `CAMPUS_DEV_BACKEND_URL` (default `http://127.0.0.1:8080`)
    /// - `CAMPUS_DEV_PROXY_PREFIX` (default `/api`)
    /// - `CAMPUS_DEV_STRIP_PREFIX` (`1`/`true` to enable)
    /// - `CAMPUS_DEV_STATIC_DIR` (default `dist`)
    /// - `CAMPUS_DEV_PROXY_TIMEOUT_SECS` (default 30)
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an unparsable port, a relative backend
    /// URL, or a malformed prefix.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`DevServerConfig::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`DevServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("CAMPUS_DEV_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let backend_url = match lookup("CAMPUS_DEV_BACKEND_URL") {
            Some(raw) => normalize_backend_url(&raw)?,
            None => defaults.backend_url,
        };

        let proxy_prefix = match lookup("CAMPUS_DEV_PROXY_PREFIX") {
            Some(raw) => normalize_prefix(&raw)?,
            None => defaults.proxy_prefix,
        };

        let strip_prefix = lookup("CAMPUS_DEV_STRIP_PREFIX")
            .is_some_and(|raw| matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        let static_dir = lookup("CAMPUS_DEV_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from);

        let proxy_timeout_secs = lookup("CAMPUS_DEV_PROXY_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(defaults.proxy_timeout_secs);

        Ok(Self { port, backend_url, proxy_prefix, strip_prefix, static_dir, proxy_timeout_secs })
    }
}

fn normalize_backend_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::InvalidBackendUrl(raw.to_owned()))
    }
}

fn normalize_prefix(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with('/') && trimmed.len() > 1 {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::InvalidPrefix(raw.to_owned()))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
