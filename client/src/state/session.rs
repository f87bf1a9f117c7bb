//! Login session for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owned by whoever builds the [`ApiClient`](crate::ApiClient) and injected
//! into it. The pipeline reads the token on every request and clears the
//! session on 401; the auth API module overwrites it on login.
//!
//! DESIGN
//! ======
//! Memory is the read path, storage is the mirror. Login and profile updates
//! reach storage before memory, so a failed write never leaves an in-memory
//! token that storage does not hold. Logout resets memory first: a session
//! that could not be removed from disk is still over for this process.

use std::sync::{Arc, PoisonError, RwLock};

use serde_json::{Map, Value};

use crate::util::storage::{Storage, StorageError, load_json, save_json};

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";

/// Token and user profile. The profile is opaque server JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub profile: Value,
}

impl Default for Session {
    fn default() -> Self {
        Self { token: String::new(), profile: Value::Object(Map::new()) }
    }
}

impl Session {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

/// Session state mirrored to persisted storage.
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    inner: RwLock<Session>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.snapshot();
        f.debug_struct("SessionStore")
            .field("authenticated", &session.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Initialize from persisted storage.
    ///
    /// Unreadable storage or a corrupt profile start the process logged out
    /// (or with an empty profile) instead of failing.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let token = match storage.get_item(TOKEN_KEY) {
            Ok(token) => token.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(%error, "failed to read persisted token");
                String::new()
            }
        };
        let profile = load_json::<Value>(storage.as_ref(), USER_KEY)
            .filter(|value| !value.is_null())
            .unwrap_or_else(|| Value::Object(Map::new()));

        tracing::debug!(authenticated = !token.is_empty(), "session loaded");
        Self { storage, inner: RwLock::new(Session { token, profile }) }
    }

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn token(&self) -> String {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).token.clone()
    }

    #[must_use]
    pub fn profile(&self) -> Value {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).profile.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).is_authenticated()
    }

    /// Overwrite token and profile after a successful login.
    ///
    /// Storage is written first and memory only once both keys are stored.
    /// If either write fails the previous token is put back, so memory and
    /// storage keep agreeing on whether a session exists.
    ///
    /// # Errors
    ///
    /// Returns the storage error that aborted the write.
    pub fn login(&self, token: impl Into<String>, profile: Value) -> Result<(), StorageError> {
        let session = Session { token: token.into(), profile };
        let previous = self.snapshot();

        let written = self
            .storage
            .set_item(TOKEN_KEY, &session.token)
            .and_then(|()| save_json(self.storage.as_ref(), USER_KEY, &session.profile));
        if let Err(error) = written {
            self.restore_token(&previous.token);
            return Err(error);
        }

        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = session;
        Ok(())
    }

    /// Replace only the profile, keeping the token. Memory changes only after
    /// the profile is stored.
    ///
    /// # Errors
    ///
    /// Returns an error when the profile cannot be persisted.
    pub fn set_profile(&self, profile: Value) -> Result<(), StorageError> {
        save_json(self.storage.as_ref(), USER_KEY, &profile)?;
        self.inner.write().unwrap_or_else(PoisonError::into_inner).profile = profile;
        Ok(())
    }

    fn restore_token(&self, token: &str) {
        let restored = if token.is_empty() {
            self.storage.remove_item(TOKEN_KEY)
        } else {
            self.storage.set_item(TOKEN_KEY, token)
        };
        if let Err(error) = restored {
            tracing::warn!(%error, "failed to restore persisted token after a failed login");
        }
    }

    /// Reset to the empty session and remove both storage keys.
    ///
    /// Both keys are removed even if the first removal fails; the first error
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered.
    pub fn logout(&self) -> Result<(), StorageError> {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Session::default();
        let token = self.storage.remove_item(TOKEN_KEY);
        let user = self.storage.remove_item(USER_KEY);
        token.and(user)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
