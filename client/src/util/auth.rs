//! Shared auth helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every unauthenticated response must produce identical behavior: the
//! persisted session is dropped and the caller is sent to the login entry.

use crate::state::session::SessionStore;
use crate::util::notify::Navigator;

/// Clear the session, then navigate to `login_path`.
///
/// Storage failures are logged rather than returned: the in-memory session is
/// already reset and navigation still has to happen.
pub fn redirect_to_login(session: &SessionStore, navigator: &dyn Navigator, login_path: &str) {
    if let Err(error) = session.logout() {
        tracing::warn!(%error, "failed to clear persisted session");
    }
    tracing::info!(login_path, "session cleared after unauthorized response");
    navigator.navigate(login_path);
}

/// Whether a caller should be sent to the login entry before making a call
/// that needs a session.
#[must_use]
pub fn should_redirect_unauth(session: &SessionStore) -> bool {
    !session.is_authenticated()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;
