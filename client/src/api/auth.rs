//! Login, logout and current-user calls. These are the only API helpers that
//! write to the session.

use serde_json::Value;

use crate::error::ClientError;
use crate::net::pipeline::{ApiClient, ApiRequest};
use crate::net::types::{LoginRequest, LoginResponse};

pub(crate) const LOGIN: &str = "/auth/login";
pub(crate) const LOGOUT: &str = "/auth/logout";
pub(crate) const CURRENT_USER: &str = "/auth/me";

/// Log in via `POST /auth/login` and store the returned token and profile.
///
/// # Errors
///
/// Returns the pipeline error, [`ClientError::Decode`] if `data` has no
/// token, or [`ClientError::Storage`] if the session cannot be persisted.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
    let response: LoginResponse = client.send_as(ApiRequest::post(LOGIN).with_json(request)?).await?;
    if response.token.is_empty() {
        return Err(ClientError::Decode("login response carried an empty token".to_owned()));
    }
    client.session().login(response.token.clone(), response.user.clone())?;
    tracing::info!(username = %request.username, "logged in");
    Ok(response)
}

/// Log out via `POST /auth/logout`.
///
/// The local session is cleared whatever the server says; a server-side
/// failure is only logged. A 401 here means the token had already expired,
/// so it does not trigger the login redirect.
///
/// # Errors
///
/// Returns [`ClientError::Storage`] if the persisted session cannot be removed.
pub async fn logout(client: &ApiClient) -> Result<(), ClientError> {
    if client.session().is_authenticated() {
        match client.send(ApiRequest::post(LOGOUT).without_login_redirect()).await {
            Ok(_) => {}
            Err(ClientError::Unauthorized) => tracing::debug!("server session already expired"),
            Err(error) => tracing::warn!(%error, "server logout failed; clearing local session anyway"),
        }
    }
    client.session().logout()?;
    tracing::info!("logged out");
    Ok(())
}

/// Fetch the current user from `GET /auth/me` and refresh the stored profile.
///
/// # Errors
///
/// Returns the pipeline error, or [`ClientError::Storage`] if the profile
/// cannot be persisted.
pub async fn current_user(client: &ApiClient) -> Result<Value, ClientError> {
    let profile = client.get(CURRENT_USER).await?;
    client.session().set_profile(profile.clone())?;
    Ok(profile)
}
