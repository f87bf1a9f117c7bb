//! Shared lookup lists (departments, semesters, categories, classrooms,
//! dictionaries). All read-only.

use serde_json::Value;

use super::segment;
use crate::error::ClientError;
use crate::net::pipeline::ApiClient;

pub(crate) const DEPARTMENTS: &str = "/common/departments";
pub(crate) const SEMESTERS: &str = "/common/semesters";
/// Course categories. The forum keeps its own list at a different path; the
/// two are not assumed to be the same resource.
pub(crate) const CATEGORIES: &str = "/common/categories";
pub(crate) const CLASSROOMS: &str = "/common/classrooms";

pub(crate) fn dictionary_endpoint(kind: &str) -> String {
    format!("/common/dict/{}", segment(kind))
}

/// `GET /common/departments`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn departments(client: &ApiClient) -> Result<Value, ClientError> {
    client.get(DEPARTMENTS).await
}

/// `GET /common/semesters`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn semesters(client: &ApiClient) -> Result<Value, ClientError> {
    client.get(SEMESTERS).await
}

/// `GET /common/categories`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn categories(client: &ApiClient) -> Result<Value, ClientError> {
    client.get(CATEGORIES).await
}

/// `GET /common/classrooms`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn classrooms(client: &ApiClient) -> Result<Value, ClientError> {
    client.get(CLASSROOMS).await
}

/// `GET /common/dict/{kind}`: a server-side code table such as `gender` or
/// `title`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn dictionary(client: &ApiClient, kind: &str) -> Result<Value, ClientError> {
    client.get(&dictionary_endpoint(kind)).await
}
