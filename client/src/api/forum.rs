//! Forum post and comment endpoints.

use serde::Serialize;
use serde_json::Value;

use super::segment;
use crate::error::ClientError;
use crate::net::pipeline::ApiClient;
use crate::net::types::{CommentRequest, PageQuery, PostQuery};

pub(crate) const POSTS: &str = "/forum/posts";
pub(crate) const FORUM_CATEGORIES: &str = "/forum/categories";

pub(crate) fn post_endpoint(id: &str) -> String {
    format!("/forum/posts/{}", segment(id))
}

pub(crate) fn like_endpoint(id: &str) -> String {
    format!("/forum/posts/{}/like", segment(id))
}

pub(crate) fn comments_endpoint(id: &str) -> String {
    format!("/forum/posts/{}/comments", segment(id))
}

/// `GET /forum/posts`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn list_posts(client: &ApiClient, query: &PostQuery) -> Result<Value, ClientError> {
    client.get_with(POSTS, query).await
}

/// `GET /forum/posts/{id}`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn get_post(client: &ApiClient, id: &str) -> Result<Value, ClientError> {
    client.get(&post_endpoint(id)).await
}

/// `POST /forum/posts`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn create_post<B: Serialize + ?Sized>(client: &ApiClient, post: &B) -> Result<Value, ClientError> {
    client.post(POSTS, post).await
}

/// `PUT /forum/posts/{id}`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn update_post<B: Serialize + ?Sized>(client: &ApiClient, id: &str, post: &B) -> Result<Value, ClientError> {
    client.put(&post_endpoint(id), post).await
}

/// `DELETE /forum/posts/{id}`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn delete_post(client: &ApiClient, id: &str) -> Result<Value, ClientError> {
    client.delete(&post_endpoint(id)).await
}

/// `POST /forum/posts/{id}/like`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn like_post(client: &ApiClient, id: &str) -> Result<Value, ClientError> {
    client.post_empty(&like_endpoint(id)).await
}

/// `GET /forum/posts/{id}/comments`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn list_comments(client: &ApiClient, id: &str, page: &PageQuery) -> Result<Value, ClientError> {
    client.get_with(&comments_endpoint(id), page).await
}

/// `POST /forum/posts/{id}/comments`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn add_comment(client: &ApiClient, id: &str, comment: &CommentRequest) -> Result<Value, ClientError> {
    client.post(&comments_endpoint(id), comment).await
}

/// `GET /forum/categories`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn forum_categories(client: &ApiClient) -> Result<Value, ClientError> {
    client.get(FORUM_CATEGORIES).await
}
