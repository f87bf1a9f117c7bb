//! Request-side wire types.
//!
//! Response payloads stay opaque `serde_json::Value`; only the records the
//! client itself builds, plus the login response it has to read, are typed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{CourseStatus, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PostStatus, Weekday};

/// Pagination parameters shared by every list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl PageQuery {
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page: page.max(1), page_size }
    }
}

/// Filters for `GET /courses`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<String>,
}

impl CourseQuery {
    #[must_use]
    pub fn with_status(mut self, status: CourseStatus) -> Self {
        self.status = Some(status.code());
        self
    }

    #[must_use]
    pub fn with_weekday(mut self, weekday: Weekday) -> Self {
        self.weekday = Some(weekday.code());
        self
    }
}

/// Filters for `GET /forum/posts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    #[serde(flatten)]
    pub page: PageQuery,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
}

impl PostQuery {
    #[must_use]
    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status.code());
        self
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `data` of a successful `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, alias = "userInfo")]
    pub user: Value,
}

/// Body of `POST /forum/posts/{id}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
