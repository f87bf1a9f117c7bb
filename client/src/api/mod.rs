//! REST API helpers, one function per backend operation.
//!
//! Each helper builds a path (interpolating a percent-encoded id or an enum
//! code where the endpoint needs one) and delegates to the shared [`ApiClient`]. Validation,
//! retries and error reporting all live in the pipeline, not here.
//!
//! [`ApiClient`]: crate::ApiClient

use std::borrow::Cow;

pub mod auth;
pub mod common;
pub mod courses;
pub mod forum;

/// Percent-encode one path segment so an id containing `/`, `?` or `#` stays
/// inside its own segment.
pub(crate) fn segment(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}
