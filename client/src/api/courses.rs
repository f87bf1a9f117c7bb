//! Course endpoints.

use serde::Serialize;
use serde_json::Value;

use super::segment;
use crate::constants::{CourseStatus, Weekday};
use crate::error::ClientError;
use crate::net::pipeline::ApiClient;
use crate::net::types::{CourseQuery, PageQuery};

pub(crate) const COURSES: &str = "/courses";
pub(crate) const MY_COURSES: &str = "/courses/mine";

pub(crate) fn course_endpoint(id: &str) -> String {
    format!("/courses/{}", segment(id))
}

pub(crate) fn course_status_endpoint(status: CourseStatus) -> String {
    format!("/courses/status/{}", status.code())
}

pub(crate) fn schedule_endpoint(day: Weekday) -> String {
    format!("/courses/schedule/{}", day.code())
}

pub(crate) fn enrollment_endpoint(id: &str) -> String {
    format!("/courses/{}/enroll", segment(id))
}

/// `GET /courses` with filters and pagination.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn list_courses(client: &ApiClient, query: &CourseQuery) -> Result<Value, ClientError> {
    client.get_with(COURSES, query).await
}

/// `GET /courses/{id}`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn get_course(client: &ApiClient, id: &str) -> Result<Value, ClientError> {
    client.get(&course_endpoint(id)).await
}

/// `POST /courses`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn create_course<B: Serialize + ?Sized>(client: &ApiClient, course: &B) -> Result<Value, ClientError> {
    client.post(COURSES, course).await
}

/// `PUT /courses/{id}`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn update_course<B: Serialize + ?Sized>(
    client: &ApiClient,
    id: &str,
    course: &B,
) -> Result<Value, ClientError> {
    client.put(&course_endpoint(id), course).await
}

/// `DELETE /courses/{id}`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn delete_course(client: &ApiClient, id: &str) -> Result<Value, ClientError> {
    client.delete(&course_endpoint(id)).await
}

/// `GET /courses/status/{code}`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn courses_by_status(client: &ApiClient, status: CourseStatus) -> Result<Value, ClientError> {
    client.get(&course_status_endpoint(status)).await
}

/// `GET /courses/schedule/{day}`: the timetable for one weekday.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn schedule_for(client: &ApiClient, day: Weekday) -> Result<Value, ClientError> {
    client.get(&schedule_endpoint(day)).await
}

/// `GET /courses/mine`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn my_courses(client: &ApiClient, page: &PageQuery) -> Result<Value, ClientError> {
    client.get_with(MY_COURSES, page).await
}

/// `POST /courses/{id}/enroll`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn enroll(client: &ApiClient, id: &str) -> Result<Value, ClientError> {
    client.post_empty(&enrollment_endpoint(id)).await
}

/// `DELETE /courses/{id}/enroll`.
///
/// # Errors
///
/// See [`ApiClient::send`].
pub async fn withdraw(client: &ApiClient, id: &str) -> Result<Value, ClientError> {
    client.delete(&enrollment_endpoint(id)).await
}
