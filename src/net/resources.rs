//! Typed producers for the backend's resource endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! These are the functions pages hand to the data-fetch controllers. Each
//! resource gets plain async calls plus, for lists, a producer factory whose
//! closures own a client clone so they satisfy the controllers' `'static`
//! bound.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::api::ApiClient;
use super::error::ApiError;
use super::query::ListParams;
use super::types::{PageEnvelope, Role};

pub const USERS_PATH: &str = "/users";
pub const COURSES_PATH: &str = "/courses";
pub const CALENDAR_EVENTS_PATH: &str = "/calendar-events";
pub const ACTIVITIES_PATH: &str = "/activities";
pub const PAYMENTS_PATH: &str = "/payments";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub published: bool,
}

/// Body for creating or replacing a course.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub published: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub course_id: Option<String>,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for charging a card token issued by the payment SDK.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub course_id: String,
    pub amount: f64,
    pub currency: String,
    pub payment_method_id: String,
}

pub fn user_path(id: &str) -> String {
    format!("{USERS_PATH}/{id}")
}

pub fn course_path(id: &str) -> String {
    format!("{COURSES_PATH}/{id}")
}

/// Calendar filter for events overlapping `[start_date, end_date]`.
pub fn calendar_range(start_date: &str, end_date: &str) -> ListParams {
    ListParams::new().with("startDate", start_date).with("endDate", end_date)
}

/// Activity filter by user and, optionally, activity type.
pub fn activity_filter(user_id: &str, activity_type: Option<&str>) -> ListParams {
    let params = ListParams::new().with("userId", user_id);
    match activity_type {
        Some(kind) => params.with("type", kind),
        None => params,
    }
}

/// Producer factory for any list endpoint.
pub fn list_producer<T>(
    api: ApiClient,
    path: &'static str,
) -> impl Fn(ListParams) -> LocalBoxFuture<'static, Result<PageEnvelope<T>, ApiError>> + 'static
where
    T: DeserializeOwned + 'static,
{
    move |params| {
        let api = api.clone();
        async move { api.get_page(path, &params).await }.boxed_local()
    }
}

/// Producer factory for a single resource at a fixed path.
pub fn item_producer<T>(
    api: ApiClient,
    path: String,
) -> impl Fn() -> LocalBoxFuture<'static, Result<T, ApiError>> + 'static
where
    T: DeserializeOwned + 'static,
{
    move || {
        let api = api.clone();
        let path = path.clone();
        async move { api.get(&path).await }.boxed_local()
    }
}

/// # Errors
///
/// Any [`ApiError`] from the underlying request.
pub async fn get_user(api: &ApiClient, id: &str) -> Result<User, ApiError> {
    api.get(&user_path(id)).await
}

/// # Errors
///
/// Any [`ApiError`] from the underlying request.
pub async fn get_course(api: &ApiClient, id: &str) -> Result<Course, ApiError> {
    api.get(&course_path(id)).await
}

/// # Errors
///
/// Any [`ApiError`] from the underlying request.
pub async fn create_course(api: &ApiClient, input: &CourseInput) -> Result<Course, ApiError> {
    api.post(COURSES_PATH, input).await
}

/// # Errors
///
/// Any [`ApiError`] from the underlying request.
pub async fn update_course(api: &ApiClient, id: &str, input: &CourseInput) -> Result<Course, ApiError> {
    api.put(&course_path(id), input).await
}

/// # Errors
///
/// Any [`ApiError`] from the underlying request.
pub async fn delete_course(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.delete(&course_path(id)).await
}

/// # Errors
///
/// Any [`ApiError`] from the underlying request.
pub async fn create_payment(api: &ApiClient, request: &PaymentRequest) -> Result<Payment, ApiError> {
    api.post(PAYMENTS_PATH, request).await
}
