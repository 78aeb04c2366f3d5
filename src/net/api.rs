//! REST client for the learning-platform backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: every call fails with
//! [`ApiError::Unavailable`], since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>` instead of panics. A 401 response clears
//! the stored session before the error is returned; redirecting to a login
//! screen is the job of whatever route guard consumes the error.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::ApiError;
use super::query::ListParams;
use super::types::{ApiEnvelope, PageEnvelope};
use crate::config::AppConfig;
use crate::util::token_storage::{self, BrowserTokenStore, TokenStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Status and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Backend client. Cheap to clone; clones share the token store.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Rc<str>,
    store: Rc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: Rc<dyn TokenStore>) -> Self {
        let base: String = base_url.into();
        Self { base_url: Rc::from(base.trim_end_matches('/')), store }
    }

    /// Client backed by `localStorage` and the configured API base URL.
    pub fn browser(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone(), Rc::new(BrowserTokenStore))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path`, with `params` encoded as the query string.
    pub fn endpoint(&self, path: &str, params: Option<&ListParams>) -> String {
        let joined = if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        };
        let pairs = params.map(ListParams::query_pairs).unwrap_or_default();
        if pairs.is_empty() {
            return joined;
        }
        match Url::parse(&joined) {
            Ok(mut url) => {
                url.query_pairs_mut().extend_pairs(pairs);
                url.into()
            }
            Err(_) => joined,
        }
    }

    /// Headers attached to every request: JSON accept, optional JSON body
    /// type, and the bearer token when one is stored.
    pub fn request_headers(&self, with_body: bool) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Accept", "application/json".to_owned())];
        if with_body {
            headers.push(("Content-Type", "application/json".to_owned()));
        }
        if let Some(token) = token_storage::bearer_token(&*self.store) {
            headers.push(("Authorization", format!("Bearer {token}")));
        }
        headers
    }

    /// Fetch a single resource wrapped in an [`ApiEnvelope`].
    ///
    /// # Errors
    ///
    /// Transport failure, non-2xx status, or a body that is not an envelope
    /// of `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path, None);
        let body = self.execute(HttpMethod::Get, &url, None).await?;
        decode_envelope(&body)
    }

    /// Fetch one page of a list endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`], with a [`PageEnvelope`] body.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
    ) -> Result<PageEnvelope<T>, ApiError> {
        let url = self.endpoint(path, Some(params));
        let body = self.execute(HttpMethod::Get, &url, None).await?;
        decode_json(&body)
    }

    /// Create a resource.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`], or a request body that fails to serialize.
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let payload = encode_json(body)?;
        let url = self.endpoint(path, None);
        let body = self.execute(HttpMethod::Post, &url, Some(payload)).await?;
        decode_envelope(&body)
    }

    /// Replace a resource.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::post`].
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let payload = encode_json(body)?;
        let url = self.endpoint(path, None);
        let body = self.execute(HttpMethod::Put, &url, Some(payload)).await?;
        decode_envelope(&body)
    }

    /// Delete a resource. Any response body is ignored.
    ///
    /// # Errors
    ///
    /// Transport failure or non-2xx status.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path, None);
        self.execute(HttpMethod::Delete, &url, None).await?;
        Ok(())
    }

    async fn execute(&self, method: HttpMethod, url: &str, body: Option<String>) -> Result<String, ApiError> {
        let raw = self.send(method, url, body).await?;
        self.check_response(raw)
    }

    /// Map a completed exchange to its body or an error, clearing the stored
    /// session on 401.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] for any non-2xx status.
    pub fn check_response(&self, raw: RawResponse) -> Result<String, ApiError> {
        if (200..300).contains(&raw.status) {
            return Ok(raw.body);
        }
        if raw.status == 401 {
            leptos::logging::warn!("api: 401 from backend, clearing stored session");
            token_storage::clear_session(&*self.store);
        }
        Err(ApiError::from_status(raw.status, &raw.body))
    }

    #[cfg(feature = "hydrate")]
    async fn send(&self, method: HttpMethod, url: &str, body: Option<String>) -> Result<RawResponse, ApiError> {
        use gloo_net::http::Request;

        let mut builder = match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Delete => Request::delete(url),
        };
        for (name, value) in self.request_headers(body.is_some()) {
            builder = builder.header(name, &value);
        }

        let response = match body {
            Some(json) => builder
                .body(json)
                .map_err(|e| ApiError::Transport(e.to_string()))?
                .send()
                .await,
            None => builder.send().await,
        }
        .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(RawResponse { status, body })
    }

    #[cfg(not(feature = "hydrate"))]
    async fn send(&self, method: HttpMethod, url: &str, body: Option<String>) -> Result<RawResponse, ApiError> {
        let _ = (method, url, body);
        Err(ApiError::Unavailable)
    }
}

fn encode_json<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode an [`ApiEnvelope`] body and return its payload.
///
/// # Errors
///
/// [`ApiError::Decode`] when the body is not an envelope of `T`.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    decode_json::<ApiEnvelope<T>>(body).map(|envelope| envelope.data)
}
