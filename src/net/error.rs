//! Error taxonomy for backend calls and its user-facing normalization.
//!
//! ERROR HANDLING
//! ==============
//! Every producer handed to a data-fetch controller fails with [`ApiError`].
//! Controllers never render the error directly; they store the string from
//! [`normalize_error`], which UI code displays verbatim.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// Shown when a failure carries no usable message at all.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// JSON body of a non-2xx backend response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused, aborted).
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: Option<ApiErrorBody> },

    /// A response arrived but its body did not match the expected schema.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// Browser-only call attempted during server rendering or native tests.
    #[error("not available outside the browser")]
    Unavailable,

    /// Failure raised by a producer itself, carrying its own message.
    #[error("{0}")]
    Message(String),

    /// Failure with no message at all.
    #[error("")]
    Unknown,
}

impl ApiError {
    /// Build a status error, keeping the body only when it parses as JSON.
    pub fn from_status(status: u16, body: &str) -> Self {
        let body = serde_json::from_str::<ApiErrorBody>(body).ok();
        Self::Status { status, body }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Reduce an error to the message shown to users.
///
/// Preference order: the structured body's `message`, the structured body's
/// `error`, the error's own message, then [`FALLBACK_ERROR_MESSAGE`]. Blank
/// candidates are skipped.
pub fn normalize_error(err: &ApiError) -> String {
    let structured = match err {
        ApiError::Status { body: Some(body), .. } => [body.message.as_deref(), body.error.as_deref()],
        _ => [None, None],
    };
    let own = err.to_string();

    structured
        .into_iter()
        .flatten()
        .chain(std::iter::once(own.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map_or_else(|| FALLBACK_ERROR_MESSAGE.to_owned(), str::to_owned)
}
