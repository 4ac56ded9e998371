//! This module defines errors for `BeaconApiClient`.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// The error type for the beacon api client.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum BeaconApiClientError {
    /// HTTP request error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("json deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Resource not found error
    #[error("not found: {0}")]
    NotFound(ApiErrorBody),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(ApiErrorBody),

    /// Other unknown error
    #[error("unknown error ({code}): {text}")]
    Other {
        /// HTTP status code
        code: StatusCode,
        /// Error text
        text: String,
    },
}

/// The error body returned by the Beacon API.
///
/// Standard nodes return `{ code, message }`, lodestar returns `{ statusCode, error, message }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// HTTP status code
    #[serde(alias = "statusCode")]
    pub code: u64,
    /// Error type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error message
    pub message: String,
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(error) => write!(f, "{} {error}: {}", self.code, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}
