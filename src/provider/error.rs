//! Shared error handling for catalog API calls.
//!
//! Wraps HTTP failures while preserving status information, so callers can
//! distinguish rate limiting and transient server errors from hard failures.

use std::fmt;

use crate::error::HubError;

/// API error with optional HTTP status context.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code, if the server responded
    pub status: Option<reqwest::StatusCode>,
    /// Retry-After header value in seconds, if present
    pub retry_after: Option<u64>,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            retry_after: None,
            message: message.into(),
        }
    }

    pub fn with_status(message: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self {
            status: Some(status),
            retry_after: None,
            message: message.into(),
        }
    }

    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status.is_some_and(|s| s.as_u16() == 429)
    }

    /// Transient errors are worth a user-initiated retry.
    pub fn is_transient(&self) -> bool {
        self.status.is_some_and(|s| s.is_server_error())
    }

    /// Convert to a [`HubError`]: rate limiting becomes `RateLimited`,
    /// missing auth becomes `Unauthenticated`, everything else `Api`.
    pub fn into_hub_error(self) -> HubError {
        if self.is_rate_limited() {
            return HubError::RateLimited(self.retry_after.unwrap_or(60));
        }
        if self.status.is_some_and(|s| s.as_u16() == 401) {
            return HubError::Unauthenticated;
        }
        HubError::Api(self.message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ApiError> for HubError {
    fn from(error: ApiError) -> Self {
        error.into_hub_error()
    }
}
