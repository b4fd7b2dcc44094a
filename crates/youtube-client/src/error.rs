//! Failure taxonomy for calls to the video platform.
//!
//! Two kinds are recognised as transient by the selector: [`PlatformError::NotFound`]
//! (skip the item) and [`PlatformError::QuotaExceeded`] (stop inserting). Every
//! other variant is fatal for the run.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the video platform
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The referenced video or playlist does not exist (or is not visible)
    #[error("Item not found: {0}")]
    NotFound(String),

    /// The daily/rate quota is exhausted
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Credentials were rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Any other error status returned by the platform
    #[error("Platform returned status {status}: {message}")]
    Api {
        status: u16,
        reason: Option<String>,
        message: String,
    },

    /// More ids were passed to a batch call than the platform accepts
    #[error("Batch of {requested} ids exceeds the limit of {max}")]
    BatchTooLarge { requested: usize, max: usize },

    /// Transport-level failure (DNS, TLS, timeout, ...)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The platform answered with something we could not interpret
    #[error("Invalid response from platform: {0}")]
    InvalidResponse(String),
}

impl PlatformError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlatformError::NotFound(_))
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, PlatformError::QuotaExceeded(_))
    }

    /// Classify an error response from its HTTP status and JSON body.
    ///
    /// ## Algorithm
    /// 1. Read `error.errors[0].reason` and `error.message` from the body
    /// 2. Map known reasons first (`videoNotFound`, `quotaExceeded`, ...)
    /// 3. Fall back to the status code (404 → NotFound, 401 → Unauthorized)
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();
        let reason = parsed
            .as_ref()
            .and_then(|e| e.error.errors.first())
            .and_then(|d| d.reason.clone());
        let message = parsed
            .and_then(|e| e.error.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| truncate(body, 200));

        match reason.as_deref() {
            Some(
                "videoNotFound" | "playlistNotFound" | "playlistItemNotFound"
                | "channelNotFound" | "notFound",
            ) => PlatformError::NotFound(message),
            Some("quotaExceeded" | "rateLimitExceeded" | "dailyLimitExceeded" | "userRateLimitExceeded") => {
                PlatformError::QuotaExceeded(message)
            }
            _ => match status {
                404 => PlatformError::NotFound(message),
                401 => PlatformError::Unauthorized(message),
                429 => PlatformError::QuotaExceeded(message),
                _ => PlatformError::Api {
                    status,
                    reason,
                    message,
                },
            },
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

fn truncate(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push('…');
    }
    out
}
