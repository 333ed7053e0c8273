use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriveError {
    #[error("drive rejected the access token: {0}")]
    Unauthorized(String),

    #[error("drive api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("drive request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid drive json: {0}")]
    Json(#[from] serde_json::Error),
}

// Google API error envelope: {"error": {"code", "message", "errors": [{"reason"}]}}
#[derive(Debug, Deserialize)]
struct Envelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    #[serde(default)]
    reason: String,
}

const QUOTA_REASONS: &[&str] = &[
    "rateLimitExceeded",
    "userRateLimitExceeded",
    "dailyLimitExceeded",
    "quotaExceeded",
    "storageQuotaExceeded",
];

impl DriveError {
    /// Maps a non-success Drive response to an error.
    ///
    /// 401 is always an auth failure. Drive also answers 403 for rate and
    /// storage limits; those stay server-side errors.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<Envelope>(body).ok();
        let message = parsed
            .as_ref()
            .map(|e| e.error.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {status}"));
        let quota = parsed.as_ref().is_some_and(|e| {
            e.error
                .errors
                .iter()
                .any(|item| QUOTA_REASONS.contains(&item.reason.as_str()))
        });

        match status {
            401 => DriveError::Unauthorized(message),
            403 if !quota => DriveError::Unauthorized(message),
            _ => DriveError::Api { status, message },
        }
    }
}
