//! APOD API client error types.

use std::sync::Arc;

use apod_core::Error;

/// Errors from the APOD API client.
#[derive(Debug, thiserror::Error)]
pub enum ApodError {
    /// Empty API key.
    #[error("missing API key: set APOD_API_KEY (or use DEMO_KEY)")]
    MissingApiKey,

    /// Date string is not `YYYY-MM-DD` or is out of range.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the API (DEMO_KEY quota is small).
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApodError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ApodError::Timeout } else { ApodError::Network(Arc::new(err)) }
    }
}

impl From<ApodError> for Error {
    fn from(err: ApodError) -> Self {
        match err {
            ApodError::InvalidDate(msg) => Error::InvalidDate(msg),
            ApodError::HttpError { status } => Error::HttpError(format!("status {status}")),
            ApodError::Parse(msg) => Error::Parse(msg),
            other => Error::FetchFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApodError::MissingApiKey;
        assert!(err.to_string().contains("API key"));

        let err = ApodError::InvalidDate("1990-01-01".to_string());
        assert!(err.to_string().contains("invalid date"));
    }

    #[test]
    fn test_into_core_error() {
        assert!(matches!(Error::from(ApodError::InvalidDate("x".into())), Error::InvalidDate(_)));
        assert!(matches!(Error::from(ApodError::HttpError { status: 500 }), Error::HttpError(_)));
        assert!(matches!(Error::from(ApodError::RateLimited), Error::FetchFailed(_)));
        assert!(Error::from(ApodError::Timeout).is_transient());
    }
}
