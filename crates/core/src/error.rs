//! Unified error types for the APOD cache.
//!
//! Every variant renders with a stable uppercase code prefix so log lines
//! and CLI output can be matched on without parsing free text.

use tokio_rusqlite::rusqlite;

/// Unified error type shared by the core and client crates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., an empty title).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// No cache entry exists for the given id.
    #[error("NOT_FOUND: no cache entry with id {0}")]
    NotFound(i64),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Filesystem operation failed.
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),

    /// Date outside the range served by the APOD service, or malformed.
    #[error("INVALID_DATE: {0}")]
    InvalidDate(String),

    /// The descriptor could not be obtained from the remote service.
    #[error("FETCH_FAILED: {0}")]
    FetchFailed(String),

    /// HTTP error response.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Response body could not be decoded.
    #[error("PARSE_ERROR: {0}")]
    Parse(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl Error {
    /// Whether the failure came from the network side rather than local storage.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::FetchFailed(_) | Error::HttpError(_) | Error::FetchTooLarge(_) | Error::InvalidUrl(_) | Error::Parse(_)
        )
    }
}
