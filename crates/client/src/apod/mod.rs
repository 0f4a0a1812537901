//! NASA Astronomy Picture of the Day API client.
//!
//! ### API
//!
//! - **Endpoint**: `https://api.nasa.gov/planetary/apod`
//! - **Authentication**: `api_key` query parameter (`DEMO_KEY` for anonymous use).
//! - **Query**: `date=YYYY-MM-DD&api_key=...&thumbs=true`; `thumbs` makes the
//!   service include `thumbnail_url` for video records.
//! - **Normalization**: Converts the JSON record into a [`MediaDescriptor`].
//! - One attempt per call; no retry or backoff.

pub mod error;
pub mod request;
pub mod response;

pub use error::ApodError;
pub use request::{ApodRequest, first_apod_date, parse_date, validate_date};
pub use response::ApodApiResponse;

use apod_core::config::AppConfig;
use apod_core::{DescriptorSource, Error, MediaDescriptor};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default APOD endpoint.
const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "apod-cache/0.1";

/// APOD client configuration.
#[derive(Debug, Clone)]
pub struct ApodConfig {
    pub api_key: String,
    /// Endpoint URL (default: https://api.nasa.gov/planetary/apod).
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ApodConfig {
    fn default() -> Self {
        Self {
            api_key: "DEMO_KEY".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&AppConfig> for ApodConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// APOD API client.
#[derive(Debug, Clone)]
pub struct ApodClient {
    http: reqwest::Client,
    config: ApodConfig,
}

impl ApodClient {
    /// Create a new APOD client with the given configuration.
    pub fn new(config: ApodConfig) -> Result<Self, ApodError> {
        if config.api_key.trim().is_empty() {
            return Err(ApodError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .build()
            .map_err(|e| ApodError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Build the GET request for a date without sending it.
    pub fn build_request(&self, req: &ApodRequest) -> Result<reqwest::Request, ApodError> {
        self.http
            .get(&self.config.base_url)
            .header(header::ACCEPT, "application/json")
            .query(req)
            .build()
            .map_err(ApodError::from)
    }

    /// Fetch the raw record for a date.
    ///
    /// The date is validated against the local calendar before any request
    /// is made.
    pub async fn fetch(&self, date: NaiveDate) -> Result<ApodApiResponse, ApodError> {
        let req = ApodRequest::new(date, self.config.api_key.clone());
        req.validate(chrono::Local::now().date_naive())?;

        let start = Instant::now();
        tracing::debug!("requesting APOD record for {}", date);

        let http_response = self.http.execute(self.build_request(&req)?).await?;

        let status = http_response.status();
        tracing::debug!("APOD API response status: {}", status);

        if status == 401 || status == 403 {
            return Err(ApodError::AuthError);
        }

        if status == 429 {
            return Err(ApodError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(ApodError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let record: ApodApiResponse = serde_json::from_slice(&bytes).map_err(|e| ApodError::Parse(e.to_string()))?;

        tracing::debug!(
            "APOD record for {} ({}, {:?}) in {:?}",
            record.date,
            record.title,
            record.media_type,
            start.elapsed()
        );

        Ok(record)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &ApodConfig {
        &self.config
    }
}

#[async_trait]
impl DescriptorSource for ApodClient {
    async fn get_descriptor(&self, date: NaiveDate) -> Result<MediaDescriptor, Error> {
        let record = self.fetch(date).await?;
        Ok(record.into())
    }
}
