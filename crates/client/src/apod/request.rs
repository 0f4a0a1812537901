//! APOD request parameters and date validation.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use super::ApodError;

/// Date of the first Astronomy Picture of the Day.
pub fn first_apod_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1995, 6, 16).unwrap_or(NaiveDate::MIN)
}

static DATE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));

/// Query parameters for `GET /planetary/apod`.
#[derive(Debug, Clone, Serialize)]
pub struct ApodRequest {
    /// Date in `YYYY-MM-DD` form.
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,

    pub api_key: String,

    /// Ask for `thumbnail_url` on video records.
    pub thumbs: bool,
}

fn serialize_date<S: serde::Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&date.format("%Y-%m-%d"))
}

impl ApodRequest {
    pub fn new(date: NaiveDate, api_key: impl Into<String>) -> Self {
        Self { date, api_key: api_key.into(), thumbs: true }
    }

    /// Validate the request parameters against `today`.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ApodError> {
        if self.api_key.trim().is_empty() {
            return Err(ApodError::MissingApiKey);
        }
        validate_date(self.date, today)
    }
}

/// Check that `date` lies between the first APOD and `today`, inclusive.
pub fn validate_date(date: NaiveDate, today: NaiveDate) -> Result<(), ApodError> {
    let first = first_apod_date();
    if date < first {
        return Err(ApodError::InvalidDate(format!("{date} is before the first APOD ({first})")));
    }
    if date > today {
        return Err(ApodError::InvalidDate(format!("{date} is in the future")));
    }
    Ok(())
}

/// Parse a strict `YYYY-MM-DD` string and validate it against `today`.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate, ApodError> {
    let input = input.trim();
    if !DATE_FORMAT.is_match(input) {
        return Err(ApodError::InvalidDate(format!("{input:?} is not in YYYY-MM-DD format")));
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ApodError::InvalidDate(format!("{input} does not exist")))?;

    validate_date(date, today)?;
    Ok(date)
}
