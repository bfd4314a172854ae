use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SharedError};

/// Error body returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Parses a date as sent by the API or typed into a date input.
///
/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps; a timestamp keeps its
/// UTC calendar day.
pub fn parse_api_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.naive_utc().date())
        .map_err(|_| SharedError::InvalidDate(input.to_string()))
}

/// Like [`parse_api_date`] but blank or absent input means "no date".
pub fn parse_optional_date(input: Option<&str>) -> Result<Option<NaiveDate>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_api_date(s).map(Some),
    }
}

/// Formats a date the way the API and date inputs expect.
pub fn format_api_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
