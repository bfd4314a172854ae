use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::schedule::ScheduleError;

#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
pub enum SharedError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Date range error: start date {start} must be before end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown code: {0}")]
    UnknownCode(String),

    #[error("Required field missing: {0}")]
    MissingField(String),
}

impl SharedError {
    /// The message a form shows next to the submit button.
    ///
    /// Validation failures are shown verbatim; everything else keeps the
    /// category prefix so the user can tell it apart.
    pub fn user_message(&self) -> String {
        match self {
            SharedError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationErrors> for SharedError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(first_validation_message(&errors).unwrap_or_else(|| errors.to_string()))
    }
}

impl From<ScheduleError> for SharedError {
    fn from(error: ScheduleError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl From<JsonError> for SharedError {
    fn from(error: JsonError) -> Self {
        Self::Conversion(error.to_string())
    }
}

/// Picks the custom message of the first failing field, if one was declared.
fn first_validation_message(errors: &ValidationErrors) -> Option<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(name, _)| *name);
    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
}

pub type Result<T> = std::result::Result<T, SharedError>;
