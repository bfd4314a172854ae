use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Result, SharedError};

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 100.0;

const GRADE_MESSAGE: &str = "Grade must be a number between 0 and 100";

/// Parses the grade typed into the evaluation form.
pub fn parse_grade(input: &str) -> Result<f64> {
    let grade: f64 = input
        .trim()
        .parse()
        .map_err(|_| SharedError::Validation(GRADE_MESSAGE.to_string()))?;
    if !grade.is_finite() || !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(SharedError::Validation(GRADE_MESSAGE.to_string()));
    }
    Ok(grade)
}

/// Body of the grading request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GradeRequest {
    #[serde(rename = "calificacion")]
    #[validate(range(min = 0.0, max = 100.0, message = "Grade must be a number between 0 and 100"))]
    pub grade: f64,

    #[serde(rename = "detalles", skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl GradeRequest {
    /// Builds the request from raw form input; blank details are dropped.
    pub fn from_form(grade: &str, details: &str) -> Result<Self> {
        let details = details.trim();
        let request = Self {
            grade: parse_grade(grade)?,
            details: (!details.is_empty()).then(|| details.to_string()),
        };
        request.validate_fields()?;
        Ok(request)
    }

    pub fn validate_fields(&self) -> Result<()> {
        if !self.grade.is_finite() {
            return Err(SharedError::Validation(GRADE_MESSAGE.to_string()));
        }
        self.validate().map_err(SharedError::from)
    }
}

/// Student as listed for an evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedStudent {
    pub id: String,
    #[serde(alias = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub documento_identidad: Option<String>,
    #[serde(rename = "ciudad", default)]
    pub city: Option<String>,
}

/// Competition summary embedded in an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationCompetition {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nivel")]
    pub level: String,
    pub area: String,
}

/// A stored evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(rename = "calificacion")]
    pub grade: f64,
    #[serde(rename = "detalles", default)]
    pub details: Option<String>,
    #[serde(rename = "fechaEvaluacion")]
    pub evaluated_at: DateTime<FixedOffset>,
    #[serde(rename = "estudiante")]
    pub student: EvaluatedStudent,
    pub competition: EvaluationCompetition,
}
