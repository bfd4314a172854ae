use serde::{Deserialize, Serialize};

use crate::models::evaluation::{EvaluatedStudent, Evaluation};

/// Body of `GET /api/evaluaciones/estudiante/{cid}/{sid}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationResponse {
    #[serde(rename = "evaluacion", default)]
    pub evaluation: Option<Evaluation>,
}

/// Body of `GET /api/evaluaciones/estudiantes/{cid}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentsResponse {
    #[serde(rename = "estudiantes", default)]
    pub students: Vec<EvaluatedStudent>,
}
