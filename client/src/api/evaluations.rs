use log::info;
use reqwest::Method;
use sansi_shared::{EvaluatedStudent, Evaluation, EvaluationResponse, GradeRequest, StudentsResponse};

use crate::api::utils::{send_empty, send_json};
use crate::api::ApiClient;
use crate::error::{ClientError, Result};

impl ApiClient {
    /// `GET /api/evaluaciones/estudiantes/{cid}`
    pub async fn students_to_evaluate(&self, competition_id: &str) -> Result<Vec<EvaluatedStudent>> {
        let req = self.token_request(
            Method::GET,
            &["api", "evaluaciones", "estudiantes", competition_id],
        )?;
        let body: StudentsResponse = send_json(req).await?;
        Ok(body.students)
    }

    /// `GET /api/evaluaciones/estudiante/{cid}/{sid}`; `None` when the student has no grade yet.
    pub async fn get_evaluation(
        &self,
        competition_id: &str,
        student_id: &str,
    ) -> Result<Option<Evaluation>> {
        let req = self.token_request(
            Method::GET,
            &["api", "evaluaciones", "estudiante", competition_id, student_id],
        )?;
        match send_json::<EvaluationResponse>(req).await {
            Ok(body) => Ok(body.evaluation),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// `POST /api/evaluaciones/calificar/{cid}/{sid}`
    pub async fn grade_student(
        &self,
        competition_id: &str,
        student_id: &str,
        request: &GradeRequest,
    ) -> Result<()> {
        request.validate_fields().map_err(ClientError::Invalid)?;
        let req = self
            .token_request(
                Method::POST,
                &["api", "evaluaciones", "calificar", competition_id, student_id],
            )?
            .json(request);
        send_empty(req).await?;
        info!(
            "Graded student {} in competition {} with {}",
            student_id, competition_id, request.grade
        );
        Ok(())
    }
}
