//! Contract tests for ApiClient against a mocked backend.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET | `/api/competitions` | `list_competitions_*` |
//! | GET | `/api/competitions/{id}` | `get_competition_*` |
//! | POST | `/api/competitions` | `create_competition_*` |
//! | PUT | `/api/competitions/{id}` | `update_competition_*` |
//! | DELETE | `/api/competitions/{id}` | `delete_competition_*` |
//! | POST | `/api/competitions/{id}/inscribirse` | `enroll_*` |
//! | DELETE | `/api/competitions/{id}/desinscribirse` | `unenroll_*` |
//! | GET | `/api/inscriptions/mis` | `inscription_for_*` |
//! | GET | `/api/auth/me` | `me_*` |
//! | POST | `/api/auth/login` | `login_*` |
//! | POST | `/api/auth/register` | `register_*` |
//! | GET/POST | `/api/evaluaciones/...` | `*_evaluation_*`, `grade_student_*` |

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sansi_client::{ApiClient, ClientConfig, ClientError};
use sansi_shared::{
    Area, CompetitionDraft, CompetitionFilter, CompetitionStatus, GradeRequest, Level,
    LoginRequest, RegisterRequest, Role, Stage, StageKind,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new(&server.uri()).unwrap()).unwrap()
}

fn test_client_with_token(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::new(&server.uri()).unwrap().with_token("test-token")).unwrap()
}

fn competition_json() -> serde_json::Value {
    serde_json::json!({
        "id": "c-1",
        "nombre": "Olimpiada de Física",
        "nivel": "INTERMEDIO",
        "area": "FISICA",
        "participantes": 3,
        "estado": "DESARROLLO",
        "fechaInicio": "2024-05-01",
        "fases": [
            {"id": "f-1", "nombre": "Clasificatoria", "fechaInicio": "2024-06-05", "fechaFin": "2024-06-10"}
        ],
        "etapas": [
            {"etapa": "INSCRIPCION", "fechaInicio": "2024-05-01", "fechaFin": "2024-05-31"},
            {"etapa": "DESARROLLO", "fechaInicio": "2024-06-01T04:00:00.000Z", "fechaFin": "2024-06-30"}
        ]
    })
}

// ── GET /api/competitions ─────────────────────────────────────────────

#[tokio::test]
async fn list_competitions_sends_filters_and_refilters_locally() {
    let server = MockServer::start().await;

    let mut other = competition_json();
    other["id"] = "c-2".into();
    other["nombre"] = "Copa de Química".into();
    other["area"] = "QUIMICA".into();

    Mock::given(method("GET"))
        .and(path("/api/competitions"))
        .and(query_param("q", "olimpiada"))
        .and(query_param("estado", "DESARROLLO"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"items": [competition_json(), other]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let filter = CompetitionFilter {
        query: Some(" olimpiada ".to_string()),
        status: Some(CompetitionStatus::Development),
        ..CompetitionFilter::default()
    };
    let competitions = test_client(&server).list_competitions(&filter).await.unwrap();

    assert_eq!(competitions.len(), 1);
    assert_eq!(competitions[0].id, "c-1");
    assert_eq!(competitions[0].level, Level::Intermediate);
    assert_eq!(competitions[0].area, Area::Physics);
    assert_eq!(
        competitions[0].stages[1].start_date,
        NaiveDate::from_ymd_opt(2024, 6, 1)
    );
}

#[tokio::test]
async fn list_competitions_accepts_bare_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/competitions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([competition_json()])))
        .mount(&server)
        .await;

    let competitions = test_client(&server)
        .list_competitions(&CompetitionFilter::default())
        .await
        .unwrap();
    assert_eq!(competitions.len(), 1);
}

// ── GET /api/competitions/{id} ────────────────────────────────────────

#[tokio::test]
async fn get_competition_unwraps_envelope_with_enabled_flag() {
    let server = MockServer::start().await;

    let mut body = competition_json();
    body["estado"] = serde_json::Value::Bool(false);
    Mock::given(method("GET"))
        .and(path("/api/competitions/c-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": true, "competition": body})),
        )
        .mount(&server)
        .await;

    let competition = test_client(&server).get_competition("c-1").await.unwrap();
    assert_eq!(competition.name, "Olimpiada de Física");
    assert!(!competition.enabled);
    assert_eq!(competition.status, None);
    assert_eq!(competition.phases[0].name, "Clasificatoria");
}

#[tokio::test]
async fn get_competition_surfaces_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/competitions/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"ok": false, "message": "Competencia no encontrada"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server).get_competition("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Competencia no encontrada");
}

#[tokio::test]
async fn get_competition_falls_back_to_status_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/competitions/c-9"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let err = test_client(&server).get_competition("c-9").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "HTTP 500");
}

// ── POST /api/competitions ────────────────────────────────────────────

fn new_draft() -> CompetitionDraft {
    let day = |d: u32| NaiveDate::from_ymd_opt(2024, 8, d).unwrap();
    let mut draft = CompetitionDraft::new("  Copa de Robótica ", Level::Beginner, Area::Robotics);
    draft.participants = 4;
    draft.start_date = Some(day(1));
    draft.stages = vec![
        Stage::new(StageKind::Inscription, day(1), Some(day(10))),
        Stage::new(StageKind::Development, day(11), Some(day(31))),
    ];
    draft
}

#[tokio::test]
async fn create_competition_posts_trimmed_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/competitions"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(serde_json::json!({
            "nombre": "Copa de Robótica",
            "nivel": "PRINCIPIANTE",
            "estado": "INSCRIPCION",
            "area": "ROBOTICA",
            "participantes": 4,
            "fechaInicio": "2024-08-01",
            "etapas": [
                {"etapa": "INSCRIPCION", "fechaInicio": "2024-08-01", "fechaFin": "2024-08-10"},
                {"etapa": "DESARROLLO", "fechaInicio": "2024-08-11", "fechaFin": "2024-08-31"}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    test_client_with_token(&server)
        .create_competition(&new_draft())
        .await
        .unwrap();
}

#[tokio::test]
async fn create_competition_requires_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .create_competition(&new_draft())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingToken));
}

#[tokio::test]
async fn create_competition_blocks_invalid_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut draft = new_draft();
    draft.name = "Copa 2024".to_string();
    let err = test_client_with_token(&server)
        .create_competition(&draft)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid name: letters and spaces only, at most 45 characters."
    );
}

// ── PUT /api/competitions/{id} ────────────────────────────────────────

#[tokio::test]
async fn update_competition_sends_validated_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/competitions/c-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(competition_json()))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/competitions/c-1"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(serde_json::json!({
            "nombre": "Olimpiada de Física",
            "nivel": "INTERMEDIO",
            "estado": "DESARROLLO",
            "area": "FISICA",
            "participantes": 3,
            "fechaInicio": "2024-05-01",
            "etapas": [
                {"etapa": "INSCRIPCION", "fechaInicio": "2024-05-01", "fechaFin": "2024-05-31"},
                {"etapa": "DESARROLLO", "fechaInicio": "2024-06-01", "fechaFin": "2024-06-30"}
            ],
            "fases": [
                {"id": "f-1", "nombre": "Clasificatoria", "fechaInicio": "2024-06-05", "fechaFin": "2024-06-10"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_with_token(&server);
    let draft = client.get_competition("c-1").await.unwrap().to_draft();
    client.update_competition("c-1", &draft).await.unwrap();
}

#[tokio::test]
async fn update_competition_blocks_invalid_phase() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client_with_token(&server);
    let dto: sansi_shared::CompetitionDto = serde_json::from_value(competition_json()).unwrap();
    let mut draft = sansi_shared::Competition::try_from(dto).unwrap().to_draft();
    draft.phases[0].end_date = NaiveDate::from_ymd_opt(2024, 7, 3);

    let err = client.update_competition("c-1", &draft).await.unwrap_err();
    assert!(matches!(err, ClientError::Invalid(_)));
    assert_eq!(err.to_string(), "Phase Clasificatoria ends after Development.");
}

#[tokio::test]
async fn update_competition_requires_token() {
    let server = MockServer::start().await;

    let dto: sansi_shared::CompetitionDto = serde_json::from_value(competition_json()).unwrap();
    let draft = sansi_shared::Competition::try_from(dto).unwrap().to_draft();

    let err = test_client(&server)
        .update_competition("c-1", &draft)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingToken));
    assert_eq!(err.to_string(), "You must log in.");
}

// ── DELETE /api/competitions/{id} ─────────────────────────────────────

#[tokio::test]
async fn delete_competition_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/competitions/c-1"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    test_client_with_token(&server)
        .delete_competition("c-1")
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_competition_requires_token() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server).delete_competition("c-1").await.unwrap_err();
    assert!(matches!(err, ClientError::MissingToken));
}

#[tokio::test]
async fn delete_competition_forbidden_message() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/competitions/c-1"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(serde_json::json!({"message": "Sin permiso"})),
        )
        .mount(&server)
        .await;

    let err = test_client_with_token(&server)
        .delete_competition("c-1")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "Sin permiso");
}

// ── POST /api/competitions/{id}/inscribirse ───────────────────────────

#[tokio::test]
async fn enroll_posts_with_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/competitions/c-1/inscribirse"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    test_client_with_token(&server).enroll("c-1").await.unwrap();
}

#[tokio::test]
async fn enroll_rejected_by_backend() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/competitions/c-1/inscribirse"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(serde_json::json!({"ok": false, "message": "Ya estás inscrito"})),
        )
        .mount(&server)
        .await;

    let err = test_client_with_token(&server).enroll("c-1").await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.to_string(), "Ya estás inscrito");
}

#[tokio::test]
async fn enroll_keeps_base_path_and_encodes_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/backend/api/competitions/a%2Fb/inscribirse"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(&format!("{}/backend", server.uri()))
        .unwrap()
        .with_token("test-token");
    ApiClient::new(config).unwrap().enroll("a/b").await.unwrap();
}

// ── DELETE /api/competitions/{id}/desinscribirse ──────────────────────

#[tokio::test]
async fn unenroll_deletes_inscription() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/competitions/c-1/desinscribirse"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    test_client_with_token(&server).unenroll("c-1").await.unwrap();
}

#[tokio::test]
async fn unenroll_rejected_in_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/competitions/c-1/desinscribirse"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": false, "message": "Inscripción cerrada"})),
        )
        .mount(&server)
        .await;

    let err = test_client_with_token(&server).unenroll("c-1").await.unwrap_err();
    assert_eq!(err.to_string(), "Inscripción cerrada");
}

#[tokio::test]
async fn unenroll_requires_token() {
    let server = MockServer::start().await;

    let err = test_client(&server).unenroll("c-1").await.unwrap_err();
    assert_eq!(err.to_string(), "You must log in.");
}

// ── GET /api/inscriptions/mis ─────────────────────────────────────────

#[tokio::test]
async fn inscription_for_finds_nested_competition() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/inscriptions/mis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "competitions": [
                {"id": "i-1", "competition": {"id": "c-1", "nombre": "Olimpiada de Física"}},
                {"id": "i-2", "competitionId": "c-7"}
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client_with_token(&server);
    let found = client.inscription_for("c-1").await.unwrap().unwrap();
    assert_eq!(found.id.as_deref(), Some("i-1"));
    assert!(client.inscription_for("c-7").await.unwrap().is_some());
    assert!(client.inscription_for("c-3").await.unwrap().is_none());
}

#[tokio::test]
async fn inscription_for_anonymous_skips_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    assert!(test_client(&server).inscription_for("c-1").await.unwrap().is_none());
}

// ── GET /api/auth/me ──────────────────────────────────────────────────

#[tokio::test]
async fn me_returns_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "user": {"id": "u-1", "name": "Ana", "email": "ana@example.com", "role": "RESPONSABLEACADEMICO"}
        })))
        .mount(&server)
        .await;

    let session = test_client_with_token(&server).session().await.unwrap();
    assert!(session.is_authenticated());
    let user = session.user.unwrap();
    assert_eq!(user.builtin_role(), Some(Role::AcademicLead));
    assert!(user.can_manage_competitions());
}

#[tokio::test]
async fn me_with_rejected_token_is_anonymous() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "Token inválido"})),
        )
        .mount(&server)
        .await;

    assert!(test_client_with_token(&server).me().await.unwrap().is_none());
}

// ── POST /api/auth/login ──────────────────────────────────────────────

#[tokio::test]
async fn login_keeps_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(serde_json::json!({"email": "ana@example.com", "password": "secreto"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true, "token": "fresh-token"})),
        )
        .mount(&server)
        .await;

    let mut client = test_client(&server);
    client
        .login(&LoginRequest::new("ana@example.com", "secreto"))
        .await
        .unwrap();
    assert_eq!(client.token(), Some("fresh-token"));
}

#[tokio::test]
async fn login_rejected_keeps_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"ok": false, "message": "Credenciales inválidas"})),
        )
        .mount(&server)
        .await;

    let mut client = test_client(&server);
    let err = client
        .login(&LoginRequest::new("ana@example.com", "wrong1"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Credenciales inválidas");
    assert_eq!(client.token(), None);
}

// ── POST /api/auth/register ───────────────────────────────────────────

#[tokio::test]
async fn register_posts_account() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(serde_json::json!({
            "name": "Ana Quispe",
            "email": "ana@example.com",
            "password": "secreto"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let request = RegisterRequest::new(
        "Ana Quispe".to_string(),
        "ana@example.com".to_string(),
        "secreto".to_string(),
    )
    .unwrap();
    test_client(&server).register(&request).await.unwrap();
}

#[tokio::test]
async fn register_short_password_is_not_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut request = RegisterRequest::new(
        "Ana Quispe".to_string(),
        "ana@example.com".to_string(),
        "secreto".to_string(),
    )
    .unwrap();
    request.password = "12345".to_string();
    let err = test_client(&server).register(&request).await.unwrap_err();
    assert_eq!(err.to_string(), "Password must be at least 6 characters");
}

#[tokio::test]
async fn register_duplicate_email_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(serde_json::json!({"ok": false, "message": "El email ya está registrado"})),
        )
        .mount(&server)
        .await;

    let request = RegisterRequest::new(
        "Ana Quispe".to_string(),
        "ana@example.com".to_string(),
        "secreto".to_string(),
    )
    .unwrap();
    let err = test_client(&server).register(&request).await.unwrap_err();
    assert_eq!(err.to_string(), "El email ya está registrado");
}

// ── /api/evaluaciones ─────────────────────────────────────────────────

#[tokio::test]
async fn get_evaluation_absent_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/evaluaciones/estudiante/c-1/s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&server)
        .await;

    let evaluation = test_client_with_token(&server)
        .get_evaluation("c-1", "s-1")
        .await
        .unwrap();
    assert!(evaluation.is_none());
}

#[tokio::test]
async fn students_to_evaluate_lists_students() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/evaluaciones/estudiantes/c-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "estudiantes": [{"id": "s-1", "nombre": "Luis", "email": "luis@example.com"}]
        })))
        .mount(&server)
        .await;

    let students = test_client_with_token(&server)
        .students_to_evaluate("c-1")
        .await
        .unwrap();
    assert_eq!(students[0].name, "Luis");
}

#[tokio::test]
async fn grade_student_posts_grade() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/evaluaciones/calificar/c-1/s-1"))
        .and(body_json(serde_json::json!({"calificacion": 92.5, "detalles": "Excelente"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let request = GradeRequest::from_form("92.5", "Excelente").unwrap();
    test_client_with_token(&server)
        .grade_student("c-1", "s-1", &request)
        .await
        .unwrap();
}

#[tokio::test]
async fn grade_student_rejects_out_of_range() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = GradeRequest {
        grade: 120.0,
        details: None,
    };
    let err = test_client_with_token(&server)
        .grade_student("c-1", "s-1", &request)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Grade must be a number between 0 and 100");
}
