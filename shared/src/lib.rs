pub mod models {
    pub mod auth;
    pub mod catalog;
    pub mod competition;
    pub mod evaluation;
    pub mod permissions;
    pub mod stage;
}

pub mod dto {
    pub mod auth;
    pub mod common;
    pub mod competition;
    pub mod evaluation;
    pub mod stage;
}

pub mod error;
pub mod schedule;
pub mod timezone;

// Re-export commonly used items
pub use error::{Result, SharedError};
pub use schedule::{
    current_stage, is_inscription_open, latest_started_stage, validate_phases, validate_schedule,
    validate_stages, ScheduleError,
};

// Re-export models
pub use models::{
    auth::{LoginRequest, RegisterRequest, RoleInfo, Session, SessionUser},
    catalog::{Area, CompetitionStatus, Level},
    competition::{Competition, CompetitionDraft},
    evaluation::{parse_grade, EvaluatedStudent, Evaluation, GradeRequest},
    permissions::{Permissions, Role},
    stage::{Phase, Stage, StageKind},
};

// Re-export DTOs
pub use dto::{
    auth::{LoginResponse, MeResponse},
    common::ErrorResponse,
    competition::{
        CompetitionDto, CompetitionEnvelope, CompetitionFilter, CompetitionList,
        CompetitionPayload, InscriptionDto, InscriptionList,
    },
    evaluation::{EvaluationResponse, StudentsResponse},
    stage::{PhaseDto, StageDto},
};
