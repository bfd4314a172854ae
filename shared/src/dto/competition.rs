use serde::{Deserialize, Serialize};

use crate::dto::common::{format_api_date, parse_optional_date};
use crate::dto::stage::{PhaseDto, StageDto};
use crate::error::{Result, SharedError};
use crate::models::catalog::{Area, CompetitionStatus, Level};
use crate::models::competition::{Competition, CompetitionDraft};
use crate::models::stage::{Phase, Stage};

/// `estado` is the status code on list/edit payloads and an enabled flag on
/// the detail payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EstadoField {
    Enabled(bool),
    Status(CompetitionStatus),
}

/// Competition as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionDto {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nivel")]
    pub level: Level,
    pub area: Area,
    #[serde(rename = "participantes")]
    pub participants: u8,
    #[serde(default)]
    pub estado: Option<EstadoField>,
    #[serde(rename = "fechaInicio", default)]
    pub start_date: Option<String>,
    #[serde(rename = "modalidad", default)]
    pub modality: Option<String>,
    #[serde(rename = "formaCalificacion", default)]
    pub grading_method: Option<String>,
    #[serde(rename = "fases", default)]
    pub phases: Vec<PhaseDto>,
    #[serde(rename = "etapas", default)]
    pub stages: Vec<StageDto>,
}

impl TryFrom<CompetitionDto> for Competition {
    type Error = SharedError;

    fn try_from(dto: CompetitionDto) -> Result<Self> {
        let (status, enabled) = match dto.estado {
            Some(EstadoField::Status(status)) => (Some(status), true),
            Some(EstadoField::Enabled(enabled)) => (None, enabled),
            None => (None, true),
        };
        Ok(Competition {
            id: dto.id,
            name: dto.name,
            level: dto.level,
            area: dto.area,
            status,
            participants: dto.participants,
            start_date: parse_optional_date(dto.start_date.as_deref())?,
            modality: dto.modality,
            grading_method: dto.grading_method,
            enabled,
            phases: dto
                .phases
                .into_iter()
                .map(Phase::try_from)
                .collect::<Result<_>>()?,
            stages: dto
                .stages
                .into_iter()
                .map(Stage::try_from)
                .collect::<Result<_>>()?,
        })
    }
}

/// Either `{ "competition": {...} }` or the bare object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CompetitionEnvelope {
    Wrapped { competition: CompetitionDto },
    Bare(CompetitionDto),
}

impl CompetitionEnvelope {
    pub fn into_inner(self) -> CompetitionDto {
        match self {
            CompetitionEnvelope::Wrapped { competition } => competition,
            CompetitionEnvelope::Bare(dto) => dto,
        }
    }
}

/// Either a bare array or `{ "items": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CompetitionList {
    Items { items: Vec<CompetitionDto> },
    Bare(Vec<CompetitionDto>),
}

impl CompetitionList {
    pub fn into_vec(self) -> Vec<CompetitionDto> {
        match self {
            CompetitionList::Items { items } => items,
            CompetitionList::Bare(items) => items,
        }
    }
}

/// Create/update body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitionPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nivel")]
    pub level: Level,
    #[serde(rename = "estado")]
    pub status: CompetitionStatus,
    pub area: Area,
    #[serde(rename = "participantes")]
    pub participants: u8,
    #[serde(rename = "fechaInicio")]
    pub start_date: String,
    #[serde(rename = "etapas", skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<StageDto>,
    #[serde(rename = "fases", skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<PhaseDto>,
}

impl TryFrom<&CompetitionDraft> for CompetitionPayload {
    type Error = SharedError;

    /// Runs the form checks; an invalid draft never becomes a payload.
    fn try_from(draft: &CompetitionDraft) -> Result<Self> {
        draft.validate_form()?;
        let start_date = draft
            .start_date
            .ok_or_else(|| SharedError::MissingField("fechaInicio".to_string()))?;
        Ok(CompetitionPayload {
            name: draft.name.trim().to_string(),
            level: draft.level,
            status: draft.status,
            area: draft.area,
            participants: draft.participants,
            start_date: format_api_date(start_date),
            stages: draft.stages.iter().map(StageDto::from).collect(),
            phases: draft.phases.iter().map(PhaseDto::from).collect(),
        })
    }
}

/// Filters of the competition list screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompetitionFilter {
    pub query: Option<String>,
    pub status: Option<CompetitionStatus>,
    pub level: Option<Level>,
    pub area: Option<Area>,
}

impl CompetitionFilter {
    /// Query-string pairs sent to the list endpoint.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = self.trimmed_query() {
            pairs.push(("q", q.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("estado", status.code().to_string()));
        }
        if let Some(level) = self.level {
            pairs.push(("nivel", level.code().to_string()));
        }
        if let Some(area) = self.area {
            pairs.push(("area", area.code().to_string()));
        }
        pairs
    }

    /// Local re-filtering of whatever the endpoint returned.
    pub fn matches(&self, competition: &Competition) -> bool {
        let by_query = match self.trimmed_query() {
            None => true,
            Some(q) => {
                let q = q.to_lowercase();
                competition.name.to_lowercase().contains(&q)
                    || competition.area.label().to_lowercase().contains(&q)
            }
        };
        by_query
            && self.status.map_or(true, |s| competition.status == Some(s))
            && self.level.map_or(true, |l| competition.level == l)
            && self.area.map_or(true, |a| competition.area == a)
    }

    fn trimmed_query(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// One of the caller's inscriptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InscriptionDto {
    #[serde(default, alias = "inscriptionId")]
    pub id: Option<String>,
    #[serde(default)]
    pub competition_id: Option<String>,
    #[serde(default)]
    pub competition: Option<InscriptionCompetition>,
    #[serde(rename = "fechaInscripcion", default, alias = "createdAt")]
    pub enrolled_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InscriptionCompetition {
    pub id: String,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "etapaActual", default)]
    pub current_stage: Option<String>,
}

impl InscriptionDto {
    /// The competition this inscription belongs to, from either field.
    pub fn competition_id(&self) -> Option<&str> {
        self.competition_id
            .as_deref()
            .or_else(|| self.competition.as_ref().map(|c| c.id.as_str()))
    }
}

/// Array, `{items}` or `{competitions}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InscriptionList {
    Items { items: Vec<InscriptionDto> },
    Competitions { competitions: Vec<InscriptionDto> },
    Bare(Vec<InscriptionDto>),
}

impl InscriptionList {
    pub fn into_vec(self) -> Vec<InscriptionDto> {
        match self {
            InscriptionList::Items { items } => items,
            InscriptionList::Competitions { competitions } => competitions,
            InscriptionList::Bare(items) => items,
        }
    }
}
