use serde::{Deserialize, Serialize};

use crate::dto::common::{format_api_date, parse_optional_date};
use crate::error::{Result, SharedError};
use crate::models::stage::{Phase, Stage, StageKind};

/// Stage as carried by the competition endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "etapa")]
    pub kind: StageKind,
    #[serde(rename = "fechaInicio", default)]
    pub start_date: Option<String>,
    #[serde(rename = "fechaFin", default)]
    pub end_date: Option<String>,
}

/// Development phase as carried by the competition endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "fechaInicio", default)]
    pub start_date: Option<String>,
    #[serde(rename = "fechaFin", default)]
    pub end_date: Option<String>,
}

impl TryFrom<StageDto> for Stage {
    type Error = SharedError;

    fn try_from(dto: StageDto) -> Result<Self> {
        Ok(Stage {
            id: dto.id,
            kind: dto.kind,
            start_date: parse_optional_date(dto.start_date.as_deref())?,
            end_date: parse_optional_date(dto.end_date.as_deref())?,
        })
    }
}

impl From<&Stage> for StageDto {
    fn from(stage: &Stage) -> Self {
        StageDto {
            id: stage.id.clone(),
            kind: stage.kind,
            start_date: stage.start_date.map(format_api_date),
            end_date: stage.end_date.map(format_api_date),
        }
    }
}

impl TryFrom<PhaseDto> for Phase {
    type Error = SharedError;

    fn try_from(dto: PhaseDto) -> Result<Self> {
        Ok(Phase {
            id: dto.id,
            name: dto.name,
            start_date: parse_optional_date(dto.start_date.as_deref())?,
            end_date: parse_optional_date(dto.end_date.as_deref())?,
        })
    }
}

impl From<&Phase> for PhaseDto {
    fn from(phase: &Phase) -> Self {
        PhaseDto {
            id: phase.id.clone(),
            name: phase.name.clone(),
            start_date: phase.start_date.map(format_api_date),
            end_date: phase.end_date.map(format_api_date),
        }
    }
}
