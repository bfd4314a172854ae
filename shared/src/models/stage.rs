use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SharedError;

/// The five fixed steps of a competition's lifecycle, in schedule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StageKind {
    #[serde(rename = "INSCRIPCION")]
    Inscription,
    #[serde(rename = "DESARROLLO")]
    Development,
    #[serde(rename = "EVALUACION")]
    Evaluation,
    #[serde(rename = "CORRECCION")]
    Correction,
    #[serde(rename = "PREMIACION")]
    Awarding,
}

impl StageKind {
    pub const ALL: [StageKind; 5] = [
        StageKind::Inscription,
        StageKind::Development,
        StageKind::Evaluation,
        StageKind::Correction,
        StageKind::Awarding,
    ];

    /// Code used by the REST API.
    pub fn code(self) -> &'static str {
        match self {
            StageKind::Inscription => "INSCRIPCION",
            StageKind::Development => "DESARROLLO",
            StageKind::Evaluation => "EVALUACION",
            StageKind::Correction => "CORRECCION",
            StageKind::Awarding => "PREMIACION",
        }
    }

    /// Label shown on screen.
    pub fn label(self) -> &'static str {
        match self {
            StageKind::Inscription => "Inscripción",
            StageKind::Development => "Desarrollo",
            StageKind::Evaluation => "Evaluación",
            StageKind::Correction => "Corrección",
            StageKind::Awarding => "Premiación",
        }
    }

    /// Accepts the exact label shown in the stage selector.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.label() == label)
    }

    /// Only the correction window may stay open-ended.
    pub fn requires_end_date(self) -> bool {
        !matches!(self, StageKind::Correction)
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StageKind {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        StageKind::ALL
            .into_iter()
            .find(|k| k.code().eq_ignore_ascii_case(s))
            .or_else(|| Self::from_label(s))
            .ok_or_else(|| SharedError::UnknownCode(format!("stage {}", s)))
    }
}

/// One stage of a competition schedule.
///
/// Dates are calendar days. A stage is in effect from 00:00:00 of its start
/// day through the last instant of its end day; without an end day it never closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Backend identifier, absent for stages not yet saved
    pub id: Option<String>,
    pub kind: StageKind,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Stage {
    pub fn new(kind: StageKind, start_date: NaiveDate, end_date: Option<NaiveDate>) -> Self {
        Self {
            id: None,
            kind,
            start_date: Some(start_date),
            end_date,
        }
    }

    /// First instant of the stage, or `None` when the start day is unknown.
    pub fn opens_at(&self) -> Option<NaiveDateTime> {
        self.start_date.map(|d| d.and_time(NaiveTime::MIN))
    }

    /// Last instant of the stage, 23:59:59.999999999 of the end day; `None`
    /// means open-ended.
    pub fn closes_at(&self) -> Option<NaiveDateTime> {
        self.end_date
            .and_then(|d| d.and_hms_nano_opt(23, 59, 59, 999_999_999))
    }

    /// Whether `now` lies inside the stage's effective range.
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        let Some(opens) = self.opens_at() else {
            return false;
        };
        now >= opens && self.closes_at().map_or(true, |closes| now <= closes)
    }
}

/// A named slice of the development stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Backend identifier, absent for phases not yet saved
    pub id: Option<String>,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Phase {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.into(),
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }
}
