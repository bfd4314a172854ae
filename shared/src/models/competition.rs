use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Result, SharedError};
use crate::models::auth::Session;
use crate::models::catalog::{Area, CompetitionStatus, Level};
use crate::models::stage::{Phase, Stage};
use crate::schedule;

lazy_static! {
    static ref NAME_REGEX: Regex = Regex::new(r"^[A-Za-zÁÉÍÓÚÜáéíóúüÑñ\s]{1,45}$").unwrap();
}

pub const NAME_MESSAGE: &str = "Invalid name: letters and spaces only, at most 45 characters.";
pub const START_DATE_MESSAGE: &str = "Select a start date.";
pub const PARTICIPANTS_MESSAGE: &str = "Participants must be between 1 and 4.";

/// Whether a (trimmed) competition name passes the form rule.
pub fn is_valid_name(name: &str) -> bool {
    NAME_REGEX.is_match(name.trim())
}

/// A competition as the screens work with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    pub id: String,
    pub name: String,
    pub level: Level,
    pub area: Area,
    pub status: Option<CompetitionStatus>,
    pub participants: u8,
    pub start_date: Option<NaiveDate>,
    pub modality: Option<String>,
    pub grading_method: Option<String>,
    /// Disabled competitions stay listed but take no inscriptions
    pub enabled: bool,
    pub phases: Vec<Phase>,
    pub stages: Vec<Stage>,
}

impl Competition {
    pub fn current_stage(&self, now: NaiveDateTime) -> Option<&Stage> {
        schedule::current_stage(&self.stages, now)
    }

    pub fn latest_started_stage(&self, today: NaiveDate) -> Option<&Stage> {
        schedule::latest_started_stage(&self.stages, today)
    }

    pub fn is_inscription_open(&self, now: NaiveDateTime) -> bool {
        schedule::is_inscription_open(&self.stages, now)
    }

    /// Whether the enroll button is offered.
    pub fn can_enroll(&self, session: &Session, enrolled: bool, now: NaiveDateTime) -> bool {
        let allowed = self.enabled
            && session.is_authenticated()
            && session.permissions().inscriptions.create
            && !enrolled
            && self.is_inscription_open(now);
        debug!("competition {} enroll allowed: {}", self.id, allowed);
        allowed
    }

    /// Whether the withdraw button is offered.
    pub fn can_unenroll(&self, session: &Session, enrolled: bool) -> bool {
        session.is_authenticated() && session.permissions().inscriptions.delete && enrolled
    }

    pub fn to_draft(&self) -> CompetitionDraft {
        CompetitionDraft {
            name: self.name.clone(),
            level: self.level,
            status: self.status.unwrap_or(CompetitionStatus::Inscription),
            area: self.area,
            participants: self.participants,
            start_date: self.start_date,
            stages: self.stages.clone(),
            phases: self.phases.clone(),
        }
    }
}

/// Editable fields of the create/edit competition form.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CompetitionDraft {
    #[validate(regex(path = "NAME_REGEX", message = "Invalid name: letters and spaces only, at most 45 characters."))]
    pub name: String,
    pub level: Level,
    pub status: CompetitionStatus,
    pub area: Area,
    #[validate(range(min = 1, max = 4, message = "Participants must be between 1 and 4."))]
    pub participants: u8,
    pub start_date: Option<NaiveDate>,
    pub stages: Vec<Stage>,
    pub phases: Vec<Phase>,
}

impl CompetitionDraft {
    pub fn new(name: impl Into<String>, level: Level, area: Area) -> Self {
        Self {
            name: name.into(),
            level,
            status: CompetitionStatus::Inscription,
            area,
            participants: 1,
            start_date: None,
            stages: Vec::new(),
            phases: Vec::new(),
        }
    }

    /// Pre-submit check. The first failing rule wins: name, participants,
    /// start date, then the stage schedule.
    pub fn validate_form(&self) -> Result<()> {
        if !is_valid_name(&self.name) {
            return Err(SharedError::Validation(NAME_MESSAGE.to_string()));
        }
        if !(1..=4).contains(&self.participants) {
            return Err(SharedError::Validation(PARTICIPANTS_MESSAGE.to_string()));
        }
        if self.start_date.is_none() {
            return Err(SharedError::Validation(START_DATE_MESSAGE.to_string()));
        }
        schedule::validate_schedule(&self.stages, &self.phases)?;

        // Derived field rules, against the trimmed name.
        let trimmed = Self {
            name: self.name.trim().to_string(),
            ..self.clone()
        };
        trimmed.validate()?;
        Ok(())
    }
}
