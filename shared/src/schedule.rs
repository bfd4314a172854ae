//! Stage selection and date checks for a competition schedule.
//!
//! Everything here is a pure function of the schedule and a clock reading.
//! The current stage is recomputed on every call and never stored.

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use std::collections::HashSet;
use thiserror::Error;

use crate::models::stage::{Phase, Stage, StageKind};

/// A schedule that cannot be submitted. The message is shown to the user as is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Development stage needs start and end dates to validate phases.")]
    DevelopmentDatesMissing,

    #[error("Development stage is missing.")]
    DevelopmentMissing,

    #[error("Phase {0} needs start and end dates.")]
    PhaseDatesMissing(String),

    #[error("Phase {0} has end date before start date.")]
    PhaseEndsBeforeStart(String),

    #[error("Phase {0} starts before Development.")]
    PhaseStartsBeforeDevelopment(String),

    #[error("Phase {0} ends after Development.")]
    PhaseEndsAfterDevelopment(String),

    #[error("Stage {} needs start and end dates.", .0.label())]
    StageDatesMissing(StageKind),

    #[error("Stage {} needs a start date.", .0.label())]
    StageStartMissing(StageKind),

    #[error("Stage {} has end date before start date.", .0.label())]
    StageEndsBeforeStart(StageKind),

    #[error("Stage {} is defined more than once.", .0.label())]
    StageDuplicated(StageKind),
}

/// Returns the first stage, in the given order, whose range contains `now`.
///
/// Overlapping ranges are an upstream data error; the earlier stage wins.
pub fn current_stage(stages: &[Stage], now: NaiveDateTime) -> Option<&Stage> {
    let found = stages.iter().find(|stage| stage.contains(now));
    debug!(
        "current stage at {}: {}",
        now,
        found.map_or("none", |s| s.kind.code())
    );
    found
}

/// Dashboard rule: the started stage with the latest start day.
///
/// This is not the same answer as [`current_stage`]: a stage that already
/// closed still counts here until a later one starts.
pub fn latest_started_stage(stages: &[Stage], today: NaiveDate) -> Option<&Stage> {
    let mut best: Option<(&Stage, NaiveDate)> = None;
    for stage in stages {
        let Some(start) = stage.start_date else {
            continue;
        };
        if start > today {
            continue;
        }
        match best {
            Some((_, best_start)) if best_start >= start => {}
            _ => best = Some((stage, start)),
        }
    }
    best.map(|(stage, _)| stage)
}

/// Whether the inscription stage is open at `now`.
pub fn is_inscription_open(stages: &[Stage], now: NaiveDateTime) -> bool {
    stages
        .iter()
        .find(|s| s.kind == StageKind::Inscription)
        .map_or(false, |s| s.contains(now))
}

/// Checks that every phase sits inside the development stage.
///
/// Phases are checked in order and the first failure is returned, so the
/// user always sees the topmost offending row.
pub fn validate_phases(development: &Stage, phases: &[Phase]) -> Result<(), ScheduleError> {
    let (Some(dev_start), Some(dev_end)) = (development.start_date, development.end_date) else {
        return Err(ScheduleError::DevelopmentDatesMissing);
    };

    for phase in phases {
        let (Some(start), Some(end)) = (phase.start_date, phase.end_date) else {
            return Err(ScheduleError::PhaseDatesMissing(phase.name.clone()));
        };
        if end < start {
            return Err(ScheduleError::PhaseEndsBeforeStart(phase.name.clone()));
        }
        if start < dev_start {
            return Err(ScheduleError::PhaseStartsBeforeDevelopment(phase.name.clone()));
        }
        if end > dev_end {
            return Err(ScheduleError::PhaseEndsAfterDevelopment(phase.name.clone()));
        }
    }

    Ok(())
}

/// Checks each stage on its own: one per kind, dates present, range not inverted.
pub fn validate_stages(stages: &[Stage]) -> Result<(), ScheduleError> {
    let mut seen = HashSet::new();
    for stage in stages {
        if !seen.insert(stage.kind) {
            return Err(ScheduleError::StageDuplicated(stage.kind));
        }
        let Some(start) = stage.start_date else {
            return Err(if stage.kind.requires_end_date() {
                ScheduleError::StageDatesMissing(stage.kind)
            } else {
                ScheduleError::StageStartMissing(stage.kind)
            });
        };
        match stage.end_date {
            None if stage.kind.requires_end_date() => {
                return Err(ScheduleError::StageDatesMissing(stage.kind));
            }
            Some(end) if end < start => {
                return Err(ScheduleError::StageEndsBeforeStart(stage.kind));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Full pre-submit check of a competition schedule.
pub fn validate_schedule(stages: &[Stage], phases: &[Phase]) -> Result<(), ScheduleError> {
    validate_stages(stages)?;
    match stages.iter().find(|s| s.kind == StageKind::Development) {
        Some(development) => validate_phases(development, phases),
        None if phases.is_empty() => Ok(()),
        None => Err(ScheduleError::DevelopmentMissing),
    }
}
