use std::fmt::Write as _;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use log::debug;
use sansi_shared::{
    timezone, validate_schedule, Area, Competition, CompetitionFilter, CompetitionStatus,
    GradeRequest, Level, Session, SessionUser,
};

use crate::api::ApiClient;

#[derive(Parser, Debug)]
#[command(name = "sansi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Oh! Sansi! competitions from the command line", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend base URL (overrides SANSI_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token (overrides SANSI_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List competitions with their current stage
    List {
        /// Text searched in the name and area
        #[arg(short, long)]
        query: Option<String>,

        /// Status code or label, e.g. INSCRIPCION
        #[arg(long)]
        status: Option<String>,

        /// Level code or label, e.g. PRINCIPIANTE
        #[arg(long)]
        level: Option<String>,

        /// Area code or label, e.g. ROBOTICA
        #[arg(long)]
        area: Option<String>,
    },

    /// Show one competition: stages, phases and the inscription window
    Show {
        /// Competition ID
        id: String,
    },

    /// Run the schedule checks on a stored competition
    Check {
        /// Competition ID
        id: String,
    },

    /// Enroll the logged-in student
    Enroll {
        /// Competition ID
        id: String,
    },

    /// Withdraw the logged-in student's inscription
    Unenroll {
        /// Competition ID
        id: String,
    },

    /// Grade a student's work
    Grade {
        /// Competition ID
        competition_id: String,

        /// Student ID
        student_id: String,

        /// Grade between 0 and 100
        grade: String,

        /// Optional remarks
        #[arg(short, long, default_value = "")]
        details: String,
    },

    /// Show the logged-in user
    Me,
}

impl Commands {
    fn filter(&self) -> Result<CompetitionFilter> {
        let Commands::List {
            query,
            status,
            level,
            area,
        } = self
        else {
            return Ok(CompetitionFilter::default());
        };
        Ok(CompetitionFilter {
            query: query.clone(),
            status: status
                .as_deref()
                .map(str::parse::<CompetitionStatus>)
                .transpose()?,
            level: level.as_deref().map(str::parse::<Level>).transpose()?,
            area: area.as_deref().map(str::parse::<Area>).transpose()?,
        })
    }
}

/// Runs one command and returns what should be printed.
pub async fn run(command: &Commands, client: &ApiClient) -> Result<String> {
    let zone = client.config().timezone.clone();
    let now = timezone::now_in(&zone);
    debug!("Running {:?} at {} ({})", command, now, zone);

    match command {
        Commands::List { .. } => {
            let filter = command.filter()?;
            let competitions = client
                .list_competitions(&filter)
                .await
                .context("Could not load competitions")?;
            Ok(render_list(&competitions, now))
        }
        Commands::Show { id } => {
            let competition = client
                .get_competition(id)
                .await
                .with_context(|| format!("Could not load competition {}", id))?;
            let session = client.session().await?;
            let enrolled = client.inscription_for(id).await?.is_some();
            Ok(render_detail(&competition, &session, enrolled, now))
        }
        Commands::Check { id } => {
            let competition = client
                .get_competition(id)
                .await
                .with_context(|| format!("Could not load competition {}", id))?;
            Ok(render_check(&competition))
        }
        Commands::Enroll { id } => {
            client.enroll(id).await?;
            Ok(format!("Enrolled in competition {}.", id))
        }
        Commands::Unenroll { id } => {
            client.unenroll(id).await?;
            Ok(format!("Withdrew from competition {}.", id))
        }
        Commands::Grade {
            competition_id,
            student_id,
            grade,
            details,
        } => {
            let request = GradeRequest::from_form(grade, details)?;
            client
                .grade_student(competition_id, student_id, &request)
                .await?;
            Ok("Evaluation saved.".to_string())
        }
        Commands::Me => Ok(render_me(client.me().await?.as_ref())),
    }
}

/// One line per competition, stage picked the way the home list does it.
pub fn render_list(competitions: &[Competition], now: NaiveDateTime) -> String {
    if competitions.is_empty() {
        return "No competitions found.\n".to_string();
    }
    let mut out = String::new();
    for c in competitions {
        let stage = c
            .latest_started_stage(now.date())
            .map_or("-", |s| s.kind.label());
        let _ = writeln!(
            out,
            "{:<12} {:<45} {:<13} {:<12} {}",
            c.id,
            c.name,
            c.level.label(),
            c.area.label(),
            stage
        );
    }
    out
}

pub fn render_detail(
    competition: &Competition,
    session: &Session,
    enrolled: bool,
    now: NaiveDateTime,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", competition.name, competition.id);
    let _ = writeln!(
        out,
        "Level: {}  Area: {}  Participants: {}",
        competition.level.label(),
        competition.area.label(),
        competition.participants
    );
    if let Some(status) = competition.status {
        let _ = writeln!(out, "Status: {}", status.label());
    }
    if !competition.enabled {
        let _ = writeln!(out, "Disabled");
    }

    let current = competition.current_stage(now);
    let _ = writeln!(out, "Stages:");
    for stage in &competition.stages {
        let marker = if current.map_or(false, |c| c.kind == stage.kind) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            " {} {:<12} {} .. {}",
            marker,
            stage.kind.label(),
            date_or_dash(stage.start_date),
            date_or_dash(stage.end_date)
        );
    }

    if !competition.phases.is_empty() {
        let _ = writeln!(out, "Phases:");
        for phase in &competition.phases {
            let _ = writeln!(
                out,
                "   {:<20} {} .. {}",
                phase.name,
                date_or_dash(phase.start_date),
                date_or_dash(phase.end_date)
            );
        }
    }

    let window = if competition.is_inscription_open(now) {
        "open"
    } else {
        "closed"
    };
    let _ = writeln!(out, "Inscriptions: {}", window);
    if enrolled {
        let _ = writeln!(out, "You are enrolled.");
        if competition.can_unenroll(session, enrolled) {
            let _ = writeln!(out, "You can withdraw: sansi unenroll {}", competition.id);
        }
    } else if competition.can_enroll(session, enrolled, now) {
        let _ = writeln!(out, "You can enroll: sansi enroll {}", competition.id);
    }
    out
}

pub fn render_check(competition: &Competition) -> String {
    match validate_schedule(&competition.stages, &competition.phases) {
        Ok(()) => format!("{}: schedule is valid.\n", competition.name),
        Err(err) => format!("{}: {}\n", competition.name, err),
    }
}

pub fn render_me(user: Option<&SessionUser>) -> String {
    match user {
        None => "Not logged in.\n".to_string(),
        Some(user) => {
            let perms = user.permissions();
            let mut out = format!("{} <{}> ({})\n", user.name, user.email, user.role);
            let _ = writeln!(
                out,
                "Competitions: {}  Users: {}  My competitions: {}",
                yes_no(perms.can_see_competitions()),
                yes_no(perms.can_see_users()),
                yes_no(perms.can_see_my_competitions())
            );
            out
        }
    }
}

fn date_or_dash(date: Option<chrono::NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
