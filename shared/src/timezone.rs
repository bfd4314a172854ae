use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Zone the olympiad calendar is kept in.
pub const DEFAULT_TIMEZONE: &str = "America/La_Paz";

/// Converts a UTC instant to wall-clock time in the named zone.
pub fn wall_clock(utc: chrono::DateTime<Utc>, timezone_name: &str) -> Option<NaiveDateTime> {
    let tz: Tz = timezone_name.parse().ok()?;
    Some(utc.with_timezone(&tz).naive_local())
}

/// Current wall-clock time in the named zone, falling back to UTC for an
/// unknown zone name.
pub fn now_in(timezone_name: &str) -> NaiveDateTime {
    let now = Utc::now();
    wall_clock(now, timezone_name).unwrap_or_else(|| {
        log::warn!("Unknown timezone {}, using UTC", timezone_name);
        now.naive_utc()
    })
}
