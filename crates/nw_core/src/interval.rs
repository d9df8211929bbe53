use chrono::{DateTime, Datelike, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Time unit used to carve search results into windows. Owns the
/// unit-specific arithmetic and label formatting so the per-unit dispatch
/// stays in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl Default for IntervalUnit {
    fn default() -> Self {
        Self::Hours
    }
}

impl IntervalUnit {
    /// Start of a window of `value` units ending at `end`.
    ///
    /// Minutes through weeks are fixed durations (a week is seven days).
    /// Months and years use calendar-aware subtraction, so one month
    /// before March 31 lands on the last valid day of February.
    /// Subtraction saturates at the earliest representable instant, so a
    /// window larger than the calendar never panics.
    pub fn window_start(&self, end: DateTime<Utc>, value: u32) -> DateTime<Utc> {
        let start = match self {
            Self::Minutes => Duration::try_minutes(value as i64)
                .and_then(|span| end.checked_sub_signed(span)),
            Self::Hours => Duration::try_hours(value as i64)
                .and_then(|span| end.checked_sub_signed(span)),
            Self::Days => Duration::try_days(value as i64)
                .and_then(|span| end.checked_sub_signed(span)),
            Self::Weeks => Duration::try_days(value as i64 * 7)
                .and_then(|span| end.checked_sub_signed(span)),
            Self::Months => end.checked_sub_months(Months::new(value)),
            Self::Years => end.checked_sub_months(Months::new(value.saturating_mul(12))),
        };
        start.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Human-readable label for a window, e.g.
    /// "Last 6 hours (Jan 15 04:30 - 10:30)".
    pub fn label(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        let span = end - start;
        match self {
            Self::Minutes => format!(
                "Last {} minutes ({} - {})",
                span.num_minutes(),
                start.format("%H:%M"),
                end.format("%H:%M")
            ),
            Self::Hours => format!(
                "Last {} hours ({} - {})",
                span.num_hours(),
                start.format("%b %d %H:%M"),
                end.format("%H:%M")
            ),
            Self::Days => format!(
                "Last {} days ({} - {})",
                span.num_days(),
                start.format("%b %d"),
                end.format("%b %d")
            ),
            Self::Weeks => format!(
                "Last {} weeks ({} - {})",
                span.num_days() / 7,
                start.format("%b %d"),
                end.format("%b %d")
            ),
            Self::Months => format!(
                "Last {} months ({} - {})",
                months_between(start, end),
                start.format("%b %Y"),
                end.format("%b %Y")
            ),
            Self::Years => format!(
                "Last {} years ({} - {})",
                months_between(start, end) / 12,
                start.format("%Y"),
                end.format("%Y")
            ),
        }
    }
}

/// Whole calendar months between two instants.
fn months_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    if end <= start {
        return 0;
    }
    let mut months = (end.year() as i64 - start.year() as i64) * 12
        + (end.month() as i64 - start.month() as i64);
    if months > 0 {
        let candidate = start.checked_add_months(Months::new(months as u32));
        if candidate.map_or(false, |c| c > end) {
            months -= 1;
        }
    }
    months.max(0)
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for IntervalUnit {
    type Err = Error;

    /// Case-insensitive, singular forms accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minute" | "minutes" => Ok(Self::Minutes),
            "hour" | "hours" => Ok(Self::Hours),
            "day" | "days" => Ok(Self::Days),
            "week" | "weeks" => Ok(Self::Weeks),
            "month" | "months" => Ok(Self::Months),
            "year" | "years" => Ok(Self::Years),
            other => Err(Error::Validation(format!(
                "Invalid time interval: {}. Supported values: minutes, hours, days, weeks, months, years",
                other
            ))),
        }
    }
}
