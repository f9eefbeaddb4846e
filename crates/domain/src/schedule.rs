//! Wall-clock times and the elapsed time between them.
//!
//! Routines store their times as free text such as `"7:05"` or `"19:30"`.
//! This module parses that text and computes the span between a start and
//! an end time, wrapping past midnight when the end is earlier than the start.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

/// Text shown in place of a duration when either time fails to parse.
pub const INVALID_TIME_FORMAT: &str = "Invalid time format";

/// Failure to interpret a wall-clock time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("expected a time like HH:mm, got {0:?}")]
    Malformed(String),

    #[error("time {0:?} is outside 00:00-23:59")]
    OutOfRange(String),
}

/// A time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build a clock time from hour and minute components.
    ///
    /// Returns `None` when `hour > 23` or `minute > 59`.
    #[must_use]
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    #[must_use]
    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    #[must_use]
    pub fn minute(self) -> u32 {
        self.0.minute()
    }
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for ClockTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (hour, minute) = trimmed
            .split_once(':')
            .and_then(|(h, m)| Some((parse_component(h)?, parse_component(m)?)))
            .ok_or_else(|| ScheduleError::Malformed(s.to_string()))?;
        Self::from_hm(hour, minute).ok_or_else(|| ScheduleError::OutOfRange(s.to_string()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Elapsed time between two clock times, always within `[0, 24h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    minutes: u32,
}

impl Span {
    /// Time from `start` until the next occurrence of `end`.
    #[must_use]
    pub fn between(start: ClockTime, end: ClockTime) -> Self {
        let mut delta = end.0.signed_duration_since(start.0);
        if delta < TimeDelta::zero() {
            delta += TimeDelta::days(1);
        }
        // bounded by one day, so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let minutes = delta.num_minutes() as u32;
        Self { minutes }
    }

    #[must_use]
    pub fn hours(self) -> u32 {
        self.minutes / 60
    }

    /// Minutes past the last full hour.
    #[must_use]
    pub fn minutes(self) -> u32 {
        self.minutes % 60
    }

    #[must_use]
    pub fn as_seconds(self) -> u64 {
        u64::from(self.minutes) * 60
    }

    /// Human readable form, e.g. `"1 hours 30 minutes"`.
    #[must_use]
    pub fn describe(self) -> String {
        format!("{} hours {} minutes", self.hours(), self.minutes())
    }
}

/// Parse both times and compute the span between them.
///
/// # Errors
///
/// Returns [`ScheduleError`] if either string is not a valid clock time.
pub fn span_between(start: &str, end: &str) -> Result<Span, ScheduleError> {
    Ok(Span::between(start.parse()?, end.parse()?))
}

/// Display string for the span between two times, or [`INVALID_TIME_FORMAT`].
#[must_use]
pub fn describe_between(start: &str, end: &str) -> String {
    span_between(start, end).map_or_else(|_| INVALID_TIME_FORMAT.to_string(), Span::describe)
}
