use crate::error::{Result, StreakError};
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// All "today" and day-boundary computations happen in this zone. The
/// reminder schedule (midnight, 5 PM, 10 PM) is expressed in it as well.
pub const REFERENCE_TZ: Tz = chrono_tz::America::New_York;

const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// CalendarDate
// ---------------------------------------------------------------------------

/// A day on the calendar with no time-of-day or zone attached.
///
/// Ordering is chronological, and differences are counted in whole calendar
/// days, so daylight-saving transitions never produce a 23- or 25-hour "day".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

static DATE_RE: OnceLock<Regex> = OnceLock::new();

fn date_re() -> &'static Regex {
    DATE_RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(CalendarDate)
    }

    /// Parse a strict `YYYY-MM-DD` string. Rejects anything chrono would
    /// otherwise be lenient about (missing zero padding, trailing text).
    pub fn parse(s: &str) -> Result<Self> {
        if !date_re().is_match(s) {
            return Err(StreakError::InvalidDate(s.to_string()));
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(CalendarDate)
            .map_err(|_| StreakError::InvalidDate(s.to_string()))
    }

    /// The calendar date of `instant` as observed in the reference timezone.
    pub fn in_reference_tz(instant: DateTime<Utc>) -> Self {
        CalendarDate(instant.with_timezone(&REFERENCE_TZ).date_naive())
    }

    /// Whole calendar days from `earlier` to `self` (negative if `earlier`
    /// is actually later).
    pub fn days_since(self, earlier: CalendarDate) -> i64 {
        (self.0 - earlier.0).num_days()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = StreakError;

    fn from_str(s: &str) -> Result<Self> {
        CalendarDate::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = StreakError;

    fn try_from(s: String) -> Result<Self> {
        CalendarDate::parse(&s)
    }
}

impl From<CalendarDate> for String {
    fn from(d: CalendarDate) -> Self {
        d.to_string()
    }
}

/// Hour of day (0-23) of `instant` in the reference timezone.
pub fn reference_hour(instant: DateTime<Utc>) -> u32 {
    instant.with_timezone(&REFERENCE_TZ).hour()
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of "today" and of the hour used to pick a reminder slot. The
/// engine never reads the wall clock directly.
pub trait Clock: Send + Sync {
    fn today(&self) -> CalendarDate;

    /// Hour of day (0-23) in [`REFERENCE_TZ`].
    fn hour(&self) -> u32;
}

/// Wall clock, read in [`REFERENCE_TZ`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::in_reference_tz(Utc::now())
    }

    fn hour(&self) -> u32 {
        reference_hour(Utc::now())
    }
}

/// A clock pinned to one date and hour, for tests and for replaying a
/// given check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    pub date: CalendarDate,
    pub hour: u32,
}

impl FixedClock {
    /// Pinned to noon on `date`.
    pub fn on(date: CalendarDate) -> Self {
        Self { date, hour: 12 }
    }

    pub fn at_hour(self, hour: u32) -> Self {
        Self { hour, ..self }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.date
    }

    fn hour(&self) -> u32 {
        self.hour
    }
}
