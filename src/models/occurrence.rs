//! Course occurrence model.
//!
//! An occurrence is one concrete weekly time slot of a named course:
//! day of week, start time, optional end time, location. A course that
//! runs three times a week is three occurrences sharing a course name.
//!
//! # Time Model
//! Clock times have minute resolution and are stored as minutes since
//! midnight. Input arrives as `HH:MM` strings and is converted at the
//! catalog boundary; an occurrence without an explicit end time gets an
//! assumed duration from the constraint set when interval math needs it.
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling"

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of week.
///
/// Parsed from the two-letter codes used by catalog data (`MO`..`SU`).
/// Ordering follows the week, Monday first, so day-sorted output and
/// fingerprints are canonical.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days in week order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Two-letter day code (`MO`, `TU`, `WE`, `TH`, `FR`, `SA`, `SU`).
    pub fn code(&self) -> &'static str {
        match self {
            Weekday::Monday => "MO",
            Weekday::Tuesday => "TU",
            Weekday::Wednesday => "WE",
            Weekday::Thursday => "TH",
            Weekday::Friday => "FR",
            Weekday::Saturday => "SA",
            Weekday::Sunday => "SU",
        }
    }

    /// Parses a two-letter day code, case-insensitive.
    pub fn from_code(code: &str) -> Option<Weekday> {
        match code.to_ascii_uppercase().as_str() {
            "MO" => Some(Weekday::Monday),
            "TU" => Some(Weekday::Tuesday),
            "WE" => Some(Weekday::Wednesday),
            "TH" => Some(Weekday::Thursday),
            "FR" => Some(Weekday::Friday),
            "SA" => Some(Weekday::Saturday),
            "SU" => Some(Weekday::Sunday),
            _ => None,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A clock time with minute resolution, stored as minutes since midnight.
///
/// Values past 24:00 are representable so that computed end times of
/// late-evening occurrences stay ordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeOfDay(u16);

/// Failure to parse an `HH:MM` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParseError {
    /// The rejected input.
    pub value: String,
}

impl fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a valid HH:MM time: `{}`", self.value)
    }
}

impl std::error::Error for TimeParseError {}

impl TimeOfDay {
    /// Creates a time from an hour and minute.
    pub fn new(hour: u16, minute: u16) -> Self {
        TimeOfDay(hour * 60 + minute)
    }

    /// Creates a time from raw minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Self {
        TimeOfDay(minutes)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(&self) -> u16 {
        self.0
    }

    /// Time as fractional hours (`19:30` is `19.5`).
    #[inline]
    pub fn fractional_hours(&self) -> f64 {
        f64::from(self.0) / 60.0
    }

    /// This time shifted later by `minutes`.
    pub fn plus_minutes(&self, minutes: u16) -> TimeOfDay {
        TimeOfDay(self.0 + minutes)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    /// Parses `HH:MM` with `00 <= HH <= 23` and `00 <= MM <= 59`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TimeParseError { value: s.into() };

        let (h, m) = s.split_once(':').ok_or_else(err)?;
        let hour: u16 = h.trim().parse().map_err(|_| err())?;
        let minute: u16 = m.trim().parse().map_err(|_| err())?;
        if hour > 23 || minute > 59 {
            return Err(err());
        }
        Ok(TimeOfDay::new(hour, minute))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A raw catalog row as delivered by the surrounding application.
///
/// Day codes and clock times are plain strings here; they are parsed and
/// validated when the catalog index is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccurrenceRecord {
    /// Stable occurrence identifier.
    pub id: String,
    /// Course display name (the logical course identity).
    pub course: String,
    /// Two-letter day code (`MO`..`SU`).
    pub day: String,
    /// Start time, `HH:MM`.
    pub start: String,
    /// End time, `HH:MM`. `None` = duration is assumed downstream.
    #[serde(default)]
    pub end: Option<String>,
    /// Where the course takes place.
    #[serde(default)]
    pub location: String,
    /// Whether this occurrence requires a partner.
    #[serde(default)]
    pub pair_only: bool,
    /// Whether the user is already registered. Informational only.
    #[serde(default)]
    pub registered: bool,
}

impl OccurrenceRecord {
    /// Creates a record with the required fields.
    pub fn new(
        id: impl Into<String>,
        course: impl Into<String>,
        day: impl Into<String>,
        start: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            course: course.into(),
            day: day.into(),
            start: start.into(),
            end: None,
            location: String::new(),
            pair_only: false,
            registered: false,
        }
    }

    /// Sets the end time.
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Marks the occurrence as requiring a partner.
    pub fn with_pair_only(mut self, pair_only: bool) -> Self {
        self.pair_only = pair_only;
        self
    }

    /// Marks the occurrence as already registered.
    pub fn with_registered(mut self, registered: bool) -> Self {
        self.registered = registered;
        self
    }
}

/// One validated weekly time slot of a named course.
///
/// Immutable once loaded; owned by the catalog index for the lifetime of
/// a planning session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOccurrence {
    /// Stable occurrence identifier.
    pub id: String,
    /// Course display name (the logical course identity).
    pub course: String,
    /// Day of week.
    pub day: Weekday,
    /// Start time.
    pub start: TimeOfDay,
    /// End time. `None` = duration is assumed when interval math needs it.
    pub end: Option<TimeOfDay>,
    /// Where the course takes place.
    pub location: String,
    /// Whether this occurrence requires a partner.
    pub pair_only: bool,
    /// Whether the user is already registered. Informational only.
    pub registered: bool,
}

impl CourseOccurrence {
    /// Creates an occurrence with the required fields.
    pub fn new(
        id: impl Into<String>,
        course: impl Into<String>,
        day: Weekday,
        start: TimeOfDay,
    ) -> Self {
        Self {
            id: id.into(),
            course: course.into(),
            day,
            start,
            end: None,
            location: String::new(),
            pair_only: false,
            registered: false,
        }
    }

    /// Sets the end time.
    pub fn with_end(mut self, end: TimeOfDay) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Marks the occurrence as requiring a partner.
    pub fn with_pair_only(mut self, pair_only: bool) -> Self {
        self.pair_only = pair_only;
        self
    }

    /// Marks the occurrence as already registered.
    pub fn with_registered(mut self, registered: bool) -> Self {
        self.registered = registered;
        self
    }

    /// End time, falling back to `start + assumed_duration_min`.
    pub fn end_or_assumed(&self, assumed_duration_min: u32) -> TimeOfDay {
        self.end
            .unwrap_or_else(|| self.start.plus_minutes(assumed_duration_min as u16))
    }

    /// Occupied interval `[start, end)` in minutes since midnight.
    pub fn interval(&self, assumed_duration_min: u32) -> (u16, u16) {
        (
            self.start.minutes(),
            self.end_or_assumed(assumed_duration_min).minutes(),
        )
    }

    /// Whether two occurrences occupy intersecting time on the same day.
    ///
    /// Intervals are closed-open: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &CourseOccurrence, assumed_duration_min: u32) -> bool {
        if self.day != other.day {
            return false;
        }
        let (a_start, a_end) = self.interval(assumed_duration_min);
        let (b_start, b_end) = other.interval(assumed_duration_min);
        a_start < b_end && b_start < a_end
    }
}
