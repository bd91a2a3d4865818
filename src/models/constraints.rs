//! User-supplied scheduling constraints.
//!
//! A [`ConstraintSet`] is pure data: the selected courses plus every
//! filter and limit the solver must honor. All fields have documented
//! defaults and deserialize from sparse input, so a UI can send only
//! what the user changed. Validation happens once at the planner
//! boundary, not inside the search.
//!
//! # Hard constraints
//!
//! | Field | Effect |
//! |-------|--------|
//! | `allowed_days` / `blocked_days` | Day eligibility per occurrence |
//! | `earliest_hour` / `latest_hour` | Global clock window |
//! | `day_windows` | Per-day slot list, replaces the global window |
//! | `max_per_day` | Cap on courses per day |
//! | `max_gap_slots` | Cap on idle time between same-day courses |
//! | `unique_course_per_day` | Same course at most once per day |
//! | `prevent_overlaps` | No intersecting time ranges |
//! | `exclude_pair_courses` | Drop partner-required occurrences |

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::Weekday;

/// A clock window in fractional hours, `[start_hour, end_hour]`.
///
/// `19.5` means 19:30. Used for the global window override per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Window start (fractional hours).
    pub start_hour: f64,
    /// Window end (fractional hours).
    pub end_hour: f64,
}

impl TimeWindow {
    /// Creates a window.
    pub fn new(start_hour: f64, end_hour: f64) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Whether an occupied interval (minutes since midnight) fits
    /// entirely inside this window.
    pub fn contains_range(&self, start_min: u16, end_min: u16) -> bool {
        let start = f64::from(start_min) / 60.0;
        let end = f64::from(end_min) / 60.0;
        start >= self.start_hour && end <= self.end_hour
    }
}

/// The full constraint set for one planning request.
///
/// # Defaults
///
/// An empty JSON object deserializes to: no selection, every day
/// allowed, no clock window, no per-day caps or gap limit, overlaps
/// prevented, the same course at most once per day, pair courses
/// included, and a 60 minute assumed course duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintSet {
    /// Selected course names, in selection order. Selection order is
    /// the deterministic tie-break for the search.
    pub courses: Vec<String>,
    /// How many distinct occurrences of a course to schedule per week.
    /// Courses not listed here have multiplicity 1.
    pub multiplicity: HashMap<String, usize>,
    /// Days that may be used. `None` = all seven days.
    pub allowed_days: Option<BTreeSet<Weekday>>,
    /// Days that must not be used, subtracted from the allowed set.
    pub blocked_days: BTreeSet<Weekday>,
    /// Global earliest start, fractional hours. `None` = unbounded.
    pub earliest_hour: Option<f64>,
    /// Global latest end, fractional hours. `None` = unbounded.
    pub latest_hour: Option<f64>,
    /// Per-day slot lists. A day with entries here ignores the global
    /// window; an occurrence on that day must fit inside one slot.
    pub day_windows: HashMap<Weekday, Vec<TimeWindow>>,
    /// Maximum courses on any single day. `None` = unbounded.
    pub max_per_day: Option<usize>,
    /// Maximum idle time between consecutive same-day courses, in slot
    /// units of `course_duration_min`. `None` = unbounded.
    pub max_gap_slots: Option<u32>,
    /// Forbid scheduling the same course twice on one day.
    pub unique_course_per_day: bool,
    /// Forbid any two scheduled occurrences with intersecting times.
    pub prevent_overlaps: bool,
    /// Exclude occurrences that require a partner.
    pub exclude_pair_courses: bool,
    /// Assumed duration in minutes for occurrences without an explicit
    /// end time; also the slot unit for `max_gap_slots`.
    pub course_duration_min: u32,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            courses: Vec::new(),
            multiplicity: HashMap::new(),
            allowed_days: None,
            blocked_days: BTreeSet::new(),
            earliest_hour: None,
            latest_hour: None,
            day_windows: HashMap::new(),
            max_per_day: None,
            max_gap_slots: None,
            unique_course_per_day: true,
            prevent_overlaps: true,
            exclude_pair_courses: false,
            course_duration_min: 60,
        }
    }
}

impl ConstraintSet {
    /// Creates an empty constraint set with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course to the selection.
    pub fn select(mut self, course: impl Into<String>) -> Self {
        self.courses.push(course.into());
        self
    }

    /// Sets how many times per week a course must be scheduled.
    pub fn with_multiplicity(mut self, course: impl Into<String>, count: usize) -> Self {
        self.multiplicity.insert(course.into(), count);
        self
    }

    /// Restricts the plan to the given day, adding to the allowed set.
    pub fn allow_day(mut self, day: Weekday) -> Self {
        self.allowed_days.get_or_insert_with(BTreeSet::new).insert(day);
        self
    }

    /// Blocks a day entirely.
    pub fn block_day(mut self, day: Weekday) -> Self {
        self.blocked_days.insert(day);
        self
    }

    /// Sets the global clock window in fractional hours.
    pub fn between_hours(mut self, earliest: f64, latest: f64) -> Self {
        self.earliest_hour = Some(earliest);
        self.latest_hour = Some(latest);
        self
    }

    /// Adds a per-day slot, overriding the global window for that day.
    pub fn with_day_window(mut self, day: Weekday, start_hour: f64, end_hour: f64) -> Self {
        self.day_windows
            .entry(day)
            .or_default()
            .push(TimeWindow::new(start_hour, end_hour));
        self
    }

    /// Caps the number of courses on any single day.
    pub fn with_max_per_day(mut self, max: usize) -> Self {
        self.max_per_day = Some(max);
        self
    }

    /// Caps the idle time between consecutive same-day courses.
    pub fn with_max_gap_slots(mut self, slots: u32) -> Self {
        self.max_gap_slots = Some(slots);
        self
    }

    /// Sets whether the same course may appear twice on one day.
    pub fn with_unique_course_per_day(mut self, unique: bool) -> Self {
        self.unique_course_per_day = unique;
        self
    }

    /// Sets whether intersecting time ranges are forbidden.
    pub fn with_prevent_overlaps(mut self, prevent: bool) -> Self {
        self.prevent_overlaps = prevent;
        self
    }

    /// Excludes occurrences that require a partner.
    pub fn without_pair_courses(mut self) -> Self {
        self.exclude_pair_courses = true;
        self
    }

    /// Sets the assumed course duration in minutes.
    pub fn with_course_duration_min(mut self, minutes: u32) -> Self {
        self.course_duration_min = minutes;
        self
    }

    /// Requested multiplicity for a course (1 when not configured).
    pub fn multiplicity_of(&self, course: &str) -> usize {
        self.multiplicity.get(course).copied().unwrap_or(1)
    }

    /// Whether a day survives the allowed/blocked filters.
    pub fn day_allowed(&self, day: Weekday) -> bool {
        if self.blocked_days.contains(&day) {
            return false;
        }
        match &self.allowed_days {
            Some(allowed) => allowed.contains(&day),
            None => true,
        }
    }

    /// Maximum permitted gap in minutes, if a gap limit is configured.
    pub fn max_gap_minutes(&self) -> Option<u32> {
        self.max_gap_slots
            .map(|slots| slots * self.course_duration_min)
    }

    /// Total number of (course, multiplicity-slot) units requested.
    pub fn unit_count(&self) -> usize {
        self.courses.iter().map(|c| self.multiplicity_of(c)).sum()
    }
}
