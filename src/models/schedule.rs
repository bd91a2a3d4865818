//! Schedule assignment (solution) model.
//!
//! A [`ScheduleAssignment`] is one complete weekly plan: exactly one
//! placed occurrence per requested (course, multiplicity-slot) unit.
//! Assignments are value snapshots, never mutated after the search
//! emits them, so callers can save or share them freely.
//!
//! Identity for deduplication is the [`Fingerprint`]: the sorted
//! multiset of (course, day, start minute). Two assignments that place
//! the same occurrences in a different unit order are the same plan.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::{ConstraintSet, CourseOccurrence, TimeOfDay, Weekday};

/// One scheduled occurrence inside an assignment.
///
/// Snapshots the occurrence by value; the end time is resolved at
/// placement time (explicit end, or start plus the assumed duration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedCourse {
    /// Course display name.
    pub course: String,
    /// Identifier of the chosen occurrence.
    pub occurrence_id: String,
    /// Day of week.
    pub day: Weekday,
    /// Start time.
    pub start: TimeOfDay,
    /// Resolved end time.
    pub end: TimeOfDay,
    /// Where the course takes place.
    pub location: String,
}

impl PlacedCourse {
    /// Snapshots an occurrence into a placement.
    pub fn from_occurrence(occurrence: &CourseOccurrence, assumed_duration_min: u32) -> Self {
        Self {
            course: occurrence.course.clone(),
            occurrence_id: occurrence.id.clone(),
            day: occurrence.day,
            start: occurrence.start,
            end: occurrence.end_or_assumed(assumed_duration_min),
            location: occurrence.location.clone(),
        }
    }
}

/// A complete weekly schedule: one feasible combination of occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    placements: Vec<PlacedCourse>,
}

impl ScheduleAssignment {
    /// Creates an assignment from its placements.
    pub fn new(placements: Vec<PlacedCourse>) -> Self {
        Self { placements }
    }

    /// All placements, in unit assignment order.
    pub fn placements(&self) -> &[PlacedCourse] {
        &self.placements
    }

    /// Number of placed courses.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the assignment is empty.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placements on a given day, sorted by start time.
    pub fn courses_on(&self, day: Weekday) -> Vec<&PlacedCourse> {
        let mut on_day: Vec<&PlacedCourse> =
            self.placements.iter().filter(|p| p.day == day).collect();
        on_day.sort_by_key(|p| p.start);
        on_day
    }

    /// Number of placements on a given day.
    pub fn count_on(&self, day: Weekday) -> usize {
        self.placements.iter().filter(|p| p.day == day).count()
    }

    /// Days that carry at least one placement, in week order.
    pub fn days_used(&self) -> BTreeSet<Weekday> {
        self.placements.iter().map(|p| p.day).collect()
    }

    /// All placements of a course, in unit assignment order.
    pub fn find_course(&self, course: &str) -> Vec<&PlacedCourse> {
        self.placements.iter().filter(|p| p.course == course).collect()
    }

    /// Canonical identity of this schedule.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut keys: Vec<String> = self
            .placements
            .iter()
            .map(|p| format!("{}@{}@{}", p.course, p.day.code(), p.start.minutes()))
            .collect();
        keys.sort();
        Fingerprint(keys.join("|"))
    }
}

/// Canonical, order-independent identity of a schedule.
///
/// Derived from the sorted multiset of (course, day, start minute).
/// Equal fingerprints mean the same plan regardless of the order the
/// search assigned its units in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The canonical key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derived metrics of one assignment.
///
/// Pure function of the assignment; useful for display and for ranking
/// plans by personal taste without re-walking the placements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Total placed courses.
    pub course_count: usize,
    /// Number of distinct days used.
    pub days_used: usize,
    /// The day with the most courses, with its count.
    pub busiest_day: Option<(Weekday, usize)>,
    /// Largest idle gap between consecutive same-day courses (minutes).
    pub longest_gap_min: u32,
    /// Earliest start across the week.
    pub earliest_start: Option<TimeOfDay>,
    /// Latest end across the week.
    pub latest_end: Option<TimeOfDay>,
}

impl ScheduleSummary {
    /// Computes the summary of an assignment.
    ///
    /// Gap measurement matches the solver's gap constraint: consecutive
    /// same-day placements ordered by start, gap = next start minus
    /// previous end, only positive gaps count.
    pub fn calculate(assignment: &ScheduleAssignment) -> Self {
        let mut busiest: Option<(Weekday, usize)> = None;
        let mut longest_gap: u32 = 0;

        for day in assignment.days_used() {
            let on_day = assignment.courses_on(day);
            let count = on_day.len();
            if busiest.map_or(true, |(_, best)| count > best) {
                busiest = Some((day, count));
            }
            for pair in on_day.windows(2) {
                let gap =
                    i32::from(pair[1].start.minutes()) - i32::from(pair[0].end.minutes());
                if gap > 0 {
                    longest_gap = longest_gap.max(gap as u32);
                }
            }
        }

        Self {
            course_count: assignment.len(),
            days_used: assignment.days_used().len(),
            busiest_day: busiest,
            longest_gap_min: longest_gap,
            earliest_start: assignment.placements().iter().map(|p| p.start).min(),
            latest_end: assignment.placements().iter().map(|p| p.end).max(),
        }
    }
}

/// Checks every hard constraint of a set against a finished assignment.
///
/// The search already guarantees this for everything it emits; the
/// check exists for tests and for callers that load saved plans back
/// in after the constraint set changed.
pub fn satisfies(assignment: &ScheduleAssignment, set: &ConstraintSet) -> bool {
    for p in assignment.placements() {
        if !set.day_allowed(p.day) {
            return false;
        }
    }

    for day in assignment.days_used() {
        let on_day = assignment.courses_on(day);

        if let Some(max) = set.max_per_day {
            if on_day.len() > max {
                return false;
            }
        }

        if set.unique_course_per_day {
            let mut names = BTreeSet::new();
            for p in &on_day {
                if !names.insert(p.course.as_str()) {
                    return false;
                }
            }
        }

        if set.prevent_overlaps {
            for pair in on_day.windows(2) {
                if pair[1].start < pair[0].end {
                    return false;
                }
            }
        }

        if let Some(max_gap) = set.max_gap_minutes() {
            for pair in on_day.windows(2) {
                let gap =
                    i32::from(pair[1].start.minutes()) - i32::from(pair[0].end.minutes());
                if gap > 0 && gap as u32 > max_gap {
                    return false;
                }
            }
        }
    }

    true
}
