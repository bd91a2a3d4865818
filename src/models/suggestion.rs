//! Constraint relaxation suggestions.
//!
//! When no schedule satisfies the active constraints, the suggestion
//! engine explains what to loosen. Each [`Suggestion`] is one concrete
//! relaxation with the affected course, day, or limit value filled in;
//! the `Display` form is ready to show to a user.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{TimeOfDay, Weekday};

/// One concrete constraint relaxation.
///
/// Ordered by estimated impact when produced by the suggestion engine:
/// the relaxation that would admit the most eliminated candidates
/// comes first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Suggestion {
    /// Widen the clock window so a filtered occurrence fits.
    WidenTimeWindow {
        course: String,
        day: Weekday,
        start: TimeOfDay,
        end: TimeOfDay,
    },
    /// Allow a day that currently filters out a course's occurrences.
    AddDay { course: String, day: Weekday },
    /// Add a per-day slot that would admit a filtered occurrence.
    AddTimeSlot {
        day: Weekday,
        start: TimeOfDay,
        end: TimeOfDay,
    },
    /// Re-enable partner-required occurrences for a course.
    EnablePairCourses { course: String },
    /// Raise the per-day course cap to the given value.
    RaiseMaxPerDay { to: usize },
    /// Raise the same-day gap limit to the given slot count.
    RaiseMaxGap { to: u32 },
    /// Drop a course from the selection; names the tightest one.
    ReduceSelection { course: String },
    /// Allow the same course twice on one day.
    AllowDuplicates,
    /// Allow overlapping time ranges.
    AllowOverlaps,
}

impl Suggestion {
    /// Creates a widen-window suggestion.
    pub fn widen_time_window(
        course: impl Into<String>,
        day: Weekday,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> Self {
        Self::WidenTimeWindow {
            course: course.into(),
            day,
            start,
            end,
        }
    }

    /// Creates an add-day suggestion.
    pub fn add_day(course: impl Into<String>, day: Weekday) -> Self {
        Self::AddDay {
            course: course.into(),
            day,
        }
    }

    /// Creates an add-slot suggestion.
    pub fn add_time_slot(day: Weekday, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self::AddTimeSlot { day, start, end }
    }

    /// Creates an enable-pair-courses suggestion.
    pub fn enable_pair_courses(course: impl Into<String>) -> Self {
        Self::EnablePairCourses {
            course: course.into(),
        }
    }

    /// Creates a reduce-selection suggestion.
    pub fn reduce_selection(course: impl Into<String>) -> Self {
        Self::ReduceSelection {
            course: course.into(),
        }
    }

    /// Short machine-readable label of the suggestion kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::WidenTimeWindow { .. } => "widen-time-window",
            Self::AddDay { .. } => "add-day",
            Self::AddTimeSlot { .. } => "add-time-slot",
            Self::EnablePairCourses { .. } => "enable-pair-courses",
            Self::RaiseMaxPerDay { .. } => "raise-max-per-day",
            Self::RaiseMaxGap { .. } => "raise-max-gap",
            Self::ReduceSelection { .. } => "reduce-selection",
            Self::AllowDuplicates => "allow-duplicates",
            Self::AllowOverlaps => "allow-overlaps",
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WidenTimeWindow {
                course,
                day,
                start,
                end,
            } => write!(
                f,
                "widen the time window to {start}-{end} so `{course}` fits on {day}"
            ),
            Self::AddDay { course, day } => {
                write!(f, "allow {day} to make `{course}` schedulable")
            }
            Self::AddTimeSlot { day, start, end } => {
                write!(f, "add a {start}-{end} slot on {day}")
            }
            Self::EnablePairCourses { course } => {
                write!(f, "re-enable pair courses; every slot of `{course}` needs a partner")
            }
            Self::RaiseMaxPerDay { to } => {
                write!(f, "raise the courses-per-day limit to {to}")
            }
            Self::RaiseMaxGap { to } => {
                write!(f, "raise the gap limit to {to} slots")
            }
            Self::ReduceSelection { course } => {
                write!(f, "drop `{course}` from the selection")
            }
            Self::AllowDuplicates => f.write_str("allow the same course twice on one day"),
            Self::AllowOverlaps => f.write_str("allow overlapping courses"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_affected_course_and_day() {
        let s = Suggestion::add_day("Salsa A", Weekday::Wednesday);
        assert_eq!(s.to_string(), "allow WE to make `Salsa A` schedulable");

        let w = Suggestion::widen_time_window(
            "Bachata B",
            Weekday::Monday,
            TimeOfDay::new(19, 30),
            TimeOfDay::new(20, 40),
        );
        assert!(w.to_string().contains("19:30-20:40"));
        assert!(w.to_string().contains("Bachata B"));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(Suggestion::RaiseMaxPerDay { to: 3 }.kind(), "raise-max-per-day");
        assert_eq!(Suggestion::AllowOverlaps.kind(), "allow-overlaps");
        assert_eq!(
            Suggestion::reduce_selection("Salsa A").kind(),
            "reduce-selection"
        );
    }
}
