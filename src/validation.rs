//! Constraint set validation.
//!
//! Checks a user's constraint set against the catalog before the
//! search runs. Detects:
//! - Empty or duplicate course selections
//! - Selected courses missing from the catalog
//! - Multiplicities that cannot fit the catalog (more repetitions
//!   than the course has distinct days)
//! - Inverted time windows
//!
//! All problems are collected and reported together, not first-fail,
//! so a UI can highlight every offending field at once. Infeasibility
//! under a *valid* constraint set is not a validation concern; that is
//! the solver's normal empty result.

use std::collections::HashSet;

use crate::catalog::CourseCatalogIndex;
use crate::models::ConstraintSet;

/// Validation result.
pub type ConstraintCheck = Result<(), Vec<ConstraintError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintError {
    /// Error category.
    pub kind: ConstraintErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of constraint validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintErrorKind {
    /// The selection contains no courses.
    EmptySelection,
    /// The same course is selected twice.
    DuplicateSelection,
    /// A selected course does not exist in the catalog.
    UnknownCourse,
    /// A course has multiplicity zero.
    ZeroMultiplicity,
    /// A course's multiplicity exceeds its distinct-day occurrences.
    MultiplicityTooHigh,
    /// A time window ends at or before it starts.
    InvalidWindow,
}

impl ConstraintError {
    pub(crate) fn new(kind: ConstraintErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a constraint set against the catalog.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_constraints(
    catalog: &CourseCatalogIndex,
    set: &ConstraintSet,
) -> ConstraintCheck {
    let mut errors = Vec::new();

    if set.courses.is_empty() {
        errors.push(ConstraintError::new(
            ConstraintErrorKind::EmptySelection,
            "no courses selected",
        ));
    }

    let mut seen = HashSet::new();
    for course in &set.courses {
        if !seen.insert(course.as_str()) {
            errors.push(ConstraintError::new(
                ConstraintErrorKind::DuplicateSelection,
                format!("course `{course}` is selected twice; use multiplicity instead"),
            ));
            continue;
        }

        let group = match catalog.group(course) {
            Some(group) => group,
            None => {
                errors.push(ConstraintError::new(
                    ConstraintErrorKind::UnknownCourse,
                    format!("course `{course}` is not in the catalog"),
                ));
                continue;
            }
        };

        let multiplicity = set.multiplicity_of(course);
        if multiplicity == 0 {
            errors.push(ConstraintError::new(
                ConstraintErrorKind::ZeroMultiplicity,
                format!("course `{course}` has multiplicity 0"),
            ));
        } else {
            let distinct_days = group.distinct_days().len();
            if multiplicity > distinct_days {
                errors.push(ConstraintError::new(
                    ConstraintErrorKind::MultiplicityTooHigh,
                    format!(
                        "course `{course}` is requested {multiplicity} times per week \
                         but only runs on {distinct_days} distinct days"
                    ),
                ));
            }
        }
    }

    if let (Some(earliest), Some(latest)) = (set.earliest_hour, set.latest_hour) {
        if earliest >= latest {
            errors.push(ConstraintError::new(
                ConstraintErrorKind::InvalidWindow,
                format!("global window {earliest}-{latest} ends before it starts"),
            ));
        }
    }

    for (day, windows) in &set.day_windows {
        for window in windows {
            if window.start_hour >= window.end_hour {
                errors.push(ConstraintError::new(
                    ConstraintErrorKind::InvalidWindow,
                    format!(
                        "slot {}-{} on {day} ends before it starts",
                        window.start_hour, window.end_hour
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OccurrenceRecord, Weekday};

    fn sample_catalog() -> CourseCatalogIndex {
        CourseCatalogIndex::from_records(vec![
            OccurrenceRecord::new("s1", "Salsa A", "MO", "19:00").with_end("20:10"),
            OccurrenceRecord::new("s2", "Salsa A", "WE", "19:00").with_end("20:10"),
            OccurrenceRecord::new("b1", "Bachata B", "MO", "19:30").with_end("20:40"),
        ])
        .unwrap()
    }

    #[test]
    fn test_valid_constraints() {
        let set = ConstraintSet::new().select("Salsa A").select("Bachata B");
        assert!(validate_constraints(&sample_catalog(), &set).is_ok());
    }

    #[test]
    fn test_empty_selection() {
        let errors = validate_constraints(&sample_catalog(), &ConstraintSet::new()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ConstraintErrorKind::EmptySelection));
    }

    #[test]
    fn test_unknown_course() {
        let set = ConstraintSet::new().select("Zouk");
        let errors = validate_constraints(&sample_catalog(), &set).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ConstraintErrorKind::UnknownCourse && e.message.contains("Zouk")));
    }

    #[test]
    fn test_duplicate_selection() {
        let set = ConstraintSet::new().select("Salsa A").select("Salsa A");
        let errors = validate_constraints(&sample_catalog(), &set).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ConstraintErrorKind::DuplicateSelection));
    }

    #[test]
    fn test_multiplicity_exceeding_distinct_days() {
        // Bachata B only runs on Monday; twice a week cannot fit
        let set = ConstraintSet::new()
            .select("Bachata B")
            .with_multiplicity("Bachata B", 2);
        let errors = validate_constraints(&sample_catalog(), &set).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ConstraintErrorKind::MultiplicityTooHigh));
    }

    #[test]
    fn test_multiplicity_at_distinct_day_count_is_fine() {
        let set = ConstraintSet::new()
            .select("Salsa A")
            .with_multiplicity("Salsa A", 2);
        assert!(validate_constraints(&sample_catalog(), &set).is_ok());
    }

    #[test]
    fn test_zero_multiplicity() {
        let set = ConstraintSet::new()
            .select("Salsa A")
            .with_multiplicity("Salsa A", 0);
        let errors = validate_constraints(&sample_catalog(), &set).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ConstraintErrorKind::ZeroMultiplicity));
    }

    #[test]
    fn test_inverted_global_window() {
        let set = ConstraintSet::new().select("Salsa A").between_hours(21.0, 18.0);
        let errors = validate_constraints(&sample_catalog(), &set).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ConstraintErrorKind::InvalidWindow));
    }

    #[test]
    fn test_inverted_day_window() {
        let set = ConstraintSet::new()
            .select("Salsa A")
            .with_day_window(Weekday::Monday, 20.0, 19.0);
        let errors = validate_constraints(&sample_catalog(), &set).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ConstraintErrorKind::InvalidWindow));
    }

    #[test]
    fn test_multiple_errors_collected() {
        let set = ConstraintSet::new()
            .select("Zouk")
            .select("Bachata B")
            .with_multiplicity("Bachata B", 3)
            .between_hours(22.0, 6.0);
        let errors = validate_constraints(&sample_catalog(), &set).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
