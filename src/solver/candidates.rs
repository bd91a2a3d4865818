//! Candidate enumeration.
//!
//! Filters a course group down to the occurrences the search may use,
//! applying the per-occurrence constraints in a fixed order: day
//! eligibility, clock window (a per-day slot list replaces the global
//! window for its day), pair-course exclusion. An empty result is a
//! normal outcome meaning "this course cannot be scheduled as
//! constrained", not an error.
//!
//! [`filter_breakdown`] runs the same classification but keeps the
//! rejects and their causes; the suggestion engine turns that into
//! concrete relaxation advice.

use crate::catalog::CourseGroup;
use crate::models::{ConstraintSet, CourseOccurrence};

/// Why an occurrence was filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCause {
    /// Occurrence's day is blocked or outside the allowed set.
    DayBlocked,
    /// Occurrence starts before the global earliest hour.
    BeforeWindow,
    /// Occurrence ends after the global latest hour.
    AfterWindow,
    /// Occurrence fits none of the day's slot overrides.
    OutsideDayWindows,
    /// Occurrence requires a partner and pair courses are excluded.
    PairExcluded,
}

/// One filtered-out occurrence with its cause.
#[derive(Debug, Clone)]
pub struct RejectedOccurrence<'a> {
    /// The occurrence that was dropped.
    pub occurrence: &'a CourseOccurrence,
    /// The first filter that dropped it.
    pub cause: FilterCause,
}

/// Filtering outcome for one course under one constraint set.
#[derive(Debug, Clone)]
pub struct FilterBreakdown<'a> {
    /// Course display name.
    pub course: &'a str,
    /// Occurrences that survived every filter.
    pub eligible: Vec<&'a CourseOccurrence>,
    /// Occurrences that were dropped, catalog order.
    pub rejected: Vec<RejectedOccurrence<'a>>,
}

impl FilterBreakdown<'_> {
    /// Number of rejects with the given cause.
    pub fn count_of(&self, cause: FilterCause) -> usize {
        self.rejected.iter().filter(|r| r.cause == cause).count()
    }
}

/// Classifies one occurrence against the constraint set.
///
/// Returns `None` when the occurrence is usable, otherwise the first
/// filter that eliminates it. Filter order matters for suggestion
/// quality: a Sunday course outside the time window is reported as a
/// day problem, not a window problem.
fn classify(occurrence: &CourseOccurrence, set: &ConstraintSet) -> Option<FilterCause> {
    if !set.day_allowed(occurrence.day) {
        return Some(FilterCause::DayBlocked);
    }

    let (start_min, end_min) = occurrence.interval(set.course_duration_min);
    match set.day_windows.get(&occurrence.day) {
        Some(slots) if !slots.is_empty() => {
            if !slots.iter().any(|w| w.contains_range(start_min, end_min)) {
                return Some(FilterCause::OutsideDayWindows);
            }
        }
        _ => {
            if let Some(earliest) = set.earliest_hour {
                if occurrence.start.fractional_hours() < earliest {
                    return Some(FilterCause::BeforeWindow);
                }
            }
            if let Some(latest) = set.latest_hour {
                if f64::from(end_min) / 60.0 > latest {
                    return Some(FilterCause::AfterWindow);
                }
            }
        }
    }

    if set.exclude_pair_courses && occurrence.pair_only {
        return Some(FilterCause::PairExcluded);
    }

    None
}

/// Occurrences of a group that survive all per-occurrence filters,
/// catalog order preserved.
pub fn eligible_occurrences<'a>(
    group: &'a CourseGroup,
    set: &ConstraintSet,
) -> Vec<&'a CourseOccurrence> {
    group
        .occurrences()
        .iter()
        .filter(|occ| classify(occ, set).is_none())
        .collect()
}

/// Full filtering outcome for a group, rejects included.
pub fn filter_breakdown<'a>(group: &'a CourseGroup, set: &ConstraintSet) -> FilterBreakdown<'a> {
    let mut eligible = Vec::new();
    let mut rejected = Vec::new();

    for occurrence in group.occurrences() {
        match classify(occurrence, set) {
            None => eligible.push(occurrence),
            Some(cause) => rejected.push(RejectedOccurrence { occurrence, cause }),
        }
    }

    FilterBreakdown {
        course: group.name(),
        eligible,
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CourseCatalogIndex;
    use crate::models::{OccurrenceRecord, Weekday};

    fn catalog() -> CourseCatalogIndex {
        CourseCatalogIndex::from_records(vec![
            OccurrenceRecord::new("s1", "Salsa A", "MO", "19:00").with_end("20:10"),
            OccurrenceRecord::new("s2", "Salsa A", "WE", "17:00").with_end("18:10"),
            OccurrenceRecord::new("s3", "Salsa A", "SU", "11:00").with_end("12:10"),
            OccurrenceRecord::new("s4", "Salsa A", "FR", "21:00")
                .with_end("22:10")
                .with_pair_only(true),
        ])
        .unwrap()
    }

    fn salsa(catalog: &CourseCatalogIndex) -> &crate::catalog::CourseGroup {
        catalog.group("Salsa A").unwrap()
    }

    #[test]
    fn test_no_constraints_keeps_catalog_order() {
        let catalog = catalog();
        let eligible = eligible_occurrences(salsa(&catalog), &ConstraintSet::new());
        let ids: Vec<&str> = eligible.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2", "s3", "s4"]);
    }

    #[test]
    fn test_blocked_day_filters() {
        let catalog = catalog();
        let set = ConstraintSet::new().block_day(Weekday::Sunday);
        let eligible = eligible_occurrences(salsa(&catalog), &set);
        assert!(eligible.iter().all(|o| o.day != Weekday::Sunday));
    }

    #[test]
    fn test_global_window_filters_both_ends() {
        let catalog = catalog();
        let set = ConstraintSet::new().between_hours(18.0, 21.0);
        let eligible = eligible_occurrences(salsa(&catalog), &set);
        let ids: Vec<&str> = eligible.iter().map(|o| o.id.as_str()).collect();
        // s2 starts 17:00 (early), s3 starts 11:00 (early), s4 ends 22:10 (late)
        assert_eq!(ids, vec!["s1"]);
    }

    #[test]
    fn test_day_window_overrides_global() {
        let catalog = catalog();
        // Global window would reject s3 (Sunday morning); the Sunday
        // slot list admits it and is authoritative for that day.
        let set = ConstraintSet::new()
            .between_hours(18.0, 21.0)
            .with_day_window(Weekday::Sunday, 10.0, 13.0);
        let eligible = eligible_occurrences(salsa(&catalog), &set);
        let ids: Vec<&str> = eligible.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s3"]);
    }

    #[test]
    fn test_pair_exclusion() {
        let catalog = catalog();
        let set = ConstraintSet::new().without_pair_courses();
        let eligible = eligible_occurrences(salsa(&catalog), &set);
        assert!(eligible.iter().all(|o| !o.pair_only));
    }

    #[test]
    fn test_missing_end_uses_assumed_duration() {
        let catalog = CourseCatalogIndex::from_records(vec![OccurrenceRecord::new(
            "x1", "Open End", "MO", "20:30",
        )])
        .unwrap();
        // 20:30 + 60min assumed = 21:30, past the 21:00 limit
        let set = ConstraintSet::new().between_hours(18.0, 21.0);
        assert!(eligible_occurrences(catalog.group("Open End").unwrap(), &set).is_empty());

        let shorter = set.with_course_duration_min(30);
        assert_eq!(
            eligible_occurrences(catalog.group("Open End").unwrap(), &shorter).len(),
            1
        );
    }

    #[test]
    fn test_breakdown_reports_first_cause() {
        let catalog = catalog();
        let set = ConstraintSet::new()
            .block_day(Weekday::Sunday)
            .between_hours(18.0, 21.0)
            .without_pair_courses();
        let breakdown = filter_breakdown(salsa(&catalog), &set);

        assert_eq!(breakdown.eligible.len(), 1);
        assert_eq!(breakdown.rejected.len(), 3);
        assert_eq!(breakdown.count_of(FilterCause::DayBlocked), 1); // s3
        assert_eq!(breakdown.count_of(FilterCause::BeforeWindow), 1); // s2
        // s4 is rejected by the window before the pair filter is reached
        assert_eq!(breakdown.count_of(FilterCause::AfterWindow), 1);
        assert_eq!(breakdown.count_of(FilterCause::PairExcluded), 0);
    }

    #[test]
    fn test_empty_result_is_normal() {
        let catalog = catalog();
        let set = ConstraintSet::new()
            .allow_day(Weekday::Tuesday) // Salsa never runs on Tuesday
            .select("Salsa A");
        let breakdown = filter_breakdown(salsa(&catalog), &set);
        assert!(breakdown.eligible.is_empty());
        assert_eq!(breakdown.count_of(FilterCause::DayBlocked), 4);
    }
}
