//! The planning facade.
//!
//! [`SchedulePlanner`] owns the catalog index for one planning session
//! and exposes the solver to the surrounding application: build it
//! once from catalog data, then call [`generate_schedules`] as often
//! as the user edits constraints. Every call is a pure function of
//! catalog and constraints; nothing is retried or cached.
//!
//! The caller owns interactivity concerns: debounce rapid constraint
//! edits, keep at most one run in flight, and cancel a superseded run
//! through its [`CancellationToken`].
//!
//! [`generate_schedules`]: SchedulePlanner::generate_schedules

use log::debug;

use crate::catalog::{CourseCatalogIndex, CourseGroup};
use crate::error::PlanError;
use crate::models::{ConstraintSet, CourseOccurrence, OccurrenceRecord, Suggestion};
use crate::solver::{
    dedup_schedules, suggest_relaxations, BacktrackingSearch, CancellationToken, SearchOutcome,
    DEFAULT_RESULT_CAP,
};
use crate::validation::validate_constraints;

/// Weekly schedule planner over one course catalog.
///
/// # Example
///
/// ```
/// use weekplan::models::{ConstraintSet, OccurrenceRecord};
/// use weekplan::SchedulePlanner;
///
/// let planner = SchedulePlanner::from_records(vec![
///     OccurrenceRecord::new("s1", "Salsa A", "MO", "19:00").with_end("20:10"),
///     OccurrenceRecord::new("s2", "Salsa A", "WE", "19:00").with_end("20:10"),
///     OccurrenceRecord::new("b1", "Bachata B", "MO", "19:30").with_end("20:40"),
/// ])
/// .unwrap();
///
/// let constraints = ConstraintSet::new().select("Salsa A").select("Bachata B");
/// let outcome = planner.generate_schedules(&constraints).unwrap();
/// assert_eq!(outcome.schedules.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SchedulePlanner {
    catalog: CourseCatalogIndex,
    result_cap: usize,
}

impl SchedulePlanner {
    /// Builds a planner from typed occurrences.
    pub fn new(occurrences: Vec<CourseOccurrence>) -> Result<Self, PlanError> {
        let catalog = CourseCatalogIndex::new(occurrences)?;
        Ok(Self {
            catalog,
            result_cap: DEFAULT_RESULT_CAP,
        })
    }

    /// Builds a planner from raw catalog records, parsing day codes
    /// and `HH:MM` times.
    pub fn from_records(records: Vec<OccurrenceRecord>) -> Result<Self, PlanError> {
        let catalog = CourseCatalogIndex::from_records(records)?;
        Ok(Self {
            catalog,
            result_cap: DEFAULT_RESULT_CAP,
        })
    }

    /// Overrides the schedule emission cap (minimum 1).
    pub fn with_result_cap(mut self, cap: usize) -> Self {
        self.result_cap = cap.max(1);
        self
    }

    /// The underlying catalog index.
    pub fn catalog(&self) -> &CourseCatalogIndex {
        &self.catalog
    }

    /// Course groups, catalog order.
    pub fn course_groups(&self) -> &[CourseGroup] {
        self.catalog.groups()
    }

    /// Course names, catalog order.
    pub fn course_names(&self) -> Vec<&str> {
        self.catalog.course_names()
    }

    /// Looks up one course group by name.
    pub fn course_group(&self, name: &str) -> Option<&CourseGroup> {
        self.catalog.group(name)
    }

    /// Enumerates feasible weekly schedules for a constraint set.
    ///
    /// Returns an outcome with an empty schedule list when the request
    /// is infeasible; that is a normal result, and
    /// [`suggest_relaxations`](Self::suggest_relaxations) explains it.
    /// Fails only when the constraint set itself is invalid.
    pub fn generate_schedules(&self, set: &ConstraintSet) -> Result<SearchOutcome, PlanError> {
        self.generate_schedules_with_cancel(set, &CancellationToken::new())
    }

    /// Like [`generate_schedules`](Self::generate_schedules), honoring
    /// a caller-owned cancellation token between solution emissions.
    pub fn generate_schedules_with_cancel(
        &self,
        set: &ConstraintSet,
        token: &CancellationToken,
    ) -> Result<SearchOutcome, PlanError> {
        validate_constraints(&self.catalog, set).map_err(PlanError::InvalidConstraint)?;

        let mut outcome = BacktrackingSearch::new(&self.catalog, set)
            .with_result_cap(self.result_cap)
            .run(token);
        outcome.schedules = dedup_schedules(outcome.schedules);

        debug!(
            "{} distinct schedules for {} selected courses",
            outcome.schedules.len(),
            set.courses.len()
        );
        Ok(outcome)
    }

    /// Explains an infeasible request with concrete relaxations.
    ///
    /// Returns an empty list when the set is feasible as-is.
    pub fn suggest_relaxations(&self, set: &ConstraintSet) -> Result<Vec<Suggestion>, PlanError> {
        validate_constraints(&self.catalog, set).map_err(PlanError::InvalidConstraint)?;
        Ok(suggest_relaxations(&self.catalog, set))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{satisfies, Weekday};
    use crate::validation::ConstraintErrorKind;

    fn dance_planner() -> SchedulePlanner {
        SchedulePlanner::from_records(vec![
            OccurrenceRecord::new("sa-mo", "Salsa A", "MO", "19:00").with_end("20:10"),
            OccurrenceRecord::new("sa-we", "Salsa A", "WE", "19:00").with_end("20:10"),
            OccurrenceRecord::new("bb-mo", "Bachata B", "MO", "19:30").with_end("20:40"),
            OccurrenceRecord::new("ki-fr", "Kizomba", "FR", "18:00")
                .with_end("19:00")
                .with_pair_only(true),
        ])
        .unwrap()
    }

    #[test]
    fn test_catalog_accessors() {
        let planner = dance_planner();
        assert_eq!(
            planner.course_names(),
            vec!["Salsa A", "Bachata B", "Kizomba"]
        );
        assert_eq!(planner.course_groups().len(), 3);
        assert_eq!(planner.course_group("Salsa A").unwrap().len(), 2);
        assert!(planner.course_group("Zouk").is_none());
        assert_eq!(planner.catalog().occurrence_count(), 4);
    }

    #[test]
    fn test_invalid_catalog_fails_construction() {
        let result = SchedulePlanner::from_records(vec![OccurrenceRecord::new(
            "x", "Salsa A", "MO", "19:61",
        )]);
        assert!(matches!(result, Err(PlanError::InvalidCatalog(_))));
    }

    #[test]
    fn test_overlapping_pair_leaves_single_schedule() {
        let planner = dance_planner();
        let set = ConstraintSet::new().select("Salsa A").select("Bachata B");
        let outcome = planner.generate_schedules(&set).unwrap();

        assert_eq!(outcome.schedules.len(), 1);
        let only = &outcome.schedules[0];
        assert_eq!(only.find_course("Salsa A")[0].day, Weekday::Wednesday);
        assert_eq!(only.find_course("Bachata B")[0].day, Weekday::Monday);
    }

    #[test]
    fn test_generated_schedules_satisfy_constraints() {
        let planner = dance_planner();
        let set = ConstraintSet::new()
            .select("Salsa A")
            .select("Bachata B")
            .with_max_per_day(2)
            .with_max_gap_slots(3);
        let outcome = planner.generate_schedules(&set).unwrap();
        assert!(!outcome.schedules.is_empty());
        for schedule in &outcome.schedules {
            assert!(satisfies(schedule, &set));
        }
    }

    #[test]
    fn test_multiplicity_is_deduplicated() {
        let planner = dance_planner();
        let set = ConstraintSet::new()
            .select("Salsa A")
            .with_multiplicity("Salsa A", 2);
        let outcome = planner.generate_schedules(&set).unwrap();

        // Both unit permutations collapse into one plan on MO and WE.
        assert_eq!(outcome.schedules.len(), 1);
        let placements = outcome.schedules[0].find_course("Salsa A");
        assert_eq!(placements.len(), 2);
        assert_eq!(outcome.schedules[0].days_used().len(), 2);
    }

    #[test]
    fn test_no_two_results_share_a_fingerprint() {
        let planner = dance_planner();
        let set = ConstraintSet::new()
            .select("Salsa A")
            .select("Bachata B")
            .with_prevent_overlaps(false);
        let outcome = planner.generate_schedules(&set).unwrap();

        let mut fingerprints: Vec<_> = outcome
            .schedules
            .iter()
            .map(|s| s.fingerprint())
            .collect();
        fingerprints.sort();
        let len_before = fingerprints.len();
        fingerprints.dedup();
        assert_eq!(fingerprints.len(), len_before);
    }

    #[test]
    fn test_determinism_across_calls() {
        let planner = dance_planner();
        let set = ConstraintSet::new()
            .select("Salsa A")
            .select("Bachata B")
            .with_prevent_overlaps(false);
        let first = planner.generate_schedules(&set).unwrap();
        let second = planner.generate_schedules(&set).unwrap();
        assert_eq!(first.schedules, second.schedules);
    }

    #[test]
    fn test_relaxing_a_constraint_never_shrinks_the_result() {
        let planner = dance_planner();
        let strict = ConstraintSet::new()
            .select("Salsa A")
            .select("Bachata B")
            .with_max_per_day(1);
        let relaxed = ConstraintSet::new()
            .select("Salsa A")
            .select("Bachata B")
            .with_max_per_day(2);

        let strict_count = planner.generate_schedules(&strict).unwrap().schedules.len();
        let relaxed_count = planner
            .generate_schedules(&relaxed)
            .unwrap()
            .schedules
            .len();
        assert!(relaxed_count >= strict_count);
    }

    #[test]
    fn test_invalid_constraints_reported_not_searched() {
        let planner = dance_planner();
        let set = ConstraintSet::new().select("Zouk");
        match planner.generate_schedules(&set) {
            Err(PlanError::InvalidConstraint(errors)) => {
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ConstraintErrorKind::UnknownCourse));
            }
            other => panic!("expected InvalidConstraint, got {other:?}"),
        }
    }

    #[test]
    fn test_infeasible_request_gets_suggestions() {
        let planner = dance_planner();
        // Kizomba only exists pair-only; excluding pairs starves it.
        let set = ConstraintSet::new().select("Kizomba").without_pair_courses();

        let outcome = planner.generate_schedules(&set).unwrap();
        assert!(outcome.schedules.is_empty());

        let suggestions = planner.suggest_relaxations(&set).unwrap();
        assert!(!suggestions.is_empty());
        assert!(suggestions.iter().any(|s| matches!(
            s,
            Suggestion::EnablePairCourses { course } if course == "Kizomba"
        )));
    }

    #[test]
    fn test_result_cap_is_reported() {
        let planner = dance_planner().with_result_cap(1);
        let set = ConstraintSet::new().select("Salsa A");
        let outcome = planner.generate_schedules(&set).unwrap();
        assert_eq!(outcome.schedules.len(), 1);
        assert!(outcome.cap_reached);
    }

    #[test]
    fn test_cancelled_run_returns_partial_result() {
        let planner = dance_planner();
        let set = ConstraintSet::new().select("Salsa A");
        let token = CancellationToken::new();
        token.cancel();
        let outcome = planner
            .generate_schedules_with_cancel(&set, &token)
            .unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.schedules.len(), 1);
    }
}
