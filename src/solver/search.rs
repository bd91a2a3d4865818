//! Backtracking search over course units.
//!
//! A unit is one (course, multiplicity-slot) pair: a course requested
//! twice a week contributes two units sharing one candidate list. The
//! search assigns one occurrence per unit depth-first, validating each
//! placement against the partial assignment and backtracking on the
//! first violation.
//!
//! # Ordering
//!
//! Units are assigned fewest-candidates-first (the fail-first
//! principle), ties broken by selection order. Candidates are tried in
//! catalog order. Both orders are total and input-determined, so for
//! fixed inputs the search emits the same schedules in the same order
//! every time.
//!
//! # Bounds
//!
//! Worst case is the product of candidate counts. Catalogs are tens of
//! occurrences and selections are small, so plain backtracking with
//! incremental pruning is enough; a result cap bounds the emission
//! count, and a cancellation token is honored between emissions.
//!
//! # Reference
//! Haralick & Elliott (1980), "Increasing tree search efficiency for
//! constraint satisfaction problems"

use log::{debug, trace};

use crate::catalog::CourseCatalogIndex;
use crate::models::{ConstraintSet, CourseOccurrence, PlacedCourse, ScheduleAssignment};

use super::candidates::eligible_occurrences;
use super::CancellationToken;

/// Default cap on emitted schedules.
pub const DEFAULT_RESULT_CAP: usize = 200;

/// What a search run produced.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Feasible schedules in emission order.
    pub schedules: Vec<ScheduleAssignment>,
    /// More schedules may exist beyond the cap.
    pub cap_reached: bool,
    /// The run was cancelled; the list is whatever was found so far.
    pub cancelled: bool,
}

/// One (course, multiplicity-slot) assignment unit.
#[derive(Debug, Clone)]
struct Unit<'a> {
    course: &'a str,
    candidates: Vec<&'a CourseOccurrence>,
}

/// Depth-first enumeration of feasible weekly schedules.
#[derive(Debug)]
pub struct BacktrackingSearch<'a> {
    set: &'a ConstraintSet,
    units: Vec<Unit<'a>>,
    result_cap: usize,
}

impl<'a> BacktrackingSearch<'a> {
    /// Prepares a search: enumerates candidates per selected course and
    /// orders the units.
    ///
    /// A selected course missing from the catalog gets an empty
    /// candidate list here (and makes the search trivially infeasible);
    /// planner-level validation reports it as an error before this
    /// point.
    pub fn new(catalog: &'a CourseCatalogIndex, set: &'a ConstraintSet) -> Self {
        let mut units = Vec::with_capacity(set.courses.len());
        for course in &set.courses {
            let candidates = catalog
                .group(course)
                .map(|group| eligible_occurrences(group, set))
                .unwrap_or_default();
            for _slot in 0..set.multiplicity_of(course) {
                units.push(Unit {
                    course: course.as_str(),
                    candidates: candidates.clone(),
                });
            }
        }

        // Fail-first: fewest candidates assigned earliest. The sort is
        // stable, so ties keep selection order.
        units.sort_by_key(|unit| unit.candidates.len());
        trace!(
            "unit order: {:?}",
            units
                .iter()
                .map(|u| (u.course, u.candidates.len()))
                .collect::<Vec<_>>()
        );

        Self {
            set,
            units,
            result_cap: DEFAULT_RESULT_CAP,
        }
    }

    /// Overrides the emission cap (minimum 1).
    pub fn with_result_cap(mut self, cap: usize) -> Self {
        self.result_cap = cap.max(1);
        self
    }

    /// Unit assignment order, course name per unit. Exposed for
    /// diagnostics.
    pub fn unit_courses(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.course).collect()
    }

    /// Runs the search to exhaustion, the cap, or cancellation.
    pub fn run(&self, token: &CancellationToken) -> SearchOutcome {
        let unit_count = self.units.len();
        let mut outcome = SearchOutcome::default();

        if unit_count == 0 {
            return outcome;
        }
        if self.units.iter().any(|u| u.candidates.is_empty()) {
            debug!("search is infeasible: a unit has no candidates");
            return outcome;
        }

        debug!(
            "searching {} units, result cap {}",
            unit_count, self.result_cap
        );

        // cursor[depth] is the next candidate index to try at that
        // depth; placed holds the occurrence chosen per assigned unit.
        let mut cursor = vec![0usize; unit_count];
        let mut placed: Vec<&CourseOccurrence> = Vec::with_capacity(unit_count);
        let mut depth = 0usize;

        loop {
            if depth == unit_count {
                outcome.schedules.push(self.snapshot(&placed));
                if outcome.schedules.len() >= self.result_cap {
                    debug!("result cap {} reached", self.result_cap);
                    outcome.cap_reached = true;
                    break;
                }
                if token.is_cancelled() {
                    debug!("search cancelled after {} schedules", outcome.schedules.len());
                    outcome.cancelled = true;
                    break;
                }
                depth -= 1;
                let _ = placed.pop();
                continue;
            }

            let unit = &self.units[depth];
            let mut advanced = false;
            while cursor[depth] < unit.candidates.len() {
                let candidate = unit.candidates[cursor[depth]];
                cursor[depth] += 1;
                if self.admissible(candidate, &placed) {
                    placed.push(candidate);
                    depth += 1;
                    advanced = true;
                    break;
                }
            }
            if advanced {
                continue;
            }

            // Unit exhausted: reset its cursor and step back.
            cursor[depth] = 0;
            if depth == 0 {
                break;
            }
            depth -= 1;
            let _ = placed.pop();
        }

        debug!("search finished with {} schedules", outcome.schedules.len());
        outcome
    }

    /// Validates one candidate against the partial assignment.
    ///
    /// Only constraints this single placement could break are checked;
    /// everything already placed is known valid.
    fn admissible(&self, candidate: &CourseOccurrence, placed: &[&CourseOccurrence]) -> bool {
        let duration = self.set.course_duration_min;

        // An occurrence instance is usable once per assignment, even
        // across multiplicity slots of the same course.
        if placed.iter().any(|p| p.id == candidate.id) {
            return false;
        }

        if self.set.prevent_overlaps
            && placed.iter().any(|p| p.overlaps(candidate, duration))
        {
            return false;
        }

        if self.set.unique_course_per_day
            && placed
                .iter()
                .any(|p| p.course == candidate.course && p.day == candidate.day)
        {
            return false;
        }

        if let Some(max) = self.set.max_per_day {
            let on_day = placed.iter().filter(|p| p.day == candidate.day).count();
            if on_day + 1 > max {
                return false;
            }
        }

        if let Some(max_gap_min) = self.set.max_gap_minutes() {
            let mut intervals: Vec<(u16, u16)> = placed
                .iter()
                .filter(|p| p.day == candidate.day)
                .map(|p| p.interval(duration))
                .collect();
            intervals.push(candidate.interval(duration));
            intervals.sort_unstable();
            for pair in intervals.windows(2) {
                let gap = i32::from(pair[1].0) - i32::from(pair[0].1);
                if gap > 0 && gap as u32 > max_gap_min {
                    return false;
                }
            }
        }

        true
    }

    /// Snapshots the complete partial assignment into a value.
    fn snapshot(&self, placed: &[&CourseOccurrence]) -> ScheduleAssignment {
        ScheduleAssignment::new(
            placed
                .iter()
                .map(|occ| PlacedCourse::from_occurrence(occ, self.set.course_duration_min))
                .collect(),
        )
    }
}
