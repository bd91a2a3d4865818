//! Relaxation suggestions for infeasible requests.
//!
//! Invoked when the search finds nothing. The engine replays candidate
//! enumeration per selected course and classifies why the request
//! failed:
//!
//! 1. A course with fewer usable occurrences than its multiplicity is
//!    starved by per-occurrence filters; its rejects are turned into
//!    add-day / widen-window / add-slot / enable-pair suggestions,
//!    ordered by how many occurrences each relaxation would admit.
//! 2. Otherwise the per-day cap is raised by up to three and the
//!    search re-run; the minimal raise that admits a combination is
//!    suggested.
//! 3. Otherwise the same probe runs for the gap limit.
//! 4. Otherwise the fallbacks: shrink the selection (naming the
//!    tightest course), allow same-day repeats, allow overlaps.
//!
//! Every suggestion names the concrete course, day, or limit value it
//! is about; generic advice is useless in a picker UI.

use std::collections::HashSet;

use log::debug;

use crate::catalog::CourseCatalogIndex;
use crate::models::{ConstraintSet, Suggestion};

use super::candidates::{filter_breakdown, FilterCause};
use super::search::BacktrackingSearch;
use super::CancellationToken;

/// How far the cap/gap probes raise a limit before giving up.
const MAX_RELAXATION_STEPS: u32 = 3;

/// Produces relaxation suggestions for a constraint set that yields no
/// schedules. Returns an empty list when the set is actually feasible.
pub fn suggest_relaxations(catalog: &CourseCatalogIndex, set: &ConstraintSet) -> Vec<Suggestion> {
    if is_feasible(catalog, set) {
        return Vec::new();
    }

    let starved = starved_course_suggestions(catalog, set);
    if !starved.is_empty() {
        return starved;
    }

    if let Some(current) = set.max_per_day {
        for step in 1..=MAX_RELAXATION_STEPS {
            let raised = current + step as usize;
            let mut relaxed = set.clone();
            relaxed.max_per_day = Some(raised);
            if is_feasible(catalog, &relaxed) {
                debug!("per-day cap {} admits a combination", raised);
                return vec![Suggestion::RaiseMaxPerDay { to: raised }];
            }
        }
    }

    if let Some(current) = set.max_gap_slots {
        for step in 1..=MAX_RELAXATION_STEPS {
            let raised = current + step;
            let mut relaxed = set.clone();
            relaxed.max_gap_slots = Some(raised);
            if is_feasible(catalog, &relaxed) {
                debug!("gap limit {} admits a combination", raised);
                return vec![Suggestion::RaiseMaxGap { to: raised }];
            }
        }
    }

    fallback_suggestions(catalog, set)
}

/// Whether the set admits at least one schedule. One emission is
/// enough, so the probe search caps at a single result.
fn is_feasible(catalog: &CourseCatalogIndex, set: &ConstraintSet) -> bool {
    !BacktrackingSearch::new(catalog, set)
        .with_result_cap(1)
        .run(&CancellationToken::new())
        .schedules
        .is_empty()
}

/// Suggestions for courses whose candidate lists are too small to meet
/// their multiplicity, ordered by how many rejects each relaxation
/// would recover.
fn starved_course_suggestions(
    catalog: &CourseCatalogIndex,
    set: &ConstraintSet,
) -> Vec<Suggestion> {
    let mut weighted: Vec<(Suggestion, usize)> = Vec::new();
    let push = |weighted: &mut Vec<(Suggestion, usize)>, suggestion: Suggestion, impact| {
        match weighted.iter_mut().find(|(s, _)| *s == suggestion) {
            Some((_, total)) => *total += impact,
            None => weighted.push((suggestion, impact)),
        }
    };

    let mut seen = HashSet::new();
    for course in &set.courses {
        if !seen.insert(course.as_str()) {
            continue;
        }
        let group = match catalog.group(course) {
            Some(group) => group,
            None => continue,
        };

        let breakdown = filter_breakdown(group, set);
        if breakdown.eligible.len() >= set.multiplicity_of(course) {
            continue;
        }

        // Day relaxations, one per affected day.
        for reject in &breakdown.rejected {
            if reject.cause == FilterCause::DayBlocked {
                push(
                    &mut weighted,
                    Suggestion::add_day(course, reject.occurrence.day),
                    1,
                );
            }
        }

        // Window relaxations: name the occurrence needing the smallest
        // widening, weighted by everything the same edge cuts off.
        let closest_early = breakdown
            .rejected
            .iter()
            .filter(|r| r.cause == FilterCause::BeforeWindow)
            .max_by_key(|r| r.occurrence.start);
        if let Some(reject) = closest_early {
            push(
                &mut weighted,
                Suggestion::widen_time_window(
                    course,
                    reject.occurrence.day,
                    reject.occurrence.start,
                    reject.occurrence.end_or_assumed(set.course_duration_min),
                ),
                breakdown.count_of(FilterCause::BeforeWindow),
            );
        }
        let closest_late = breakdown
            .rejected
            .iter()
            .filter(|r| r.cause == FilterCause::AfterWindow)
            .min_by_key(|r| r.occurrence.end_or_assumed(set.course_duration_min));
        if let Some(reject) = closest_late {
            push(
                &mut weighted,
                Suggestion::widen_time_window(
                    course,
                    reject.occurrence.day,
                    reject.occurrence.start,
                    reject.occurrence.end_or_assumed(set.course_duration_min),
                ),
                breakdown.count_of(FilterCause::AfterWindow),
            );
        }

        for reject in &breakdown.rejected {
            if reject.cause == FilterCause::OutsideDayWindows {
                push(
                    &mut weighted,
                    Suggestion::add_time_slot(
                        reject.occurrence.day,
                        reject.occurrence.start,
                        reject.occurrence.end_or_assumed(set.course_duration_min),
                    ),
                    1,
                );
            }
        }

        let pair_hits = breakdown.count_of(FilterCause::PairExcluded);
        if pair_hits > 0 {
            push(
                &mut weighted,
                Suggestion::enable_pair_courses(course),
                pair_hits,
            );
        }
    }

    // Highest impact first; the sort is stable so equal-impact
    // suggestions keep discovery order.
    weighted.sort_by(|a, b| b.1.cmp(&a.1));
    weighted.into_iter().map(|(s, _)| s).collect()
}

/// Last-resort suggestions when no single limit explains the failure.
fn fallback_suggestions(catalog: &CourseCatalogIndex, set: &ConstraintSet) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    // Name the course with the fewest usable occurrences; dropping it
    // frees the most contested slots.
    let tightest = set
        .courses
        .iter()
        .filter_map(|course| {
            catalog
                .group(course)
                .map(|group| (course, filter_breakdown(group, set).eligible.len()))
        })
        .min_by_key(|&(_, eligible)| eligible)
        .map(|(course, _)| course.clone());
    if let Some(course) = tightest {
        suggestions.push(Suggestion::reduce_selection(course));
    }

    if set.unique_course_per_day {
        suggestions.push(Suggestion::AllowDuplicates);
    }
    if set.prevent_overlaps {
        suggestions.push(Suggestion::AllowOverlaps);
    }

    suggestions
}
