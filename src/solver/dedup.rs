//! Schedule deduplication.
//!
//! The raw search can emit the same weekly plan more than once: two
//! multiplicity slots of one course are interchangeable, so swapping
//! their occurrences yields a structurally identical schedule. Dedup
//! keys on the fingerprint and keeps the first emission, preserving
//! the search's deterministic order.

use std::collections::HashSet;

use log::debug;

use crate::models::{Fingerprint, ScheduleAssignment};

/// Drops later duplicates, first-seen order preserved.
pub fn dedup_schedules(schedules: Vec<ScheduleAssignment>) -> Vec<ScheduleAssignment> {
    let before = schedules.len();
    let mut seen: HashSet<Fingerprint> = HashSet::with_capacity(before);
    let mut unique = Vec::with_capacity(before);

    for schedule in schedules {
        if seen.insert(schedule.fingerprint()) {
            unique.push(schedule);
        }
    }

    if unique.len() < before {
        debug!("dedup removed {} duplicate schedules", before - unique.len());
    }
    unique
}
