//! The schedule constraint solver.
//!
//! Pipeline: candidate enumeration filters each selected course's
//! occurrences, the backtracking search assigns one occurrence per
//! requested unit, deduplication collapses structurally identical
//! plans, and the suggestion engine explains infeasible requests.
//!
//! The solver is a pure function of catalog and constraints: no I/O,
//! no shared mutable state, identical output for identical input. The
//! caller coalesces rapid constraint edits and cancels a superseded
//! run through the [`CancellationToken`].

mod candidates;
mod dedup;
mod search;
mod suggest;

pub use candidates::{
    eligible_occurrences, filter_breakdown, FilterBreakdown, FilterCause, RejectedOccurrence,
};
pub use dedup::dedup_schedules;
pub use search::{BacktrackingSearch, SearchOutcome, DEFAULT_RESULT_CAP};
pub use suggest::suggest_relaxations;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag.
///
/// The caller keeps one clone per in-flight request and cancels it
/// when a newer request supersedes the run. The search checks the
/// token between solution emissions, never mid-assignment, so a
/// cancelled run still returns every schedule found so far.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Visible to every clone of this token.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
