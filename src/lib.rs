//! Weekly course schedule solver.
//!
//! Given a catalog of recurring course occurrences (a course may run
//! several times a week at different day/time slots) and a set of hard
//! constraints, enumerates the distinct feasible weekly schedules, one
//! occurrence per requested course unit. When nothing fits, it
//! produces concrete relaxation suggestions instead of schedules.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `CourseOccurrence`, `ConstraintSet`,
//!   `ScheduleAssignment`, `Fingerprint`, `Suggestion`
//! - **`catalog`**: Insertion-ordered course index built at the input
//!   validation boundary
//! - **`validation`**: Constraint set checks (unknown courses,
//!   impossible multiplicities, inverted windows)
//! - **`solver`**: Candidate filtering, backtracking search,
//!   deduplication, and the suggestion engine
//! - **`planner`**: The facade the surrounding application calls
//!
//! # Architecture
//!
//! The crate is a pure library: no I/O, no persistence, no threads.
//! Catalog data arrives fully materialized, every result is a value
//! snapshot, and identical inputs always produce identical output in
//! identical order. Interactive concerns (debouncing edits, cancelling
//! superseded runs) belong to the caller, wired through
//! [`CancellationToken`].
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Haralick & Elliott (1980), "Increasing tree search efficiency
//!   for constraint satisfaction problems"

pub mod catalog;
pub mod error;
pub mod models;
pub mod planner;
pub mod solver;
pub mod validation;

pub use error::{CatalogError, PlanError};
pub use planner::SchedulePlanner;
pub use solver::{CancellationToken, SearchOutcome};
