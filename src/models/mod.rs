//! Planning domain models.
//!
//! Core data types for weekly course planning: occurrences and their
//! clock arithmetic, the user's constraint set, finished schedule
//! assignments, and relaxation suggestions. Everything here is plain
//! data with serde derives; behavior lives in the catalog and solver
//! modules.

mod constraints;
mod occurrence;
mod schedule;
mod suggestion;

pub use constraints::{ConstraintSet, TimeWindow};
pub use occurrence::{CourseOccurrence, OccurrenceRecord, TimeOfDay, TimeParseError, Weekday};
pub use schedule::{satisfies, Fingerprint, PlacedCourse, ScheduleAssignment, ScheduleSummary};
pub use suggestion::Suggestion;
