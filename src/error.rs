//! Error taxonomy for the planner.
//!
//! Only malformed input is an error. An infeasible constraint set is a
//! normal outcome: `generate_schedules` returns an empty result and the
//! caller may ask for relaxation suggestions instead.

use thiserror::Error;

use crate::validation::ConstraintError;

/// A defect in the course catalog. Fatal: the planner cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// An occurrence record has an empty `id`.
    #[error("occurrence record is missing an id")]
    MissingId,

    /// An occurrence record has an empty course name.
    #[error("occurrence `{id}` has an empty course name")]
    MissingCourseName { id: String },

    /// Two occurrence records share the same `id`.
    #[error("duplicate occurrence id `{id}`")]
    DuplicateId { id: String },

    /// A day code is not one of the seven recognized values.
    #[error("occurrence `{id}` has an unknown day code `{code}`")]
    UnknownDayCode { id: String, code: String },

    /// A time string could not be parsed as `HH:MM`.
    #[error("occurrence `{id}` has an unparseable time `{value}`")]
    InvalidTime { id: String, value: String },

    /// An explicit end time is not after the start time.
    #[error("occurrence `{id}` ends at or before its start")]
    EndBeforeStart { id: String },
}

/// Top-level planner error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The catalog is malformed and no planner could be built from it.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(#[from] CatalogError),

    /// The constraint set failed validation. Carries every detected
    /// problem, not just the first.
    #[error("invalid constraints ({} problems)", .0.len())]
    InvalidConstraint(Vec<ConstraintError>),
}
