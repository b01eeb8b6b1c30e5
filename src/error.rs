use thiserror::Error;

/// Errors surfaced by the scoring core.
///
/// Missing question rows are deliberately not an error: policies may be
/// declared against a superset of slots, and partial answer keys still
/// score (see the engine's required pass).
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Requested student identifier is not a column of the dataset
    #[error("unknown student: {0}")]
    UnknownStudent(String),

    /// Policy violated a construction-time invariant
    #[error("invalid scoring policy: {0}")]
    InvalidPolicy(String),

    /// Aggregate requested over zero students
    #[error("cannot aggregate over an empty cohort")]
    EmptyCohort,

    /// Subject name not declared in the policy set
    #[error("unknown subject: {0}")]
    UnknownSubject(String),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
