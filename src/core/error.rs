//! Error taxonomy for the analysis engines
//!
//! Only input validation is an error here. A singular system solve during a
//! sweep is handled inside the rod model by reporting a zero magnitude for
//! the affected sample, so one ill-conditioned draw never aborts a run.

use thiserror::Error;

/// Validation failures surfaced to the caller before any computation runs
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Frequency sweep parameters out of range
    #[error("invalid frequency sweep: {reason}")]
    InvalidSweep { reason: String },

    /// A physical parameter outside its valid domain
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// More factors than the L9 orthogonal array has columns
    #[error("{count} factors supplied, but the L9 orthogonal array supports at most 4")]
    TooManyFactors { count: usize },

    /// A design with no factors has no experiments
    #[error("at least one factor is required")]
    NoFactors,

    /// Every factor must carry exactly three candidate levels
    #[error("factor `{name}` has {count} levels, expected exactly 3")]
    WrongLevelCount { name: String, count: usize },

    /// A factor's level list contains something other than a finite number
    #[error("factor `{name}` has a non-numeric level")]
    NonNumericLevel { name: String },

    /// PCA needs at least two observations to form a covariance
    #[error("data matrix must have at least 2 observations, got {count}")]
    TooFewObservations { count: usize },

    /// PCA rows must all have the same, non-zero length
    #[error("data matrix rows must all have the same non-zero length")]
    MalformedMatrix,

    /// PCA input contains NaN or infinite entries
    #[error("data matrix contains a non-finite entry at row {row}, column {col}")]
    NonFiniteEntry { row: usize, col: usize },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    /// Shorthand for a parameter validation failure
    pub fn parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
