//! Core module - fundamental types shared by the analysis engines

pub mod error;
pub mod random;
pub mod rod;
pub mod stats;
pub mod sweep;

pub use error::{AnalysisError, Result};
pub use random::{seeded_rng, ParameterDistribution};
pub use rod::RodModel;
pub use stats::{elapsed_seconds, per_frequency_stats, EnsembleStats};
pub use sweep::{linspace, FrequencySweep};
