//! Frequency sweep - the shared evaluation axis for all frequency-domain engines

use serde::{Deserialize, Serialize};

use crate::core::error::{AnalysisError, Result};

/// Evenly spaced values over `[min, max]`, inclusive of both ends.
///
/// A single-point request yields `[min]`, matching the convention of the
/// sweep type below.
pub fn linspace(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![min];
    }
    let step = (max - min) / (count - 1) as f64;
    (0..count).map(|i| min + step * i as f64).collect()
}

/// An ordered sequence of evaluation frequencies defined by (min, max, count)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencySweep {
    /// Lowest frequency (Hz or rad/s depending on the engine)
    pub min: f64,

    /// Highest frequency
    pub max: f64,

    /// Number of evaluation points, at least 1
    pub count: usize,
}

impl FrequencySweep {
    /// Create a sweep, rejecting empty or inverted ranges
    pub fn new(min: f64, max: f64, count: usize) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(AnalysisError::InvalidSweep {
                reason: "bounds must be finite".to_string(),
            });
        }
        if count < 1 {
            return Err(AnalysisError::InvalidSweep {
                reason: "count must be at least 1".to_string(),
            });
        }
        if min > max {
            return Err(AnalysisError::InvalidSweep {
                reason: format!("min {} exceeds max {}", min, max),
            });
        }
        Ok(Self { min, max, count })
    }

    /// The evaluation frequencies, in ascending order
    pub fn values(&self) -> Vec<f64> {
        linspace(self.min, self.max, self.count)
    }

    /// Number of evaluation points
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
