//! Taguchi orthogonal-array designer
//!
//! Maps up to four three-level factors onto the canonical L9 array, realizes
//! the nine concrete experiments, and groups experiment indices per factor
//! and level for downstream signal-to-noise analysis.
//!
//! L9 = OA(9, 4, 3, 2): for any two columns, every ordered pair of levels
//! appears in the rows exactly once, and the property survives taking any
//! column subset.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::core::error::{AnalysisError, Result};

/// Rows of the canonical L9 array
pub const L9_RUNS: usize = 9;

/// Columns of the canonical L9 array
pub const L9_MAX_FACTORS: usize = 4;

/// Levels per factor
pub const LEVELS_PER_FACTOR: usize = 3;

/// The canonical L9 orthogonal array
pub const L9: [[usize; L9_MAX_FACTORS]; L9_RUNS] = [
    [0, 0, 0, 0],
    [0, 1, 1, 1],
    [0, 2, 2, 2],
    [1, 0, 1, 2],
    [1, 1, 2, 0],
    [1, 2, 0, 1],
    [2, 0, 2, 1],
    [2, 1, 0, 2],
    [2, 2, 1, 0],
];

/// A named factor with its three candidate levels
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    pub name: String,
    pub levels: Vec<f64>,
}

/// Taguchi design request: factor name -> three candidate levels.
///
/// Factor order in the JSON object decides which orthogonal-array column
/// serves which factor, so it is preserved end to end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaguchiRequest {
    pub factors: Map<String, Value>,
}

impl Default for TaguchiRequest {
    fn default() -> Self {
        // Steel rod material study from the book
        let mut factors = Map::new();
        factors.insert("E_modulus".to_string(), json!([2.0e11, 2.1e11, 2.2e11]));
        factors.insert("damping".to_string(), json!([0.02, 0.04, 0.06]));
        factors.insert("density".to_string(), json!([7700.0, 7850.0, 8000.0]));
        Self { factors }
    }
}

impl TaguchiRequest {
    /// Validate the factor mapping into typed factors.
    ///
    /// More factors than the array has columns is a hard error, never a
    /// silent truncation.
    pub fn parse_factors(&self) -> Result<Vec<Factor>> {
        if self.factors.is_empty() {
            return Err(AnalysisError::NoFactors);
        }
        if self.factors.len() > L9_MAX_FACTORS {
            return Err(AnalysisError::TooManyFactors {
                count: self.factors.len(),
            });
        }

        let mut factors = Vec::with_capacity(self.factors.len());
        for (name, levels_value) in &self.factors {
            let entries = levels_value.as_array().ok_or_else(|| {
                AnalysisError::parameter(
                    "factors",
                    format!("levels for `{}` must be an array of 3 numbers", name),
                )
            })?;
            if entries.len() != LEVELS_PER_FACTOR {
                return Err(AnalysisError::WrongLevelCount {
                    name: name.clone(),
                    count: entries.len(),
                });
            }
            let mut levels = Vec::with_capacity(LEVELS_PER_FACTOR);
            for entry in entries {
                let level = entry
                    .as_f64()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| AnalysisError::NonNumericLevel { name: name.clone() })?;
                levels.push(level);
            }
            factors.push(Factor {
                name: name.clone(),
                levels,
            });
        }
        Ok(factors)
    }
}

/// The realized design
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaguchiResponse {
    /// The L9 column subset actually used, rows = experiments
    pub orthogonal_array: Vec<Vec<usize>>,

    /// One factor -> value mapping per array row
    pub experiments: Vec<Map<String, Value>>,

    pub factor_names: Vec<String>,

    /// Factor name -> its level list, as supplied
    pub factor_levels: Map<String, Value>,

    pub num_experiments: usize,

    /// Per factor, per level: the experiment indices where that level occurs
    pub sn_analysis: Map<String, Value>,
}

/// Build the design
pub fn run(request: &TaguchiRequest) -> Result<TaguchiResponse> {
    let factors = request.parse_factors()?;
    let num_factors = factors.len();

    let orthogonal_array: Vec<Vec<usize>> = L9
        .iter()
        .map(|row| row[..num_factors].to_vec())
        .collect();

    let experiments: Vec<Map<String, Value>> = orthogonal_array
        .iter()
        .map(|row| {
            let mut experiment = Map::new();
            for (col, factor) in factors.iter().enumerate() {
                experiment.insert(factor.name.clone(), json!(factor.levels[row[col]]));
            }
            experiment
        })
        .collect();

    let mut sn_analysis = Map::new();
    for (col, factor) in factors.iter().enumerate() {
        let groups: Vec<Value> = (0..LEVELS_PER_FACTOR)
            .map(|level_idx| {
                let matching: Vec<usize> = orthogonal_array
                    .iter()
                    .enumerate()
                    .filter(|(_, row)| row[col] == level_idx)
                    .map(|(row_idx, _)| row_idx)
                    .collect();
                json!({
                    "level": factor.levels[level_idx],
                    "experiments": matching,
                })
            })
            .collect();
        sn_analysis.insert(factor.name.clone(), Value::Array(groups));
    }

    let factor_names: Vec<String> = factors.iter().map(|f| f.name.clone()).collect();
    let mut factor_levels = Map::new();
    for factor in &factors {
        factor_levels.insert(factor.name.clone(), json!(factor.levels));
    }

    Ok(TaguchiResponse {
        orthogonal_array,
        experiments,
        factor_names,
        factor_levels,
        num_experiments: L9_RUNS,
        sn_analysis,
    })
}
