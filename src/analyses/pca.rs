//! Principal component analysis engine
//!
//! Eigen-decomposes the sample covariance of an observation matrix, reports
//! explained variance, projects the centered data onto the component basis,
//! and correlates the original variables with the leading components.

use std::cmp::Ordering;

use nalgebra::{DMatrix, SymmetricEigen};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::core::error::{AnalysisError, Result};

/// Leading components reported in the loading correlations
const LOADING_COMPONENTS: usize = 3;

/// PCA request: N observations (rows) of P variables (columns)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PcaRequest {
    pub data_matrix: Vec<Vec<f64>>,
}

impl PcaRequest {
    fn validate(&self) -> Result<(usize, usize)> {
        let n_obs = self.data_matrix.len();
        if n_obs < 2 {
            return Err(AnalysisError::TooFewObservations { count: n_obs });
        }
        let n_vars = self.data_matrix[0].len();
        if n_vars == 0 {
            return Err(AnalysisError::MalformedMatrix);
        }
        for (row_idx, row) in self.data_matrix.iter().enumerate() {
            if row.len() != n_vars {
                return Err(AnalysisError::MalformedMatrix);
            }
            for (col_idx, value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(AnalysisError::NonFiniteEntry {
                        row: row_idx,
                        col: col_idx,
                    });
                }
            }
        }
        Ok((n_obs, n_vars))
    }
}

/// Eigenstructure of the covariance with projections and variable loadings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcaResponse {
    /// Descending, clamped at 0 (the covariance is positive semi-definite)
    pub eigenvalues: Vec<f64>,

    /// Rows = variables, columns = components, aligned to `eigenvalues`
    pub eigenvectors: Vec<Vec<f64>>,

    /// eigenvalue / total variance; sums to 1 when total variance > 0
    pub explained_variance_ratio: Vec<f64>,

    pub cumulative_variance: Vec<f64>,

    /// Centered observations projected onto the component basis, N x P
    pub scores: Vec<Vec<f64>>,

    /// Per leading component: variable name ("X1"..) -> loading correlation
    pub correlations: Vec<Map<String, Value>>,

    pub mean: Vec<f64>,
    pub n_observations: usize,
    pub n_variables: usize,
}

/// Run the decomposition
pub fn run(request: &PcaRequest) -> Result<PcaResponse> {
    let (n_obs, n_vars) = request.validate()?;

    let data = DMatrix::from_fn(n_obs, n_vars, |i, j| request.data_matrix[i][j]);

    let mean: Vec<f64> = (0..n_vars)
        .map(|j| data.column(j).sum() / n_obs as f64)
        .collect();
    let centered = DMatrix::from_fn(n_obs, n_vars, |i, j| data[(i, j)] - mean[j]);

    // Unbiased sample covariance over variables
    let covariance = (centered.transpose() * &centered) / (n_obs - 1) as f64;
    let eigen = SymmetricEigen::new(covariance);

    // Sort eigenpairs by descending eigenvalue; the stable sort keeps
    // repeated runs on identical input bit-for-bit identical
    let mut order: Vec<usize> = (0..n_vars).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(Ordering::Equal)
    });
    let eigenvalues: Vec<f64> = order
        .iter()
        .map(|&i| eigen.eigenvalues[i].max(0.0))
        .collect();
    let mut vectors = DMatrix::zeros(n_vars, n_vars);
    for (new_col, &old_col) in order.iter().enumerate() {
        vectors.set_column(new_col, &eigen.eigenvectors.column(old_col));
    }

    let total_variance: f64 = eigenvalues.iter().sum();
    let explained_variance_ratio: Vec<f64> = if total_variance > 0.0 {
        eigenvalues.iter().map(|v| v / total_variance).collect()
    } else {
        eigenvalues.clone()
    };
    let cumulative_variance: Vec<f64> = explained_variance_ratio
        .iter()
        .scan(0.0, |acc, ratio| {
            *acc += ratio;
            Some(*acc)
        })
        .collect();

    let scores = &centered * &vectors;

    // Loading correlations against the population spread of each variable
    let variable_std: Vec<f64> = (0..n_vars)
        .map(|j| {
            let var = (0..n_obs)
                .map(|i| {
                    let d = data[(i, j)] - mean[j];
                    d * d
                })
                .sum::<f64>()
                / n_obs as f64;
            var.sqrt()
        })
        .collect();
    let correlations: Vec<Map<String, Value>> = (0..n_vars.min(LOADING_COMPONENTS))
        .map(|component| {
            let mut by_variable = Map::new();
            for var_idx in 0..n_vars {
                let correlation = if variable_std[var_idx] > 0.0 && eigenvalues[component] > 0.0 {
                    vectors[(var_idx, component)] * eigenvalues[component].sqrt()
                        / variable_std[var_idx]
                } else {
                    0.0
                };
                by_variable.insert(format!("X{}", var_idx + 1), json!(correlation));
            }
            by_variable
        })
        .collect();

    Ok(PcaResponse {
        eigenvalues,
        eigenvectors: (0..n_vars)
            .map(|i| (0..n_vars).map(|j| vectors[(i, j)]).collect())
            .collect(),
        explained_variance_ratio,
        cumulative_variance,
        scores: (0..n_obs)
            .map(|i| (0..n_vars).map(|j| scores[(i, j)]).collect())
            .collect(),
        correlations,
        mean,
        n_observations: n_obs,
        n_variables: n_vars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> Vec<Vec<f64>> {
        vec![
            vec![2.5, 2.4, 0.5],
            vec![0.5, 0.7, 1.9],
            vec![2.2, 2.9, 0.4],
            vec![1.9, 2.2, 1.1],
            vec![3.1, 3.0, 0.2],
            vec![2.3, 2.7, 0.9],
            vec![2.0, 1.6, 1.4],
            vec![1.0, 1.1, 2.0],
        ]
    }

    #[test]
    fn test_eigenvalues_descending_and_nonnegative() {
        let response = run(&PcaRequest {
            data_matrix: sample_matrix(),
        })
        .unwrap();
        for pair in response.eigenvalues.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        assert!(response.eigenvalues.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_explained_variance_sums_to_one() {
        let response = run(&PcaRequest {
            data_matrix: sample_matrix(),
        })
        .unwrap();
        let total: f64 = response.explained_variance_ratio.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        let last = response.cumulative_variance.last().unwrap();
        assert!((last - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_eigenvectors_orthonormal() {
        let response = run(&PcaRequest {
            data_matrix: sample_matrix(),
        })
        .unwrap();
        let p = response.n_variables;
        for a in 0..p {
            for b in 0..p {
                let dot: f64 = (0..p)
                    .map(|i| response.eigenvectors[i][a] * response.eigenvectors[i][b])
                    .sum();
                let expected = if a == b { 1.0 } else { 0.0 };
                assert!(
                    (dot - expected).abs() < 1e-9,
                    "columns {} . {} = {}",
                    a,
                    b,
                    dot
                );
            }
        }
    }

    #[test]
    fn test_scores_reconstruct_centered_data() {
        let matrix = sample_matrix();
        let response = run(&PcaRequest {
            data_matrix: matrix.clone(),
        })
        .unwrap();
        // centered ~= scores * V^T
        for (i, row) in matrix.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                let centered = value - response.mean[j];
                let reconstructed: f64 = (0..response.n_variables)
                    .map(|c| response.scores[i][c] * response.eigenvectors[j][c])
                    .sum();
                assert!((centered - reconstructed).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_repeated_runs_identical() {
        let request = PcaRequest {
            data_matrix: sample_matrix(),
        };
        let a = run(&request).unwrap();
        let b = run(&request).unwrap();
        assert_eq!(a.eigenvalues, b.eigenvalues);
        assert_eq!(a.eigenvectors, b.eigenvectors);
        assert_eq!(a.scores, b.scores);
    }

    #[test]
    fn test_constant_column_gets_zero_correlation() {
        let matrix = vec![
            vec![1.0, 5.0],
            vec![2.0, 5.0],
            vec![3.0, 5.0],
        ];
        let response = run(&PcaRequest {
            data_matrix: matrix,
        })
        .unwrap();
        let x2 = response.correlations[0].get("X2").and_then(Value::as_f64);
        assert_eq!(x2, Some(0.0));
    }

    #[test]
    fn test_correlations_cover_leading_components() {
        let response = run(&PcaRequest {
            data_matrix: sample_matrix(),
        })
        .unwrap();
        assert_eq!(response.correlations.len(), 3);
        assert_eq!(response.correlations[0].len(), 3);
    }

    #[test]
    fn test_too_few_observations_rejected() {
        let request = PcaRequest {
            data_matrix: vec![vec![1.0, 2.0]],
        };
        assert!(matches!(
            run(&request),
            Err(AnalysisError::TooFewObservations { count: 1 })
        ));
        assert!(matches!(
            run(&PcaRequest::default()),
            Err(AnalysisError::TooFewObservations { count: 0 })
        ));
    }

    #[test]
    fn test_malformed_matrices_rejected() {
        let ragged = PcaRequest {
            data_matrix: vec![vec![1.0, 2.0], vec![3.0]],
        };
        assert!(matches!(run(&ragged), Err(AnalysisError::MalformedMatrix)));

        let non_finite = PcaRequest {
            data_matrix: vec![vec![1.0, 2.0], vec![3.0, f64::NAN]],
        };
        assert!(matches!(
            run(&non_finite),
            Err(AnalysisError::NonFiniteEntry { row: 1, col: 1 })
        ));
    }
}
