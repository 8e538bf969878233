//! Linear oscillator uncertainty engine
//!
//! Evaluates the closed-form amplitude response of a damped single-DOF
//! oscillator,
//!
//! ```text
//! |H(wf)| = f / sqrt((w^2 - wf^2)^2 + (2 xi w wf)^2)
//! ```
//!
//! three ways over the same sweep: deterministically at the nominal
//! parameters, by Monte Carlo sampling of (xi, omega), and by a fixed
//! Gaussian-weighted grid quadrature. The quadrature touches grid^2
//! parameter combinations against the sampler's tens of thousands, so its
//! reported time is orders of magnitude smaller for the same sweep.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::error::{AnalysisError, Result};
use crate::core::random::{seeded_rng, ParameterDistribution};
use crate::core::stats::{elapsed_seconds, per_frequency_stats};
use crate::core::sweep::{linspace, FrequencySweep};

/// Sampled parameters are floored here to stay physical
const PARAMETER_FLOOR: f64 = 0.001;

/// Guard against division by an exactly-zero denominator at resonance
const MIN_DENOMINATOR: f64 = 1e-15;

/// Closed-form amplitude response at forcing frequency `forcing_freq`
pub fn amplitude(xi: f64, omega: f64, forcing_freq: f64, f_amplitude: f64) -> f64 {
    let detune = omega * omega - forcing_freq * forcing_freq;
    let damping_term = 2.0 * xi * omega * forcing_freq;
    let denom = (detune * detune + damping_term * damping_term).sqrt();
    f_amplitude / denom.max(MIN_DENOMINATOR)
}

/// Oscillator uncertainty request; omitted fields take the book defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorRequest {
    /// Nominal damping ratio
    pub xi0: f64,

    /// Nominal natural frequency (rad/s)
    pub omega0: f64,

    /// Standard deviation of the damping ratio
    pub sigma_xi: f64,

    /// Standard deviation of the natural frequency
    pub sigma_omega: f64,

    /// Forcing amplitude
    pub f_amplitude: f64,

    /// Monte Carlo sample count
    pub mc_samples: usize,

    /// Grid points per variable for the weighted quadrature
    pub taguchi_points: usize,

    /// Lowest forcing frequency
    pub freq_min: f64,

    /// Highest forcing frequency
    pub freq_max: f64,

    /// Number of sweep frequencies
    pub num_freq_points: usize,

    /// Explicit RNG seed for reproducible sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for OscillatorRequest {
    fn default() -> Self {
        // Book values: xi0 = 5%, omega0 = 1 rad/s, both sigmas 0.05
        Self {
            xi0: 0.05,
            omega0: 1.0,
            sigma_xi: 0.05,
            sigma_omega: 0.05,
            f_amplitude: 1.0,
            mc_samples: 10000,
            taguchi_points: 9,
            freq_min: 0.01,
            freq_max: 3.0,
            num_freq_points: 300,
            seed: None,
        }
    }
}

impl OscillatorRequest {
    fn validate(&self) -> Result<(FrequencySweep, ParameterDistribution, ParameterDistribution)> {
        if !self.f_amplitude.is_finite() {
            return Err(AnalysisError::parameter("f_amplitude", "must be finite"));
        }
        if self.mc_samples < 1 {
            return Err(AnalysisError::parameter("mc_samples", "must be at least 1"));
        }
        if self.taguchi_points < 1 {
            return Err(AnalysisError::parameter(
                "taguchi_points",
                "must be at least 1",
            ));
        }
        let sweep = FrequencySweep::new(self.freq_min, self.freq_max, self.num_freq_points)?;
        let xi = ParameterDistribution::new("sigma_xi", self.xi0, self.sigma_xi)?;
        let omega = ParameterDistribution::new("sigma_omega", self.omega0, self.sigma_omega)?;
        Ok((sweep, xi, omega))
    }
}

/// Mean/std sweep from the sampling path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampledSummary {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
    pub samples: usize,
    pub time_s: f64,
}

/// Mean/std sweep from the weighted-grid quadrature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuadratureSummary {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
    pub points: usize,
    pub time_s: f64,
}

/// Echo of the physical inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OscillatorParameters {
    pub xi0: f64,
    pub omega0: f64,
    pub sigma_xi: f64,
    pub sigma_omega: f64,
    pub f_amplitude: f64,
}

/// The three evaluations side by side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OscillatorResponse {
    pub frequencies: Vec<f64>,
    pub deterministic_response: Vec<f64>,
    pub monte_carlo: SampledSummary,
    pub taguchi: QuadratureSummary,
    pub parameters: OscillatorParameters,
}

/// One variable's quadrature grid: evenly spaced points over +/- 3 sigma with
/// normalized Gaussian weights
fn quadrature_grid(dist: &ParameterDistribution, points: usize) -> (Vec<f64>, Vec<f64>) {
    let nominal = dist.nominal();
    let std_dev = dist.std_dev();
    let grid = linspace(nominal - 3.0 * std_dev, nominal + 3.0 * std_dev, points);

    // A deterministic parameter collapses the grid to its nominal value
    if std_dev == 0.0 {
        let weights = vec![1.0 / points as f64; points];
        return (grid, weights);
    }

    let mut weights: Vec<f64> = grid
        .iter()
        .map(|x| {
            let z = (x - nominal) / std_dev;
            (-0.5 * z * z).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    (grid, weights)
}

/// Run all three evaluations
pub fn run(request: &OscillatorRequest) -> Result<OscillatorResponse> {
    let (sweep, xi, omega) = request.validate()?;
    let frequencies = sweep.values();
    let f_amplitude = request.f_amplitude;

    // Monte Carlo: draw (xi, omega) pairs up front, then fan the independent
    // sweeps out
    let mc_start = Instant::now();
    let mut rng = seeded_rng(request.seed);
    let pairs: Vec<(f64, f64)> = (0..request.mc_samples)
        .map(|_| {
            (
                xi.sample(&mut rng).max(PARAMETER_FLOOR),
                omega.sample(&mut rng).max(PARAMETER_FLOOR),
            )
        })
        .collect();
    let responses: Vec<Vec<f64>> = pairs
        .par_iter()
        .map(|&(xi_s, omega_s)| {
            frequencies
                .iter()
                .map(|&wf| amplitude(xi_s, omega_s, wf, f_amplitude))
                .collect()
        })
        .collect();
    let mc_stats = per_frequency_stats(&responses);
    let mc_time = elapsed_seconds(mc_start);

    // Weighted-grid quadrature: grid^2 combinations accumulate the first and
    // second weighted moments per frequency
    let quad_start = Instant::now();
    let (xi_grid, xi_weights) = quadrature_grid(&xi, request.taguchi_points);
    let (omega_grid, omega_weights) = quadrature_grid(&omega, request.taguchi_points);

    let count = frequencies.len();
    let mut first_moment = vec![0.0; count];
    let mut second_moment = vec![0.0; count];
    for (xi_p, xi_w) in xi_grid.iter().zip(&xi_weights) {
        for (omega_p, omega_w) in omega_grid.iter().zip(&omega_weights) {
            let weight = xi_w * omega_w;
            let xi_val = xi_p.max(PARAMETER_FLOOR);
            let omega_val = omega_p.max(PARAMETER_FLOOR);
            for (f_idx, &wf) in frequencies.iter().enumerate() {
                let response = amplitude(xi_val, omega_val, wf, f_amplitude);
                first_moment[f_idx] += weight * response;
                second_moment[f_idx] += weight * response * response;
            }
        }
    }
    // Clamp against negative variance from floating round-off
    let quad_std: Vec<f64> = first_moment
        .iter()
        .zip(&second_moment)
        .map(|(m, m2)| (m2 - m * m).max(0.0).sqrt())
        .collect();
    let quad_time = elapsed_seconds(quad_start);

    let deterministic_response = frequencies
        .iter()
        .map(|&wf| amplitude(request.xi0, request.omega0, wf, f_amplitude))
        .collect();

    Ok(OscillatorResponse {
        frequencies,
        deterministic_response,
        monte_carlo: SampledSummary {
            mean: mc_stats.mean,
            std: mc_stats.std_dev,
            samples: request.mc_samples,
            time_s: mc_time,
        },
        taguchi: QuadratureSummary {
            mean: first_moment,
            std: quad_std,
            points: request.taguchi_points,
            time_s: quad_time,
        },
        parameters: OscillatorParameters {
            xi0: request.xi0,
            omega0: request.omega0,
            sigma_xi: request.sigma_xi,
            sigma_omega: request.sigma_omega,
            f_amplitude: request.f_amplitude,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resonant_amplitude_closed_form() {
        // At wf = omega: |H| = f / (2 xi omega^2); book values give 10.0
        let response = amplitude(0.05, 1.0, 1.0, 1.0);
        assert!((response - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic_sweep_peaks_near_resonance() {
        let request = OscillatorRequest {
            mc_samples: 10,
            num_freq_points: 60,
            seed: Some(3),
            ..Default::default()
        };
        let response = run(&request).unwrap();
        let peak_idx = response
            .deterministic_response
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        let peak_freq = response.frequencies[peak_idx];
        assert!((peak_freq - request.omega0).abs() < 0.1);
    }

    #[test]
    fn test_zero_uncertainty_collapses_all_three() {
        let request = OscillatorRequest {
            sigma_xi: 0.0,
            sigma_omega: 0.0,
            mc_samples: 5,
            num_freq_points: 40,
            seed: Some(1),
            ..Default::default()
        };
        let response = run(&request).unwrap();
        for i in 0..response.frequencies.len() {
            let det = response.deterministic_response[i];
            assert!((response.monte_carlo.mean[i] - det).abs() < 1e-12);
            // Summation round-off can leave a vanishing residue
            assert!(response.monte_carlo.std[i] < 1e-12);
            assert!((response.taguchi.mean[i] - det).abs() < 1e-9 * det.max(1.0));
            assert!(response.taguchi.std[i] < 1e-5);
        }
    }

    #[test]
    fn test_quadrature_tracks_sampling() {
        let request = OscillatorRequest {
            mc_samples: 4000,
            num_freq_points: 30,
            seed: Some(11),
            ..Default::default()
        };
        let response = run(&request).unwrap();
        // Away from resonance both estimators settle on the same mean
        for i in 0..5 {
            let mc = response.monte_carlo.mean[i];
            let quad = response.taguchi.mean[i];
            assert!(
                (mc - quad).abs() / mc < 0.15,
                "mc {} vs quadrature {} at index {}",
                mc,
                quad,
                i
            );
        }
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let request = OscillatorRequest {
            mc_samples: 100,
            num_freq_points: 20,
            seed: Some(5),
            ..Default::default()
        };
        let a = run(&request).unwrap();
        let b = run(&request).unwrap();
        assert_eq!(a.monte_carlo.mean, b.monte_carlo.mean);
        assert_eq!(a.monte_carlo.std, b.monte_carlo.std);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(run(&OscillatorRequest {
            mc_samples: 0,
            ..Default::default()
        })
        .is_err());
        assert!(run(&OscillatorRequest {
            taguchi_points: 0,
            ..Default::default()
        })
        .is_err());
        assert!(run(&OscillatorRequest {
            sigma_xi: -0.5,
            ..Default::default()
        })
        .is_err());
        assert!(run(&OscillatorRequest {
            freq_min: 5.0,
            freq_max: 1.0,
            ..Default::default()
        })
        .is_err());
    }
}
