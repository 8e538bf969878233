//! Ensemble statistics - per-frequency reduction over independent samples

use std::time::Instant;

/// Per-frequency mean and standard deviation across a population of sweeps
#[derive(Debug, Clone)]
pub struct EnsembleStats {
    /// Mean response at each frequency, in sweep order
    pub mean: Vec<f64>,

    /// Population standard deviation at each frequency
    pub std_dev: Vec<f64>,
}

/// Reduce a samples x frequencies matrix to per-frequency mean and std.
///
/// Rows are independent draws. The population convention (divide by n) makes
/// a single-sample ensemble report zero spread, which is what a one-draw
/// Monte Carlo run must produce.
pub fn per_frequency_stats(samples: &[Vec<f64>]) -> EnsembleStats {
    let n = samples.len();
    let width = samples.first().map_or(0, |row| row.len());

    let mut mean = vec![0.0; width];
    for row in samples {
        for (acc, value) in mean.iter_mut().zip(row) {
            *acc += value;
        }
    }
    for acc in &mut mean {
        *acc /= n as f64;
    }

    let mut variance = vec![0.0; width];
    for row in samples {
        for ((acc, value), m) in variance.iter_mut().zip(row).zip(&mean) {
            let d = value - m;
            *acc += d * d;
        }
    }
    let std_dev = variance.iter().map(|v| (v / n as f64).sqrt()).collect();

    EnsembleStats { mean, std_dev }
}

/// Wall-clock seconds since `start`, rounded to 0.1 ms for reporting
pub fn elapsed_seconds(start: Instant) -> f64 {
    (start.elapsed().as_secs_f64() * 1e4).round() / 1e4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        let samples = vec![vec![1.0, 10.0], vec![3.0, 10.0]];
        let stats = per_frequency_stats(&samples);
        assert_eq!(stats.mean, vec![2.0, 10.0]);
        assert!((stats.std_dev[0] - 1.0).abs() < 1e-12);
        assert_eq!(stats.std_dev[1], 0.0);
    }

    #[test]
    fn test_single_sample_has_zero_spread() {
        let stats = per_frequency_stats(&[vec![4.2, 0.0, -1.0]]);
        assert_eq!(stats.mean, vec![4.2, 0.0, -1.0]);
        assert!(stats.std_dev.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_empty_ensemble() {
        let stats = per_frequency_stats(&[]);
        assert!(stats.mean.is_empty());
        assert!(stats.std_dev.is_empty());
    }
}
