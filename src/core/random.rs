//! Sampling primitives - isolated random streams and validated Gaussians
//!
//! Every stochastic computation owns its generator. Concurrent requests never
//! share mutable random state, and an explicit seed reproduces a run exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::core::error::{AnalysisError, Result};

/// A fresh generator for one computation.
///
/// With a seed the stream is fully reproducible; without one it is drawn
/// from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    }
}

/// A Gaussian-distributed physical parameter: (nominal value, standard deviation).
///
/// A standard deviation of 0 is valid and means deterministic.
#[derive(Debug, Clone, Copy)]
pub struct ParameterDistribution {
    nominal: f64,
    std_dev: f64,
    normal: Normal<f64>,
}

impl ParameterDistribution {
    /// Validate and build. `name` identifies the offending parameter in errors.
    pub fn new(name: &str, nominal: f64, std_dev: f64) -> Result<Self> {
        if !nominal.is_finite() {
            return Err(AnalysisError::parameter(name, "nominal value must be finite"));
        }
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(AnalysisError::parameter(
                name,
                format!("standard deviation must be finite and >= 0, got {}", std_dev),
            ));
        }
        let normal = Normal::new(nominal, std_dev)
            .map_err(|_| AnalysisError::parameter(name, "not a valid Gaussian"))?;
        Ok(Self {
            nominal,
            std_dev,
            normal,
        })
    }

    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// One independent draw
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.normal.sample(rng)
    }
}
