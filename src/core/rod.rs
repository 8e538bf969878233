//! Stochastic 2-DOF rod mesh model
//!
//! Assembles the mass/stiffness/damping matrices for one stiffness-parameter
//! realization and solves the unit-force transfer function at a given angular
//! frequency:
//!
//! ```text
//! (K(k) - w^2 M + j w C) x = F,    F = (1, 0)
//! ```
//!
//! - M = [[2m, m], [m, 2m]] with m = 1 (normalized)
//! - K(k) = [[2k, -k], [-k, 2k]]
//! - C = zeta * K(k0) / k0 - stiffness-proportional, anchored to the nominal
//!   stiffness so every draw shares the same damping matrix
//!
//! A singular system reports a magnitude of 0 for that (draw, frequency) pair
//! instead of propagating a fault, so one ill-conditioned sample never aborts
//! a whole sweep.

use nalgebra::{Complex, Matrix2, Vector2};

/// Normalized lumped mass
const UNIT_MASS: f64 = 1.0;

/// The 2-DOF rod mesh for one nominal configuration
#[derive(Debug, Clone)]
pub struct RodModel {
    mass: Matrix2<f64>,
    damping: Matrix2<f64>,
}

impl RodModel {
    /// Build the model around a nominal stiffness and damping ratio
    pub fn new(nominal_stiffness: f64, damping_ratio: f64) -> Self {
        let mass = Matrix2::new(
            2.0 * UNIT_MASS,
            UNIT_MASS,
            UNIT_MASS,
            2.0 * UNIT_MASS,
        );
        let damping =
            Self::stiffness_matrix(nominal_stiffness) * (damping_ratio / nominal_stiffness);
        Self { mass, damping }
    }

    /// Stiffness matrix for one parameter realization
    pub fn stiffness_matrix(k: f64) -> Matrix2<f64> {
        Matrix2::new(2.0 * k, -k, -k, 2.0 * k)
    }

    /// The fixed unit excitation vector F = (1, 0)
    pub fn unit_force() -> Vector2<Complex<f64>> {
        Vector2::new(Complex::new(1.0, 0.0), Complex::new(0.0, 0.0))
    }

    /// Assemble the complex dynamic operator K - w^2 M + j w C
    pub fn dynamic_operator(
        &self,
        stiffness: &Matrix2<f64>,
        omega: f64,
    ) -> Matrix2<Complex<f64>> {
        let mut operator = Matrix2::zeros();
        for i in 0..2 {
            for j in 0..2 {
                operator[(i, j)] = Complex::new(
                    stiffness[(i, j)] - omega * omega * self.mass[(i, j)],
                    omega * self.damping[(i, j)],
                );
            }
        }
        operator
    }

    /// Solve the dynamic system at `omega > 0`; `None` when singular
    pub fn dynamic_solve(
        &self,
        stiffness: &Matrix2<f64>,
        omega: f64,
    ) -> Option<Vector2<Complex<f64>>> {
        self.dynamic_operator(stiffness, omega)
            .lu()
            .solve(&Self::unit_force())
    }

    /// Response magnitude |x_0| at angular frequency `omega` for stiffness
    /// parameter `k`.
    ///
    /// `omega == 0` falls back to the static real solve K x = F. A singular
    /// system yields 0.
    pub fn response_magnitude(&self, k: f64, omega: f64) -> f64 {
        let stiffness = Self::stiffness_matrix(k);
        if omega == 0.0 {
            match stiffness.lu().solve(&Vector2::new(1.0, 0.0)) {
                Some(x) => x[0].abs(),
                None => 0.0,
            }
        } else {
            match self.dynamic_solve(&stiffness, omega) {
                Some(x) => x[0].norm(),
                None => 0.0,
            }
        }
    }
}
