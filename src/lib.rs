//! UQT: Uncertainty Quantification Toolkit
//!
//! Engines for propagating probabilistic parameter uncertainty through small
//! mechanical resonance models, with head-to-head comparison of sampling,
//! spectral, and combinatorial strategies.

pub mod analyses;
pub mod cli;
pub mod core;
