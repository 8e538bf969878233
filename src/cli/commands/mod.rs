//! Command implementations - one module per engine family

pub mod oscillator;
pub mod pca;
pub mod rod;
pub mod taguchi;
