//! Analysis engines - the five request/response contracts
//!
//! Each engine is a self-contained, synchronous computation: a validated
//! request struct (every recognized option with its default), a `run`
//! function, and a plain-numeric response payload. Nothing here holds state
//! across calls.

pub mod chaos;
pub mod monte_carlo;
pub mod oscillator;
pub mod pca;
pub mod taguchi;

pub use chaos::{PolynomialChaosRequest, PolynomialChaosResponse};
pub use monte_carlo::{MonteCarloRequest, MonteCarloResponse};
pub use oscillator::{OscillatorRequest, OscillatorResponse};
pub use pca::{PcaRequest, PcaResponse};
pub use taguchi::{TaguchiRequest, TaguchiResponse};
