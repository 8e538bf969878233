//! CLI module - argument parsing and command dispatch

pub mod commands;
pub mod io;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "uqt",
    version,
    about = "Uncertainty quantification engines for small mechanical resonance models"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Monte Carlo transfer-function statistics for the 2-DOF rod mesh
    MonteCarlo(RequestArgs),

    /// Polynomial chaos approximation of the rod mesh transfer function
    Chaos(RequestArgs),

    /// L9 orthogonal-array experiment design with per-level groupings
    Taguchi(RequestArgs),

    /// Damped oscillator response under parameter uncertainty, three ways
    Oscillator(RequestArgs),

    /// Principal component analysis of an observation matrix
    Pca(RequestArgs),
}

/// Shared request/response plumbing for every engine command
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// JSON request file, "-" for stdin; omitted fields use engine defaults
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the JSON response here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON response
    #[arg(long)]
    pub pretty: bool,
}
