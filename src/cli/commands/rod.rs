//! `uqt monte-carlo` and `uqt chaos` - the two rod mesh engines

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::analyses::{chaos, monte_carlo};
use crate::cli::io::{read_request, write_response};
use crate::cli::RequestArgs;

pub fn run_monte_carlo(args: &RequestArgs) -> Result<()> {
    let request: monte_carlo::MonteCarloRequest = read_request(args)?;
    let response = monte_carlo::run(&request).into_diagnostic()?;

    eprintln!(
        "{} {} samples x {} frequencies in {}s",
        style("monte-carlo:").green().bold(),
        response.num_samples,
        response.frequencies.len(),
        response.computation_time_s,
    );
    write_response(args, &response)
}

pub fn run_chaos(args: &RequestArgs) -> Result<()> {
    let request: chaos::PolynomialChaosRequest = read_request(args)?;
    let response = chaos::run(&request).into_diagnostic()?;

    eprintln!(
        "{} order {} expansion over {} frequencies in {}s",
        style("chaos:").green().bold(),
        response.chaos_order,
        response.frequencies.len(),
        response.computation_time_s,
    );
    write_response(args, &response)
}
