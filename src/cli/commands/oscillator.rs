//! `uqt oscillator` - damped oscillator uncertainty comparison

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::analyses::oscillator;
use crate::cli::io::{read_request, write_response};
use crate::cli::RequestArgs;

pub fn run(args: &RequestArgs) -> Result<()> {
    let request: oscillator::OscillatorRequest = read_request(args)?;
    let response = oscillator::run(&request).into_diagnostic()?;

    eprintln!(
        "{} {} samples in {}s, {}-point quadrature in {}s",
        style("oscillator:").green().bold(),
        response.monte_carlo.samples,
        response.monte_carlo.time_s,
        response.taguchi.points,
        response.taguchi.time_s,
    );
    write_response(args, &response)
}
