//! `uqt taguchi` - L9 orthogonal-array experiment design

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::analyses::taguchi;
use crate::cli::io::{read_request, write_response};
use crate::cli::RequestArgs;

pub fn run(args: &RequestArgs) -> Result<()> {
    let request: taguchi::TaguchiRequest = read_request(args)?;
    let response = taguchi::run(&request).into_diagnostic()?;

    eprintln!(
        "{} {} experiments over {} factor(s)",
        style("taguchi:").green().bold(),
        response.num_experiments,
        response.factor_names.len(),
    );
    write_response(args, &response)
}
