//! `uqt pca` - principal component analysis

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::analyses::pca;
use crate::cli::io::{read_request, write_response};
use crate::cli::RequestArgs;

pub fn run(args: &RequestArgs) -> Result<()> {
    let request: pca::PcaRequest = read_request(args)?;
    let response = pca::run(&request).into_diagnostic()?;

    eprintln!(
        "{} {} observations x {} variables, leading component explains {:.1}%",
        style("pca:").green().bold(),
        response.n_observations,
        response.n_variables,
        response.explained_variance_ratio.first().copied().unwrap_or(0.0) * 100.0,
    );
    write_response(args, &response)
}
