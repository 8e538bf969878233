//! Request/response plumbing shared by all engine commands
//!
//! Stdout carries nothing but the JSON payload so commands compose in
//! pipelines; human-facing summaries go to stderr.

use std::fs;
use std::io::Read;

use miette::{IntoDiagnostic, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cli::RequestArgs;

/// Load the JSON request, falling back to the engine defaults when no input
/// was given
pub fn read_request<T: DeserializeOwned + Default>(args: &RequestArgs) -> Result<T> {
    let raw = match &args.input {
        None => return Ok(T::default()),
        Some(path) if path.as_os_str() == "-" => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .into_diagnostic()?;
            buffer
        }
        Some(path) => fs::read_to_string(path).into_diagnostic()?,
    };
    serde_json::from_str(&raw).into_diagnostic()
}

/// Emit the JSON response to stdout or the requested file
pub fn write_response<T: Serialize>(args: &RequestArgs, response: &T) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    }
    .into_diagnostic()?;

    match &args.output {
        Some(path) => fs::write(path, json + "\n").into_diagnostic()?,
        None => println!("{}", json),
    }
    Ok(())
}
