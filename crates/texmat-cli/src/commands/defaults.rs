//! Defaults command implementation
//!
//! Prints the default synthesis parameters as a ready-to-edit params file.

use anyhow::Result;
use std::process::ExitCode;

use texmat_spec::SynthesisParams;

/// Run the defaults command
pub fn run() -> Result<ExitCode> {
    println!("{}", SynthesisParams::default().to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}
