//! Validate command implementation
//!
//! Parses and validates a params file without running the pipeline.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use texmat_spec::hash::params_hash;

use super::json_output::{JsonError, ValidateOutput};
use crate::input::load_params_file;

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(params_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(params_path)
    } else {
        run_human(params_path)
    }
}

/// Run validate with human-readable (colored) output
fn run_human(params_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), params_path);

    match load_params_file(Path::new(params_path)) {
        Ok(params) => {
            println!("{} {}", "Hash:".dimmed(), &params_hash(&params)?[..16]);
            for (name, value) in params.strengths() {
                println!("  {:<24} {}", name, value);
            }
            println!("  {:<24} {}", "bit_depth", params.bit_depth);
            println!("\n{}", "VALID".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("\n{} {:#}", "INVALID".red().bold(), e);
            Ok(ExitCode::from(1))
        }
    }
}

/// Run validate with machine-readable JSON output
fn run_json(params_path: &str) -> Result<ExitCode> {
    let (output, code) = match load_params_file(Path::new(params_path)) {
        Ok(params) => {
            let hash = params_hash(&params)?;
            (ValidateOutput::success(params, hash), ExitCode::SUCCESS)
        }
        Err(e) => (
            ValidateOutput::failure(vec![JsonError::from_anyhow(&e).with_file(params_path)]),
            ExitCode::from(1),
        ),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_file_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"{ "bit_depth": 3 }"#).unwrap();
        let code = run(path.to_str().unwrap(), true).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_invalid_file_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"{ "bit_depth": 5 }"#).unwrap();
        let code = run(path.to_str().unwrap(), false).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
