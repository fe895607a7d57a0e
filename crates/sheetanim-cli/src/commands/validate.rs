//! Validate command implementation
//!
//! Parses and validates a generation job without reading sheets or writing
//! assets.

use anyhow::{Context, Result};
use colored::Colorize;
use sheetanim_spec::{validate_job, GenerationJob};
use std::fs;
use std::process::ExitCode;

use super::json_output::{
    error_codes, validation_error_to_json, validation_warning_to_json, CommandOutput, JsonError,
    ValidateResult,
};
use super::reporting;

/// Run the validate command
///
/// # Arguments
/// * `job_path` - Path to the job file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(job_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(job_path)
    } else {
        run_human(job_path)
    }
}

fn run_human(job_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), job_path);

    let content = fs::read_to_string(job_path)
        .with_context(|| format!("Failed to read job file: {}", job_path))?;
    let job = GenerationJob::from_json(&content)
        .with_context(|| format!("Failed to parse job file: {}", job_path))?;

    let result = validate_job(&job);
    reporting::print_validation(&result);

    if result.is_ok() {
        println!("{}", "Job is valid".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{}",
            format!("Job is invalid: {} error(s)", result.errors.len())
                .red()
                .bold()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(job_path: &str) -> Result<ExitCode> {
    let content = match fs::read_to_string(job_path) {
        Ok(content) => content,
        Err(e) => {
            let error = JsonError::new(
                error_codes::FILE_READ,
                format!("Failed to read job file: {}", e),
            )
            .with_file(job_path);
            CommandOutput::<ValidateResult>::failure(vec![error], vec![]).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    let job = match GenerationJob::from_json(&content) {
        Ok(job) => job,
        Err(e) => {
            let error = JsonError::new(error_codes::JSON_PARSE, e.to_string()).with_file(job_path);
            CommandOutput::<ValidateResult>::failure(vec![error], vec![]).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    let result = validate_job(&job);
    let warnings = result
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();

    if !result.is_ok() {
        let errors = result.errors.iter().map(validation_error_to_json).collect();
        CommandOutput::<ValidateResult>::failure(errors, warnings).print()?;
        return Ok(ExitCode::from(1));
    }

    let output = CommandOutput::success(
        ValidateResult {
            job: job_path.to_string(),
            source_hash: blake3::hash(content.as_bytes()).to_hex().to_string(),
        },
        warnings,
    );
    output.print()?;
    Ok(ExitCode::SUCCESS)
}
