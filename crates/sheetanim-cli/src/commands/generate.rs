//! Generate command implementation
//!
//! Runs a generation job against an asset root: sheets are read from the
//! root, clips and the controller are written back under it.

use anyhow::{Context, Result};
use colored::Colorize;
use sheetanim_backend_controller::{run_job, FsAssetStore};
use sheetanim_backend_sprite::FsBitmapSource;
use sheetanim_spec::{validate_job, GenerationJob};
use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{
    backend_error_to_json, error_codes, validation_error_to_json, validation_warning_to_json,
    CommandOutput, GenerateResult, JsonError,
};
use super::reporting;

/// Run the generate command
///
/// # Arguments
/// * `job_path` - Path to the job file
/// * `root` - Asset root directory
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the job ran (even with skipped items), 1 on a fatal error
pub fn run(job_path: &str, root: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(job_path, root)
    } else {
        run_human(job_path, root)
    }
}

fn run_human(job_path: &str, root: &str) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Generating:".cyan().bold(), job_path);
    println!("{} {}", "Asset root:".dimmed(), root);

    let content = fs::read_to_string(job_path)
        .with_context(|| format!("Failed to read job file: {}", job_path))?;
    let job = GenerationJob::from_json(&content)
        .with_context(|| format!("Failed to parse job file: {}", job_path))?;
    log::debug!("loaded job {} ({} bytes)", job_path, content.len());

    let validation = validate_job(&job);
    reporting::print_validation(&validation);
    if !validation.is_ok() {
        println!(
            "{}",
            format!("Job is invalid: {} error(s)", validation.errors.len())
                .red()
                .bold()
        );
        return Ok(ExitCode::from(1));
    }

    let mut store = FsAssetStore::new(root);
    let bitmaps = FsBitmapSource::new(root);
    let report = run_job(&job, &mut store, &bitmaps)
        .with_context(|| format!("Generation failed for job: {}", job_path))?;

    reporting::print_generation_report(&report);
    println!(
        "{} {:.1}s",
        "Finished in".dimmed(),
        start.elapsed().as_secs_f64()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(job_path: &str, root: &str) -> Result<ExitCode> {
    let content = match fs::read_to_string(job_path) {
        Ok(content) => content,
        Err(e) => {
            let error = JsonError::new(
                error_codes::FILE_READ,
                format!("Failed to read job file: {}", e),
            )
            .with_file(job_path);
            CommandOutput::<GenerateResult>::failure(vec![error], vec![]).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    let job = match GenerationJob::from_json(&content) {
        Ok(job) => job,
        Err(e) => {
            let error = JsonError::new(error_codes::JSON_PARSE, e.to_string()).with_file(job_path);
            CommandOutput::<GenerateResult>::failure(vec![error], vec![]).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    let validation = validate_job(&job);
    let warnings: Vec<_> = validation
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();
    if !validation.is_ok() {
        let errors = validation
            .errors
            .iter()
            .map(validation_error_to_json)
            .collect();
        CommandOutput::<GenerateResult>::failure(errors, warnings).print()?;
        return Ok(ExitCode::from(1));
    }

    let mut store = FsAssetStore::new(root);
    let bitmaps = FsBitmapSource::new(root);
    match run_job(&job, &mut store, &bitmaps) {
        Ok(report) => {
            let result = GenerateResult {
                job: job_path.to_string(),
                report,
            };
            CommandOutput::success(result, warnings).print()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let error = backend_error_to_json(&err).with_file(job_path);
            CommandOutput::<GenerateResult>::failure(vec![error], warnings).print()?;
            Ok(ExitCode::from(1))
        }
    }
}
