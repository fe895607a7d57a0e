//! Transfer command implementation
//!
//! Copies parameters, transitions, node positions and default states from one
//! controller file to another. Only the destination is rewritten.

use anyhow::{Context, Result};
use colored::Colorize;
use sheetanim_backend_controller::{
    transfer_between_assets, FsAssetStore, TransferMode, TransferOptions,
};
use std::process::ExitCode;

use super::json_output::{backend_error_to_json, CommandOutput, JsonWarning, TransferResult};
use super::reporting;

/// Run the transfer command
///
/// # Arguments
/// * `root` - Asset root directory
/// * `source` - Source controller path relative to the root
/// * `destination` - Destination controller path relative to the root
/// * `strict` - Skip transitions to missing states instead of creating them
/// * `reset` - Clear destination parameters and transitions first
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 if either controller could not be loaded or saved
pub fn run(
    root: &str,
    source: &str,
    destination: &str,
    strict: bool,
    reset: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let options = TransferOptions {
        mode: if strict {
            TransferMode::Strict
        } else {
            TransferMode::Lenient
        },
        reset_destination_first: reset,
    };
    let mut store = FsAssetStore::new(root);

    if json_output {
        return match transfer_between_assets(&mut store, source, destination, &options) {
            Ok(report) => {
                let warnings = report
                    .warnings
                    .iter()
                    .map(|w| JsonWarning::new(w.code.to_string(), w.to_string()))
                    .collect();
                let result = TransferResult {
                    source: source.to_string(),
                    destination: destination.to_string(),
                    report,
                };
                CommandOutput::success(result, warnings).print()?;
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                let error = backend_error_to_json(&err);
                CommandOutput::<TransferResult>::failure(vec![error], vec![]).print()?;
                Ok(ExitCode::from(1))
            }
        };
    }

    println!("{} {} -> {}", "Transferring:".cyan().bold(), source, destination);
    println!(
        "{} {}{}",
        "Mode:".dimmed(),
        if strict { "strict" } else { "lenient" },
        if reset { ", reset destination" } else { "" }
    );

    let report = transfer_between_assets(&mut store, source, destination, &options)
        .with_context(|| format!("Failed to transfer {} -> {}", source, destination))?;

    println!();
    reporting::print_transfer_report(&report);
    println!("\n{} {}", "Saved".green().bold(), destination);
    Ok(ExitCode::SUCCESS)
}
