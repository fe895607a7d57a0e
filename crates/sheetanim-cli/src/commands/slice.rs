//! Slice command implementation
//!
//! Cuts a sheet into its grid and lists every cell, flagging the fully
//! transparent ones a generation run would drop.

use anyhow::{Context, Result};
use colored::Colorize;
use sheetanim_backend_sprite::{is_sprite_empty, slice_sheet, FsBitmapSource, SlicedSheet};
use std::process::ExitCode;

use super::json_output::{backend_error_to_json, CommandOutput, SliceFrame, SliceResult};

/// Run the slice command
///
/// # Arguments
/// * `root` - Asset root directory
/// * `sheet` - Sheet path relative to the root
/// * `rows`, `columns` - Grid dimensions
/// * `pivot` - Normalized pivot applied to every cell
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 if the sheet could not be sliced
pub fn run(
    root: &str,
    sheet: &str,
    rows: u32,
    columns: u32,
    pivot: [f64; 2],
    json_output: bool,
) -> Result<ExitCode> {
    let source = FsBitmapSource::new(root);
    let sliced = slice_sheet(&source, sheet, rows, columns, pivot);

    if json_output {
        return match sliced {
            Ok(sliced) => {
                CommandOutput::success(slice_result(sheet, &sliced), vec![]).print()?;
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                let error = backend_error_to_json(&err).with_file(sheet);
                CommandOutput::<SliceResult>::failure(vec![error], vec![]).print()?;
                Ok(ExitCode::from(1))
            }
        };
    }

    println!("{} {}", "Slicing:".cyan().bold(), sheet);
    let sliced = sliced.with_context(|| format!("Failed to slice sheet: {}", sheet))?;
    let result = slice_result(sheet, &sliced);

    println!(
        "{} {}x{} px, {}x{} grid, {}x{} px cells",
        "Sheet:".dimmed(),
        result.width,
        result.height,
        result.rows,
        result.columns,
        result.cell_width,
        result.cell_height
    );
    println!();
    for frame in &result.frames {
        let rect = format!(
            "({}, {}) {}x{}",
            frame.rect.x, frame.rect.y, frame.rect.width, frame.rect.height
        );
        if frame.empty {
            println!("  {} {} {}", "o".dimmed(), frame.name.dimmed(), "empty".dimmed());
        } else {
            println!("  {} {} {}", "#".green(), frame.name, rect.dimmed());
        }
    }

    let empty = result.frames.iter().filter(|f| f.empty).count();
    println!(
        "\n{}",
        format!("{} frame(s), {} empty", result.frames.len(), empty)
            .green()
            .bold()
    );
    Ok(ExitCode::SUCCESS)
}

fn slice_result(sheet: &str, sliced: &SlicedSheet) -> SliceResult {
    SliceResult {
        sheet: sheet.to_string(),
        width: sliced.bitmap.width(),
        height: sliced.bitmap.height(),
        rows: sliced.rows,
        columns: sliced.columns,
        cell_width: sliced.cell_width,
        cell_height: sliced.cell_height,
        frames: sliced
            .sub_images
            .iter()
            .map(|sprite| SliceFrame {
                name: sprite.name.clone(),
                rect: sprite.rect,
                pivot: sprite.pivot,
                empty: is_sprite_empty(&sliced.bitmap, sprite),
            })
            .collect(),
    }
}
