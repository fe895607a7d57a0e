//! Generation job validation.
//!
//! Structural problems (zero grid, bad pivot, missing paths) are errors.
//! Per-animation problems such as empty names or bad ranges are not checked
//! here; they surface as skips when the job runs. The same goes for a batch
//! entry without a sheet, which is skipped like any unloadable sheet.

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::job::{AnimationDefinitions, ControllerTarget, GenerationJob, SheetSource};
use crate::sprite::is_valid_pivot;

/// Validates a generation job.
pub fn validate_job(job: &GenerationJob) -> ValidationResult {
    let mut result = ValidationResult::success();

    validate_controller_target(&job.controller, &mut result);

    if let Some(template) = &job.template {
        if template.path.trim().is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidTemplate,
                "template path cannot be empty",
                "template.path",
            ));
        }
    }

    match &job.sheets {
        SheetSource::Single(sheet) => {
            if sheet.sheet.trim().is_empty() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::MissingSheet,
                    "sheet path cannot be empty",
                    "sheets.sheet",
                ));
            }
            validate_grid(sheet.rows, sheet.columns, sheet.pivot, "sheets", &mut result);

            if sheet.animations.is_empty() {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::EmptyAnimationList,
                    "no animations defined; nothing will be generated",
                    "sheets.animations",
                ));
            }

            if let AnimationDefinitions::Automatic(rows) = &sheet.animations {
                if rows.len() > sheet.rows as usize {
                    result.add_warning(ValidationWarning::with_path(
                        WarningCode::ExtraAnimationNames,
                        format!(
                            "{} automatic animations but only {} row(s); extra names will be skipped",
                            rows.len(),
                            sheet.rows
                        ),
                        "sheets.animations.automatic",
                    ));
                }
            }
        }
        SheetSource::Multiple { entries } => {
            if entries.is_empty() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::NoAnimations,
                    "multi-sheet batch has no entries",
                    "sheets.entries",
                ));
            }
            for (i, entry) in entries.iter().enumerate() {
                validate_grid(
                    entry.rows,
                    entry.columns,
                    entry.pivot,
                    &format!("sheets.entries[{}]", i),
                    &mut result,
                );
            }
        }
    }

    result
}

fn validate_controller_target(target: &ControllerTarget, result: &mut ValidationResult) {
    match target {
        ControllerTarget::New { name, .. } => {
            if name.trim().is_empty() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidControllerTarget,
                    "controller name cannot be empty",
                    "controller.name",
                ));
            }
        }
        ControllerTarget::Existing { path, .. } => {
            if path.trim().is_empty() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidControllerTarget,
                    "controller path cannot be empty",
                    "controller.path",
                ));
            }
        }
    }
}

fn validate_grid(
    rows: u32,
    columns: u32,
    pivot: [f64; 2],
    prefix: &str,
    result: &mut ValidationResult,
) {
    if rows == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidGrid,
            "rows must be at least 1",
            format!("{}.rows", prefix),
        ));
    }
    if columns == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidGrid,
            "columns must be at least 1",
            format!("{}.columns", prefix),
        ));
    }
    if !is_valid_pivot(pivot) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidPivot,
            format!("pivot [{}, {}] must lie within [0, 1]", pivot[0], pivot[1]),
            format!("{}.pivot", prefix),
        ));
    }
}
