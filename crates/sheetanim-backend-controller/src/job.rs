//! Runs a complete generation job.
//!
//! The flow for a job is:
//! 1. Validate the job
//! 2. Slice the sheet (single-sheet jobs fail here if the sheet is unusable)
//! 3. Create or open the controller
//! 4. Generate clips and states
//! 5. Apply the template, if any
//! 6. Save the controller and flush the store
//!
//! The template is applied after generation so that a full template import
//! wires its transitions to the freshly created states instead of creating
//! empty placeholders that would collide with them.

use sheetanim_backend_sprite::{slice_sheet, BitmapSource, SliceError, SlicedSheet};
use sheetanim_spec::{
    validate_job, AnimationSpec, Controller, ControllerTarget, ErrorCode, GenerationJob,
    GenerationReport, MultiSheetEntry, SheetSource, SkipReason,
};

use crate::builder::{
    generate_clips_and_states, prepare_existing_controller, prepare_new_controller,
    GenerateOptions, PreparedController,
};
use crate::error::ControllerError;
use crate::store::AssetStore;
use crate::template::seed_from_template;

/// Runs `job` against `store`, loading sheets from `bitmaps`.
pub fn run_job<S, B>(
    job: &GenerationJob,
    store: &mut S,
    bitmaps: &B,
) -> Result<GenerationReport, ControllerError>
where
    S: AssetStore + ?Sized,
    B: BitmapSource + ?Sized,
{
    check_job(job)?;

    let options = GenerateOptions {
        filter_empty: job.filter_empty,
        binding: job.binding,
    };

    // Slice before touching the store so a bad sheet leaves nothing behind.
    let sheets = match &job.sheets {
        SheetSource::Single(sheet) => Sheets::Single {
            specs: sheet.animation_specs(),
            sliced: slice_sheet(bitmaps, &sheet.sheet, sheet.rows, sheet.columns, sheet.pivot)?,
        },
        SheetSource::Multiple { entries } => Sheets::Multiple(entries),
    };

    let template = match &job.template {
        Some(template) => {
            if !store.exists(&template.path) {
                return Err(ControllerError::MissingController(template.path.clone()));
            }
            Some((store.load_controller(&template.path)?, template.mode))
        }
        None => None,
    };

    let PreparedController {
        mut controller,
        path,
        save_dir,
    } = match &job.controller {
        ControllerTarget::New {
            directory,
            name,
            create_subfolder,
        } => prepare_new_controller(store, directory, name, *create_subfolder)?,
        ControllerTarget::Existing { path, save_path } => {
            prepare_existing_controller(store, path, save_path.as_deref())?
        }
    };

    let mut report = match sheets {
        Sheets::Single { specs, sliced } => {
            generate_clips_and_states(&specs, &sliced, &mut controller, &save_dir, &options, store)?
        }
        Sheets::Multiple(entries) => {
            generate_batch(entries, bitmaps, &mut controller, &save_dir, &options, store)?
        }
    };

    if let Some((template, mode)) = template {
        report.template = Some(seed_from_template(&mut controller, &template, mode));
    }

    store.save_controller(&path, &controller)?;
    store.save_all()?;

    log::info!(
        "{} state(s) added to {}, {} skipped",
        report.created,
        path,
        report.skipped.len()
    );
    report.controller_path = Some(path);
    Ok(report)
}

enum Sheets<'a> {
    Single {
        specs: Vec<AnimationSpec>,
        sliced: SlicedSheet,
    },
    Multiple(&'a [MultiSheetEntry]),
}

/// One clip per batch entry, covering every frame of its sheet. Unusable
/// sheets are skipped.
fn generate_batch<S, B>(
    entries: &[MultiSheetEntry],
    bitmaps: &B,
    controller: &mut Controller,
    save_dir: &str,
    options: &GenerateOptions,
    store: &mut S,
) -> Result<GenerationReport, ControllerError>
where
    S: AssetStore + ?Sized,
    B: BitmapSource + ?Sized,
{
    let mut report = GenerationReport::default();
    for entry in entries {
        let sliced = match slice_sheet(
            bitmaps,
            &entry.sheet,
            entry.rows,
            entry.columns,
            entry.pivot,
        ) {
            Ok(sliced) => sliced,
            Err(err) => {
                let reason = match err {
                    SliceError::InvalidSheet { .. } => SkipReason::SheetUnavailable,
                    _ => SkipReason::SliceMismatch,
                };
                log::warn!("skipping sheet '{}': {}", entry.sheet, err);
                report.skip(&entry.name, reason, err.to_string());
                continue;
            }
        };
        let specs = [AnimationSpec::whole_sheet(
            entry.name.as_str(),
            sliced.frame_count(),
            entry.looping,
        )];
        report.merge(generate_clips_and_states(
            &specs,
            &sliced,
            controller,
            save_dir,
            options,
            store,
        )?);
    }
    Ok(report)
}

/// Validation errors become a single fatal error; an empty batch gets its own.
fn check_job(job: &GenerationJob) -> Result<(), ControllerError> {
    let result = validate_job(job);
    for warning in &result.warnings {
        log::warn!("{}", warning);
    }
    if result.is_ok() {
        return Ok(());
    }
    if result
        .errors
        .iter()
        .any(|e| e.code == ErrorCode::NoAnimations)
    {
        return Err(ControllerError::NoAnimations);
    }
    let messages: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
    Err(ControllerError::InvalidJob(messages.join("; ")))
}
