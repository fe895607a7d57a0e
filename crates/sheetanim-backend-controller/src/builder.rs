//! State-machine builder.
//!
//! Creates or opens a controller, then turns animation specs into saved clips
//! and states on the controller's first layer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sheetanim_backend_sprite::{assemble_clip, filter_empty_frames, SlicedSheet};
use sheetanim_spec::{
    AnimationClip, AnimationSpec, BindingTarget, ClipOutput, Controller, GenerationReport,
    SkipReason, CLIP_EXTENSION, CONTROLLER_EXTENSION,
};

use crate::error::ControllerError;
use crate::paths;
use crate::store::AssetStore;

/// Options for clip and state generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Drop fully transparent frames before assembling.
    pub filter_empty: bool,
    /// Component the clips animate.
    pub binding: BindingTarget,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            filter_empty: true,
            binding: BindingTarget::default(),
        }
    }
}

/// A controller ready to receive states.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedController {
    pub controller: Controller,
    /// Asset path of the controller.
    pub path: String,
    /// Directory generated clips are saved to.
    pub save_dir: String,
}

/// Creates `{directory}/{name}.controller`, or
/// `{directory}/{name}/{name}.controller` with `create_subfolder`. Clips are
/// saved next to the controller.
pub fn prepare_new_controller<S: AssetStore + ?Sized>(
    store: &mut S,
    directory: &str,
    name: &str,
    create_subfolder: bool,
) -> Result<PreparedController, ControllerError> {
    let save_dir = if create_subfolder {
        paths::join(directory, name)
    } else {
        directory.trim_end_matches('/').to_string()
    };
    store.create_directory(&save_dir)?;

    let path = paths::join(&save_dir, &format!("{}.{}", name, CONTROLLER_EXTENSION));
    let controller = store.create_controller(&path)?;
    Ok(PreparedController {
        controller,
        path,
        save_dir,
    })
}

/// Opens an existing controller. Clips go to `save_path` when given,
/// otherwise to the controller's own directory.
pub fn prepare_existing_controller<S: AssetStore + ?Sized>(
    store: &mut S,
    path: &str,
    save_path: Option<&str>,
) -> Result<PreparedController, ControllerError> {
    if !store.exists(path) {
        return Err(ControllerError::MissingController(path.to_string()));
    }
    let controller = store.load_controller(path)?;
    let save_dir = resolve_save_directory(path, save_path);
    store.create_directory(&save_dir)?;
    Ok(PreparedController {
        controller,
        path: path.to_string(),
        save_dir,
    })
}

/// Clip directory for an existing controller.
pub fn resolve_save_directory(controller_path: &str, save_path: Option<&str>) -> String {
    match save_path {
        Some(dir) if !dir.trim().is_empty() => dir.trim_end_matches('/').to_string(),
        _ => paths::parent(controller_path).to_string(),
    }
}

/// Hex BLAKE3 hash of a clip's serialized form.
pub fn clip_hash(clip: &AnimationClip) -> Result<String, serde_json::Error> {
    let json = clip.to_json_pretty()?;
    Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
}

/// Assembles, saves and binds one clip per valid spec.
///
/// Invalid specs are skipped with a reason and the batch continues. Each
/// created state lands on layer 0 with its motion set to the saved clip path.
/// Only store failures and a layerless controller are fatal.
pub fn generate_clips_and_states<S: AssetStore + ?Sized>(
    specs: &[AnimationSpec],
    sheet: &SlicedSheet,
    controller: &mut Controller,
    save_dir: &str,
    options: &GenerateOptions,
    store: &mut S,
) -> Result<GenerationReport, ControllerError> {
    let mut report = GenerationReport::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let frame_count = sheet.frame_count();

    for spec in specs {
        let range = match spec.resolve(frame_count) {
            Ok(range) => range,
            Err(reason) => {
                let detail = match reason {
                    SkipReason::InvalidName => String::new(),
                    _ => format!("frames {} of {}", spec.frames, frame_count),
                };
                log::warn!("skipping animation '{}': {}", spec.name, reason);
                report.skip(&spec.name, reason, detail);
                continue;
            }
        };

        if !paths::is_safe_file_name(&spec.name) {
            log::warn!("skipping animation '{}': unsafe clip file name", spec.name);
            report.skip(
                &spec.name,
                SkipReason::InvalidName,
                "name must be a single path segment",
            );
            continue;
        }

        let taken = controller.base_state_machine()?.has_state(&spec.name);
        if taken || !seen.insert(spec.name.as_str()) {
            log::warn!("skipping animation '{}': duplicate name", spec.name);
            report.skip(&spec.name, SkipReason::DuplicateName, "");
            continue;
        }

        let Some(frames) = sheet.frames(range) else {
            report.skip(&spec.name, SkipReason::RangeExceedsFrameCount, "");
            continue;
        };
        let frames = if options.filter_empty {
            filter_empty_frames(&sheet.bitmap, frames)
        } else {
            frames.to_vec()
        };

        let clip = match assemble_clip(&spec.name, &frames, spec.looping, options.binding) {
            Ok(clip) => clip,
            Err(err) => {
                log::warn!("skipping animation '{}': {}", spec.name, err);
                report.skip(&spec.name, SkipReason::EmptyClip, "");
                continue;
            }
        };

        let requested = paths::join(save_dir, &format!("{}.{}", spec.name, CLIP_EXTENSION));
        let path = store.save_clip(&clip, &requested)?;
        let hash = clip_hash(&clip).map_err(|source| ControllerError::Hash {
            name: spec.name.clone(),
            source,
        })?;

        let state = controller.base_state_machine_mut()?.add_state(&spec.name)?;
        state.motion = Some(path.clone());

        log::info!(
            "created state '{}' with {} keyframe(s) -> {}",
            spec.name,
            clip.keyframes.len(),
            path
        );
        report.created += 1;
        report.clips.push(ClipOutput {
            name: spec.name.clone(),
            path,
            keyframes: clip.keyframes.len(),
            hash,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests;
