//! Clip assembly: ordered sub-images to timed keyframes.

use sheetanim_spec::{AnimationClip, BackendError, BindingTarget, CurveBinding, Keyframe, SubImage};
use thiserror::Error;

/// Errors from assembling a clip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// No frames were supplied.
    #[error("clip '{0}' has no frames")]
    EmptyClip(String),
}

impl BackendError for AssembleError {
    fn code(&self) -> &'static str {
        match self {
            AssembleError::EmptyClip(_) => "SPRITE_005",
        }
    }

    fn category(&self) -> &'static str {
        "sprite"
    }
}

/// Builds a clip with one keyframe per frame, frame `i` at `i / 12` seconds.
pub fn assemble_clip<'a, I>(
    name: &str,
    frames: I,
    looping: bool,
    binding: BindingTarget,
) -> Result<AnimationClip, AssembleError>
where
    I: IntoIterator<Item = &'a SubImage>,
{
    let mut clip = AnimationClip::new(name);
    clip.loop_time = looping;
    clip.binding = CurveBinding::sprite(binding);

    let frame_time = clip.frame_time();
    clip.keyframes = frames
        .into_iter()
        .enumerate()
        .map(|(i, sprite)| Keyframe {
            time: i as f32 * frame_time,
            sprite: sprite.clone(),
        })
        .collect();

    if clip.keyframes.is_empty() {
        return Err(AssembleError::EmptyClip(name.to_string()));
    }
    Ok(clip)
}
