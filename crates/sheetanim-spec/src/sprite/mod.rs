//! Sprite types: sliced sub-images, animation specs and assembled clips.
//!
//! - [`SubImage`] - one grid cell of a sprite sheet with its pixel rect and pivot
//! - [`AnimationSpec`] - a named frame range into the flattened sub-image sequence
//! - [`AnimationClip`] - timed sprite keyframes at a fixed frame rate

mod animation;
mod clip;
mod sheet;

pub use animation::*;
pub use clip::*;
pub use sheet::*;
