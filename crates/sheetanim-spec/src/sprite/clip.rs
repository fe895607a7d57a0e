//! Assembled animation clips.

use serde::{Deserialize, Serialize};

use super::SubImage;

/// Frame rate of every generated clip.
pub const CLIP_FRAME_RATE: f32 = 12.0;

/// File extension of persisted clips.
pub const CLIP_EXTENSION: &str = "anim";

/// Component whose sprite property the clip animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingTarget {
    /// World-space sprite renderer.
    #[default]
    SpriteRenderer,
    /// UI image component.
    Image,
}

impl std::fmt::Display for BindingTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingTarget::SpriteRenderer => write!(f, "sprite_renderer"),
            BindingTarget::Image => write!(f, "image"),
        }
    }
}

/// Curve binding of a sprite clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveBinding {
    /// Animated component.
    pub target: BindingTarget,
    /// Object path relative to the animated root ("" for the root itself).
    #[serde(default)]
    pub path: String,
    /// Animated property.
    pub property: String,
}

impl CurveBinding {
    /// Sprite property binding on the root object.
    pub fn sprite(target: BindingTarget) -> Self {
        Self {
            target,
            path: String::new(),
            property: "m_Sprite".to_string(),
        }
    }
}

impl Default for CurveBinding {
    fn default() -> Self {
        Self::sprite(BindingTarget::default())
    }
}

/// A (time, sprite) keyframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in seconds.
    pub time: f32,
    /// Sprite shown from this time on.
    pub sprite: SubImage,
}

/// A sprite animation clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    /// Clip name.
    pub name: String,
    /// Frames per second.
    pub frame_rate: f32,
    /// Keyframes ordered by strictly increasing time.
    pub keyframes: Vec<Keyframe>,
    /// Loop-time setting.
    #[serde(default)]
    pub loop_time: bool,
    /// Curve binding.
    #[serde(default)]
    pub binding: CurveBinding,
}

impl AnimationClip {
    /// Creates an empty clip at [`CLIP_FRAME_RATE`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frame_rate: CLIP_FRAME_RATE,
            keyframes: Vec::new(),
            loop_time: false,
            binding: CurveBinding::default(),
        }
    }

    /// Duration of one frame in seconds.
    pub fn frame_time(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Clip length in seconds (last keyframe time plus one frame).
    pub fn duration(&self) -> f32 {
        self.keyframes
            .last()
            .map_or(0.0, |k| k.time + self.frame_time())
    }

    /// Checks the keyframe invariants: at least one keyframe, strictly
    /// increasing times.
    pub fn validate(&self) -> Result<(), String> {
        if self.keyframes.is_empty() {
            return Err(format!("clip '{}' has no keyframes", self.name));
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(format!("clip '{}' has invalid frame rate", self.name));
        }
        let mut last = f32::NEG_INFINITY;
        for key in &self.keyframes {
            if !key.time.is_finite() || key.time <= last {
                return Err(format!(
                    "keyframe times must be strictly increasing in clip '{}'",
                    self.name
                ));
            }
            last = key.time;
        }
        Ok(())
    }

    /// Parses a clip from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the clip to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
