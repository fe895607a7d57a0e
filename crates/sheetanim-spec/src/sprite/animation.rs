//! Animation specs: named frame ranges into a flattened sub-image sequence.
//!
//! Specs come from one of two builders that produce the same shape:
//! [`build_animation_specs_automatic`] (one spec per sheet row) and
//! [`build_animation_specs_manual`] (1-based inclusive frame ranges).

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::SkipReason;

/// Inclusive, 0-based frame range.
///
/// Signed so that out-of-range manual input survives until validation and is
/// reported instead of silently clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRange {
    /// First frame (0-based, inclusive).
    pub start: i64,
    /// Last frame (0-based, inclusive).
    pub end: i64,
}

impl FrameRange {
    /// Creates a new inclusive range.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Range covering `count` frames starting at `start`.
    pub fn from_start_count(start: usize, count: usize) -> Self {
        Self {
            start: start as i64,
            end: start as i64 + count as i64 - 1,
        }
    }

    /// Number of frames in the range (0 when out of order).
    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            self.end.abs_diff(self.start).saturating_add(1) as usize
        }
    }

    /// Returns true if the range holds no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks `0 <= start <= end < frame_count` and returns the usable range.
    pub fn resolve(&self, frame_count: usize) -> Result<RangeInclusive<usize>, SkipReason> {
        if self.start < 0 {
            return Err(SkipReason::RangeOutOfBounds);
        }
        if self.end < self.start {
            return Err(SkipReason::RangeOutOfOrder);
        }
        if self.end as u64 >= frame_count as u64 {
            return Err(SkipReason::RangeExceedsFrameCount);
        }
        Ok(self.start as usize..=self.end as usize)
    }
}

impl std::fmt::Display for FrameRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// A named animation to generate from a sliced sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSpec {
    /// Clip and state name.
    pub name: String,
    /// Frames to use from the flattened sub-image sequence.
    pub frames: FrameRange,
    /// Whether the clip loops.
    #[serde(default, rename = "loop")]
    pub looping: bool,
}

impl AnimationSpec {
    /// Creates a new spec.
    pub fn new(name: impl Into<String>, frames: FrameRange, looping: bool) -> Self {
        Self {
            name: name.into(),
            frames,
            looping,
        }
    }

    /// Spec covering every frame of a sheet (multi-sheet batches).
    pub fn whole_sheet(name: impl Into<String>, frame_count: usize, looping: bool) -> Self {
        Self::new(name, FrameRange::from_start_count(0, frame_count), looping)
    }

    /// Validates the name and frame range against `frame_count`.
    pub fn resolve(&self, frame_count: usize) -> Result<RangeInclusive<usize>, SkipReason> {
        if self.name.trim().is_empty() {
            return Err(SkipReason::InvalidName);
        }
        self.frames.resolve(frame_count)
    }
}

/// A row animation in automatic mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomaticAnimation {
    /// Animation name for this row.
    pub name: String,
    /// Whether the clip loops.
    #[serde(default, rename = "loop")]
    pub looping: bool,
}

impl AutomaticAnimation {
    pub fn new(name: impl Into<String>, looping: bool) -> Self {
        Self {
            name: name.into(),
            looping,
        }
    }
}

/// A manually defined animation with 1-based inclusive frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualAnimation {
    /// Animation name.
    pub name: String,
    /// First frame, 1-based.
    pub start_frame: i64,
    /// Last frame, 1-based, inclusive.
    pub end_frame: i64,
    /// Whether the clip loops.
    #[serde(default, rename = "loop")]
    pub looping: bool,
}

impl ManualAnimation {
    /// Creates a manual animation entry.
    pub fn new(name: impl Into<String>, start_frame: i64, end_frame: i64, looping: bool) -> Self {
        Self {
            name: name.into(),
            start_frame,
            end_frame,
            looping,
        }
    }
}

/// Builds one spec per sheet row.
///
/// Row `i` covers frames `i * columns ..= i * columns + columns - 1`. Loop
/// flags are index-aligned with `names`; missing flags default to `false`.
/// Empty names are kept so that generation reports them.
pub fn build_animation_specs_automatic<S: AsRef<str>>(
    names: &[S],
    loop_flags: &[bool],
    columns: u32,
) -> Vec<AnimationSpec> {
    let columns = columns as usize;
    names
        .iter()
        .enumerate()
        .map(|(row, name)| {
            AnimationSpec::new(
                name.as_ref(),
                FrameRange::from_start_count(row * columns, columns),
                loop_flags.get(row).copied().unwrap_or(false),
            )
        })
        .collect()
}

/// Builds specs from 1-based inclusive frame ranges.
pub fn build_animation_specs_manual(entries: &[ManualAnimation]) -> Vec<AnimationSpec> {
    entries
        .iter()
        .map(|entry| {
            AnimationSpec::new(
                entry.name.clone(),
                FrameRange::new(
                    entry.start_frame.saturating_sub(1),
                    entry.end_frame.saturating_sub(1),
                ),
                entry.looping,
            )
        })
        .collect()
}
