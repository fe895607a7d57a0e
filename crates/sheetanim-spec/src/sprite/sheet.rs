//! Sub-image records produced by grid slicing.

use serde::{Deserialize, Serialize};

/// Default pivot (frame center).
pub const DEFAULT_PIVOT: [f64; 2] = [0.5, 0.5];

/// Pixel rectangle inside a sprite sheet.
///
/// `y` is measured from the *bottom* edge of the sheet, so the visual top row
/// of a grid has the largest `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge in pixels.
    pub x: u32,
    /// Bottom edge in pixels, measured upwards from the bottom of the sheet.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Creates a new rect.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Row index of the rect's top edge in a top-down pixel buffer of the
    /// given height. Returns `None` when the rect does not fit.
    pub fn top_row(&self, sheet_height: u32) -> Option<u32> {
        sheet_height.checked_sub(self.y.checked_add(self.height)?)
    }
}

/// One named cell of a sliced sprite sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubImage {
    /// Name, `{sheet_stem}_r{row}_c{column}` for sliced sheets.
    pub name: String,
    /// Pixel rect (inverted-y convention).
    pub rect: Rect,
    /// Pivot point in normalized coordinates [0-1].
    #[serde(default = "default_pivot")]
    pub pivot: [f64; 2],
}

fn default_pivot() -> [f64; 2] {
    DEFAULT_PIVOT
}

impl SubImage {
    /// Creates a sub-image with the default center pivot.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            pivot: DEFAULT_PIVOT,
        }
    }

    /// Sets the pivot point.
    pub fn with_pivot(mut self, pivot: [f64; 2]) -> Self {
        self.pivot = pivot;
        self
    }

    /// Name used for the cell at `row`/`column` of a sheet.
    pub fn grid_name(sheet_stem: &str, row: u32, column: u32) -> String {
        format!("{}_r{}_c{}", sheet_stem, row, column)
    }
}

/// Returns true if both pivot components lie in [0, 1].
pub fn is_valid_pivot(pivot: [f64; 2]) -> bool {
    pivot
        .iter()
        .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
}
