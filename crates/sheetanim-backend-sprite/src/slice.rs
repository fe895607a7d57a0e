//! Grid slicing of sprite sheets.
//!
//! A sheet is cut into `rows x columns` equal cells of
//! `floor(width / columns) x floor(height / rows)` pixels. Leftover pixels on
//! the right and bottom edges are not part of any cell. Cells are emitted
//! row-major starting from the visual top row, while each rect's `y` is
//! measured from the bottom of the sheet.

use std::ops::RangeInclusive;
use std::path::Path;

use sheetanim_spec::{is_valid_pivot, BackendError, Rect, SubImage};
use thiserror::Error;

use crate::bitmap::{Bitmap, BitmapError, BitmapSource};

/// Errors from slicing a sheet.
#[derive(Debug, Error)]
pub enum SliceError {
    /// The sheet could not be loaded.
    #[error("invalid sheet '{path}': {source}")]
    InvalidSheet {
        path: String,
        #[source]
        source: BitmapError,
    },

    /// Grid has a zero dimension or yields zero-sized cells.
    #[error("invalid grid {rows}x{columns} for {width}x{height} sheet")]
    InvalidGrid {
        rows: u32,
        columns: u32,
        width: u32,
        height: u32,
    },

    /// Pivot outside the unit square.
    #[error("invalid pivot [{}, {}]: values must be in [0, 1]", .0[0], .0[1])]
    InvalidPivot([f64; 2]),

    /// Slice produced a different number of sub-images than the grid holds.
    #[error("slice produced {actual} sprites, expected {expected}")]
    SliceMismatch { expected: usize, actual: usize },
}

impl BackendError for SliceError {
    fn code(&self) -> &'static str {
        match self {
            SliceError::InvalidSheet { .. } => "SPRITE_001",
            SliceError::InvalidGrid { .. } => "SPRITE_002",
            SliceError::InvalidPivot(_) => "SPRITE_003",
            SliceError::SliceMismatch { .. } => "SPRITE_004",
        }
    }

    fn category(&self) -> &'static str {
        "sprite"
    }
}

/// A sliced sheet: the source bitmap and its grid cells.
#[derive(Debug, Clone)]
pub struct SlicedSheet {
    /// File stem used to name the cells.
    pub stem: String,
    pub bitmap: Bitmap,
    pub rows: u32,
    pub columns: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    /// Cells in row-major order from the top row.
    pub sub_images: Vec<SubImage>,
}

impl SlicedSheet {
    /// Number of cells.
    pub fn frame_count(&self) -> usize {
        self.sub_images.len()
    }

    /// Cells covered by an inclusive range, or `None` if out of bounds.
    pub fn frames(&self, range: RangeInclusive<usize>) -> Option<&[SubImage]> {
        self.sub_images.get(range)
    }
}

/// Returns the file stem of an asset path (`Sprites/hero.png` -> `hero`).
pub fn sheet_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Slices an already loaded bitmap.
pub fn slice_bitmap(
    bitmap: Bitmap,
    stem: &str,
    rows: u32,
    columns: u32,
    pivot: [f64; 2],
) -> Result<SlicedSheet, SliceError> {
    if !is_valid_pivot(pivot) {
        return Err(SliceError::InvalidPivot(pivot));
    }

    let (width, height) = (bitmap.width(), bitmap.height());
    let invalid_grid = || SliceError::InvalidGrid {
        rows,
        columns,
        width,
        height,
    };
    if rows == 0 || columns == 0 {
        return Err(invalid_grid());
    }
    let cell_width = width / columns;
    let cell_height = height / rows;
    if cell_width == 0 || cell_height == 0 {
        return Err(invalid_grid());
    }

    let mut sub_images = Vec::with_capacity(rows as usize * columns as usize);
    for row in 0..rows {
        // Row 0 is the top row; rect y grows upwards from the bottom edge.
        let y = height - (row + 1) * cell_height;
        for column in 0..columns {
            let rect = Rect::new(column * cell_width, y, cell_width, cell_height);
            sub_images.push(
                SubImage::new(SubImage::grid_name(stem, row, column), rect).with_pivot(pivot),
            );
        }
    }

    let expected = rows as usize * columns as usize;
    if sub_images.len() != expected {
        return Err(SliceError::SliceMismatch {
            expected,
            actual: sub_images.len(),
        });
    }

    log::debug!(
        "sliced '{}' ({}x{}) into {}x{} cells of {}x{}",
        stem,
        width,
        height,
        rows,
        columns,
        cell_width,
        cell_height
    );

    Ok(SlicedSheet {
        stem: stem.to_string(),
        bitmap,
        rows,
        columns,
        cell_width,
        cell_height,
        sub_images,
    })
}

/// Loads a sheet from `source` and slices it.
pub fn slice_sheet<S: BitmapSource + ?Sized>(
    source: &S,
    bitmap_path: &str,
    rows: u32,
    columns: u32,
    pivot: [f64; 2],
) -> Result<SlicedSheet, SliceError> {
    let bitmap = source
        .load_bitmap(bitmap_path)
        .map_err(|source| SliceError::InvalidSheet {
            path: bitmap_path.to_string(),
            source,
        })?;
    slice_bitmap(bitmap, &sheet_stem(bitmap_path), rows, columns, pivot)
}
