//! Read-only RGBA8 bitmaps and the sources that load them.

use std::collections::HashMap;
use std::path::PathBuf;

use sheetanim_spec::{BackendError, Rect};
use thiserror::Error;

use crate::png::{self, PngError};

/// Errors from loading bitmaps.
#[derive(Debug, Error)]
pub enum BitmapError {
    /// No bitmap exists at the path.
    #[error("bitmap not found: {0}")]
    NotFound(String),

    /// The bitmap exists but could not be decoded.
    #[error("failed to decode bitmap '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: PngError,
    },

    /// Pixel buffer does not match the stated dimensions.
    #[error("invalid bitmap dimensions: {0}")]
    InvalidDimensions(String),
}

impl BackendError for BitmapError {
    fn code(&self) -> &'static str {
        match self {
            BitmapError::NotFound(_) => "BITMAP_001",
            BitmapError::Decode { .. } => "BITMAP_002",
            BitmapError::InvalidDimensions(_) => "BITMAP_003",
        }
    }

    fn category(&self) -> &'static str {
        "bitmap"
    }
}

/// An RGBA8 pixel buffer, rows stored top-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wraps an RGBA8 buffer; its length must be `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BitmapError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(BitmapError::InvalidDimensions(format!(
                "expected {} bytes for {}x{}, got {}",
                expected,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a bitmap filled with a single color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decodes PNG bytes.
    pub fn from_png_bytes(data: &[u8]) -> Result<Self, PngError> {
        let image = png::decode_rgba(data)?;
        Ok(Self {
            width: image.width,
            height: image.height,
            pixels: image.data,
        })
    }

    /// Encodes the bitmap as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, PngError> {
        png::encode_rgba(self.width, self.height, &self.pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixels.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    /// Pixel at `(x, y)`, `y` counted from the top.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Sets the pixel at `(x, y)`, `y` counted from the top. Out-of-bounds
    /// writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&rgba);
        }
    }

    /// Fills a top-down rectangle, clipped to the bitmap.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: [u8; 4]) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.set_pixel(px, py, rgba);
            }
        }
    }

    /// Alpha values covered by a rect in inverted-y (bottom-up) convention.
    ///
    /// The part of the rect outside the bitmap is dropped.
    pub fn alpha_grid(&self, rect: &Rect) -> AlphaGrid {
        let x_end = rect.x.saturating_add(rect.width).min(self.width);
        let width = x_end.saturating_sub(rect.x);

        // Rect rows are measured from the bottom; convert to top-down rows.
        let top = self
            .height
            .saturating_sub(rect.y.saturating_add(rect.height));
        let bottom = self.height.saturating_sub(rect.y);
        let height = bottom.saturating_sub(top);

        let mut alpha = Vec::with_capacity(width as usize * height as usize);
        for y in top..bottom {
            for x in rect.x..x_end {
                if let Some(i) = self.offset(x, y) {
                    alpha.push(self.pixels[i + 3]);
                }
            }
        }

        AlphaGrid {
            width,
            height,
            alpha,
        }
    }
}

/// Alpha channel of a bitmap region, top-down rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaGrid {
    pub width: u32,
    pub height: u32,
    pub alpha: Vec<u8>,
}

impl AlphaGrid {
    /// Alpha at `(x, y)` within the region.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.alpha
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Returns true if every alpha value is zero.
    pub fn is_fully_transparent(&self) -> bool {
        self.alpha.iter().all(|&a| a == 0)
    }

    /// Number of pixels with non-zero alpha.
    pub fn opaque_count(&self) -> usize {
        self.alpha.iter().filter(|&&a| a != 0).count()
    }
}

/// Loads bitmaps by asset path.
pub trait BitmapSource {
    fn load_bitmap(&self, path: &str) -> Result<Bitmap, BitmapError>;
}

/// Loads PNG files relative to an asset root.
#[derive(Debug, Clone)]
pub struct FsBitmapSource {
    root: PathBuf,
}

impl FsBitmapSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl BitmapSource for FsBitmapSource {
    fn load_bitmap(&self, path: &str) -> Result<Bitmap, BitmapError> {
        let full = self.resolve(path);
        if !full.is_file() {
            return Err(BitmapError::NotFound(path.to_string()));
        }
        let image = png::read_rgba(&full).map_err(|source| BitmapError::Decode {
            path: path.to_string(),
            source,
        })?;
        log::debug!(
            "loaded bitmap '{}' ({}x{})",
            path,
            image.width,
            image.height
        );
        Bitmap::new(image.width, image.height, image.data)
    }
}

/// In-memory bitmaps keyed by asset path.
#[derive(Debug, Clone, Default)]
pub struct MemoryBitmapSource {
    bitmaps: HashMap<String, Bitmap>,
}

impl MemoryBitmapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bitmap: Bitmap) {
        self.bitmaps.insert(path.into(), bitmap);
    }
}

impl BitmapSource for MemoryBitmapSource {
    fn load_bitmap(&self, path: &str) -> Result<Bitmap, BitmapError> {
        self.bitmaps
            .get(path)
            .cloned()
            .ok_or_else(|| BitmapError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: [u8; 4] = [0, 0, 0, 0];
    const RED: [u8; 4] = [255, 0, 0, 255];

    #[test]
    fn new_checks_length() {
        assert!(Bitmap::new(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            Bitmap::new(2, 2, vec![0; 15]),
            Err(BitmapError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn alpha_grid_uses_bottom_up_rects() {
        // 2x4 bitmap, only the top row opaque.
        let mut bitmap = Bitmap::filled(2, 4, CLEAR);
        bitmap.fill_rect(0, 0, 2, 1, RED);

        // Top row in inverted-y is y = 3.
        let top = bitmap.alpha_grid(&Rect::new(0, 3, 2, 1));
        assert_eq!(top.alpha, vec![255, 255]);
        assert!(!top.is_fully_transparent());

        let bottom = bitmap.alpha_grid(&Rect::new(0, 0, 2, 1));
        assert!(bottom.is_fully_transparent());
    }

    #[test]
    fn alpha_grid_clips_to_bitmap() {
        let bitmap = Bitmap::filled(4, 4, RED);
        let grid = bitmap.alpha_grid(&Rect::new(2, 2, 4, 4));
        assert_eq!((grid.width, grid.height), (2, 2));
        assert_eq!(grid.opaque_count(), 4);
        assert_eq!(grid.get(1, 1), Some(255));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn png_bytes_roundtrip_preserves_pixels() {
        let mut bitmap = Bitmap::filled(3, 2, CLEAR);
        bitmap.set_pixel(2, 1, RED);
        let bytes = bitmap.to_png_bytes().unwrap();
        let decoded = Bitmap::from_png_bytes(&bytes).unwrap();
        assert_eq!(decoded, bitmap);
        assert_eq!(decoded.pixel(2, 1), Some(RED));
    }

    #[test]
    fn fs_source_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsBitmapSource::new(dir.path());
        let err = source.load_bitmap("Sprites/missing.png").unwrap_err();
        assert!(matches!(err, BitmapError::NotFound(_)));
        assert_eq!(err.code(), "BITMAP_001");
    }

    #[test]
    fn fs_source_decodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let bitmap = Bitmap::filled(4, 2, RED);
        std::fs::write(dir.path().join("sheet.png"), bitmap.to_png_bytes().unwrap()).unwrap();

        let loaded = FsBitmapSource::new(dir.path()).load_bitmap("sheet.png").unwrap();
        assert_eq!(loaded, bitmap);
    }

    #[test]
    fn fs_source_reports_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.png"), b"garbage").unwrap();
        let err = FsBitmapSource::new(dir.path())
            .load_bitmap("bad.png")
            .unwrap_err();
        assert!(matches!(err, BitmapError::Decode { .. }));
    }
}
