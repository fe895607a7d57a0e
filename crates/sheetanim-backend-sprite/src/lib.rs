//! sheetanim Sprite Backend
//!
//! This crate does the pixel work of a generation run: it decodes sprite-sheet
//! PNGs, slices them into grid cells, drops fully transparent cells and
//! assembles the survivors into 12 fps sprite clips.
//!
//! # Example
//!
//! ```
//! use sheetanim_backend_sprite::{assemble_clip, filter_empty_frames, slice_bitmap, Bitmap};
//! use sheetanim_spec::BindingTarget;
//!
//! let mut bitmap = Bitmap::filled(32, 16, [0, 0, 0, 0]);
//! bitmap.fill_rect(0, 0, 16, 16, [255, 255, 255, 255]);
//!
//! let sheet = slice_bitmap(bitmap, "hero", 1, 2, [0.5, 0.5]).unwrap();
//! let frames = filter_empty_frames(&sheet.bitmap, &sheet.sub_images);
//! let clip = assemble_clip("idle", &frames, true, BindingTarget::SpriteRenderer).unwrap();
//! assert_eq!(clip.keyframes.len(), 1);
//! ```

pub mod assemble;
pub mod bitmap;
pub mod filter;
pub mod png;
pub mod slice;

pub use crate::assemble::{assemble_clip, AssembleError};
pub use crate::bitmap::{
    AlphaGrid, Bitmap, BitmapError, BitmapSource, FsBitmapSource, MemoryBitmapSource,
};
pub use crate::filter::{filter_empty_frames, is_sprite_empty};
pub use crate::png::PngError;
pub use crate::slice::{sheet_stem, slice_bitmap, slice_sheet, SliceError, SlicedSheet};
