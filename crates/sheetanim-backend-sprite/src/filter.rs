//! Empty-frame detection.

use sheetanim_spec::SubImage;

use crate::bitmap::Bitmap;

/// Returns true if every pixel of the sprite's rect has zero alpha.
pub fn is_sprite_empty(bitmap: &Bitmap, sprite: &SubImage) -> bool {
    bitmap.alpha_grid(&sprite.rect).is_fully_transparent()
}

/// Drops empty frames, keeping the survivors in order.
pub fn filter_empty_frames(bitmap: &Bitmap, frames: &[SubImage]) -> Vec<SubImage> {
    frames
        .iter()
        .filter(|frame| {
            let empty = is_sprite_empty(bitmap, frame);
            if empty {
                log::debug!("dropping empty frame '{}'", frame.name);
            }
            !empty
        })
        .cloned()
        .collect()
}
