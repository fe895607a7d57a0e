//! Synthetic sprite sheets for end-to-end tests.

use std::fs;
use std::path::Path;

use sheetanim_backend_sprite::Bitmap;

/// Side length of every cell produced by [`grid_sheet`].
pub const CELL_SIZE: u32 = 4;

pub const OPAQUE: [u8; 4] = [255, 255, 255, 255];
pub const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Builds a `rows` x `columns` sheet of [`CELL_SIZE`] cells.
///
/// Cells are numbered row-major from the top-left, starting at 0. Every cell
/// is opaque except the ones listed in `empty`, which stay fully transparent.
pub fn grid_sheet(rows: u32, columns: u32, empty: &[usize]) -> Bitmap {
    let mut bitmap = Bitmap::filled(columns * CELL_SIZE, rows * CELL_SIZE, TRANSPARENT);
    for index in 0..(rows * columns) as usize {
        if empty.contains(&index) {
            continue;
        }
        let row = index as u32 / columns;
        let column = index as u32 % columns;
        bitmap.fill_rect(
            column * CELL_SIZE,
            row * CELL_SIZE,
            CELL_SIZE,
            CELL_SIZE,
            OPAQUE,
        );
    }
    bitmap
}

/// Writes an opaque 8-bit RGB PNG (no alpha channel) to `path`.
pub fn write_rgb_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create sheet directory");
    }
    let file = fs::File::create(path).expect("Failed to create PNG file");
    let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().expect("Failed to write PNG header");
    let data = vec![128u8; (width * height * 3) as usize];
    writer
        .write_image_data(&data)
        .expect("Failed to write PNG data");
}
