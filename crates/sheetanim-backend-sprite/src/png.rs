//! PNG decoding to RGBA8, plus a matching encoder.
//!
//! Every color type and bit depth the `png` crate understands is normalized to
//! 8-bit RGBA, top-down rows, so the rest of the crate only deals with one
//! pixel layout.

use std::io::{Read, Write};
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Decoder, Encoder, FilterType, Transformations};
use thiserror::Error;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Unsupported pixel format: {0}")]
    UnsupportedFormat(String),
}

/// A decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    /// Row-major, top-down, 4 bytes per pixel.
    pub data: Vec<u8>,
}

/// Decodes PNG bytes into RGBA8.
pub fn decode_rgba(data: &[u8]) -> Result<RgbaImage, PngError> {
    decode_rgba_from_reader(std::io::Cursor::new(data))
}

/// Reads and decodes a PNG file into RGBA8.
pub fn read_rgba(path: &Path) -> Result<RgbaImage, PngError> {
    let file = std::fs::File::open(path)?;
    decode_rgba_from_reader(std::io::BufReader::new(file))
}

/// Decodes a PNG stream into RGBA8.
pub fn decode_rgba_from_reader<R: Read>(reader: R) -> Result<RgbaImage, PngError> {
    let mut decoder = Decoder::new(reader);
    // Expand palettes and low bit depths, strip 16-bit channels.
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != BitDepth::Eight {
        return Err(PngError::UnsupportedFormat(format!(
            "bit depth {:?} after normalization",
            info.bit_depth
        )));
    }

    let pixel_count = info.width as usize * info.height as usize;
    let data = match info.color_type {
        ColorType::Rgba => buf,
        ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        ColorType::Indexed => {
            return Err(PngError::UnsupportedFormat(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    if data.len() != pixel_count * 4 {
        return Err(PngError::InvalidDimensions(format!(
            "expected {} bytes for {}x{} RGBA, got {}",
            pixel_count * 4,
            info.width,
            info.height,
            data.len()
        )));
    }

    Ok(RgbaImage {
        width: info.width,
        height: info.height,
        data,
    })
}

/// Encodes RGBA8 pixels as PNG into any writer.
pub fn write_rgba_to_writer<W: Write>(
    width: u32,
    height: u32,
    data: &[u8],
    writer: W,
) -> Result<(), PngError> {
    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
        return Err(PngError::InvalidDimensions(format!(
            "expected {} bytes for {}x{} RGBA, got {}",
            expected,
            width,
            height,
            data.len()
        )));
    }

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(Compression::Default);
    encoder.set_filter(FilterType::NoFilter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(data)?;
    Ok(())
}

/// Encodes RGBA8 pixels as PNG bytes.
pub fn encode_rgba(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, PngError> {
    let mut out = Vec::new();
    write_rgba_to_writer(width, height, data, &mut out)?;
    Ok(out)
}
