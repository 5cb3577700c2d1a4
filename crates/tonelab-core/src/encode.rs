//! PNG encoding for export.
//!
//! Edited rasters are written back out as PNG, the `image` crate's encoder
//! writing into an in-memory buffer. PNG is lossless, so an encode/decode
//! round trip reproduces the raster exactly, alpha included.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::raster::RasterBuffer;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an RGBA raster to PNG bytes.
pub fn encode_png(buffer: &RasterBuffer) -> Result<Vec<u8>, EncodeError> {
    if buffer.is_empty() {
        return Err(EncodeError::InvalidDimensions {
            width: buffer.width(),
            height: buffer.height(),
        });
    }

    let mut out = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut out);
    encoder
        .write_image(
            buffer.as_raw(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}
