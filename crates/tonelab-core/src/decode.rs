//! Image decoding glue.
//!
//! Decodes JPEG, PNG, and GIF bytes into a [`RasterBuffer`] via the `image`
//! crate. The pipeline itself never does I/O; this module is the boundary
//! where encoded files become the RGBA rasters the stages operate on.

use image::ImageFormat;
use thiserror::Error;

use crate::raster::RasterBuffer;

/// Errors that can occur while decoding an image file.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes don't look like any supported image format.
    #[error("invalid or unsupported image format")]
    InvalidFormat,

    /// The format was recognized but the data couldn't be decoded.
    #[error("failed to decode image: {0}")]
    CorruptedFile(String),
}

/// Decode JPEG, PNG, or GIF bytes into an RGBA raster.
///
/// The format is sniffed from the content, not from a file name. Images in
/// other color models (grayscale, paletted, RGB without alpha) are expanded
/// to RGBA; fully opaque sources get alpha 255 everywhere.
pub fn decode_image(bytes: &[u8]) -> Result<RasterBuffer, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    if !matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif
    ) {
        return Err(DecodeError::InvalidFormat);
    }

    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    // The image crate guarantees the raw buffer length matches dimensions
    RasterBuffer::from_raw(width, height, rgba.into_raw())
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}
