//! Owned RGBA raster buffer.
//!
//! The adjustment pipeline operates on [`RasterBuffer`]: a dense, row-major
//! grid of 8-bit RGBA pixels with exclusive ownership of its storage.
//! Cloning a buffer always produces independent storage, which is what lets
//! the pipeline guarantee it never mutates a caller's image.

use thiserror::Error;

/// Bytes per pixel (RGBA, 8 bits per channel).
pub const BYTES_PER_PIXEL: usize = 4;

/// Errors for raster buffer construction and pixel access.
///
/// These are contract violations, not expected runtime conditions: a caller
/// that respects the buffer's dimensions never sees them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    /// Pixel coordinate outside the buffer's dimensions.
    #[error("pixel access out of bounds: ({x}, {y}) in {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Raw byte buffer doesn't match the declared dimensions.
    #[error("invalid dimensions: {width}x{height} requires {expected} bytes, got {actual}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// A single RGBA pixel, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Create a pixel from RGBA channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque pixel from RGB channel values.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// An owned 2D grid of RGBA pixels in row-major order.
///
/// Storage is a flat `Vec<u8>` with 4 bytes per pixel, the same layout the
/// `image` crate uses for `RgbaImage`, so buffers convert to and from codec
/// types without reshuffling.
///
/// # Example
/// ```ignore
/// use tonelab_core::raster::{Pixel, RasterBuffer};
///
/// let mut buf = RasterBuffer::new(2, 2);
/// buf.set_pixel(0, 0, Pixel::opaque(255, 0, 0)).unwrap();
/// assert_eq!(buf.get_pixel(0, 0).unwrap().r, 255);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Create a zero-initialized (transparent black) buffer.
    ///
    /// Zero-sized buffers are valid and hold no pixels.
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    /// Create a buffer from raw RGBA bytes in row-major order.
    ///
    /// Fails with [`RasterError::InvalidDimensions`] if the byte length
    /// doesn't equal `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RasterError> {
        let expected = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(RasterError::InvalidDimensions {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Whether the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Byte offset of the pixel at (x, y), or an out-of-bounds error.
    fn offset(&self, x: u32, y: u32) -> Result<usize, RasterError> {
        if x >= self.width || y >= self.height {
            return Err(RasterError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(((y as usize) * (self.width as usize) + (x as usize)) * BYTES_PER_PIXEL)
    }

    /// Read the pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<Pixel, RasterError> {
        let i = self.offset(x, y)?;
        Ok(Pixel::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    /// Overwrite the pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<(), RasterError> {
        let i = self.offset(x, y)?;
        self.data[i] = pixel.r;
        self.data[i + 1] = pixel.g;
        self.data[i + 2] = pixel.b;
        self.data[i + 3] = pixel.a;
        Ok(())
    }

    /// Raw RGBA bytes in row-major order.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA bytes in row-major order.
    pub(crate) fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its raw RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
