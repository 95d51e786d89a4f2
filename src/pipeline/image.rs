//! Decoded Image Module
//!
//! The payload the image pipeline hands to the cache.

use std::sync::Arc;

use crate::error::{CacheError, Result};
use crate::pipeline::ByteSizer;

// == Pixel Format ==
/// In-memory pixel layout of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single 8-bit alpha channel
    Alpha8,
    /// 5-6-5 packed RGB
    Rgb565,
    /// 4 bits per channel ARGB
    Argb4444,
    /// 8 bits per channel ARGB
    Argb8888,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Alpha8 => 1,
            PixelFormat::Rgb565 | PixelFormat::Argb4444 => 2,
            PixelFormat::Argb8888 => 4,
        }
    }
}

// == Decoded Image ==
/// A decoded bitmap. Cloning shares the pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Arc<[u8]>,
}

impl DecodedImage {
    /// Allocates a zeroed image of the given dimensions.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let len = pixel_bytes(width, height, format);
        Self {
            width,
            height,
            format,
            pixels: vec![0u8; len].into(),
        }
    }

    /// Wraps an existing pixel buffer.
    ///
    /// The buffer may be larger than the image needs (row padding, reused
    /// allocations) but not smaller.
    pub fn from_pixels(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Result<Self> {
        let needed = pixel_bytes(width, height, format);
        if pixels.len() < needed {
            return Err(CacheError::invalid(format!(
                "pixel buffer of {} bytes is too small for a {}x{} {:?} image ({} bytes)",
                pixels.len(),
                width,
                height,
                format,
                needed
            )));
        }

        Ok(Self {
            width,
            height,
            format,
            pixels: pixels.into(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes needed to hold the pixels.
    pub fn byte_count(&self) -> usize {
        pixel_bytes(self.width, self.height, self.format)
    }

    /// Bytes actually held by the backing buffer.
    pub fn allocation_byte_count(&self) -> usize {
        self.pixels.len()
    }
}

fn pixel_bytes(width: u32, height: u32, format: PixelFormat) -> usize {
    width as usize * height as usize * format.bytes_per_pixel()
}

// == Allocation Sizer ==
/// Sizes images by their backing allocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationSizer;

impl ByteSizer<DecodedImage> for AllocationSizer {
    fn byte_count(&self, image: &DecodedImage) -> usize {
        image.allocation_byte_count()
    }
}
