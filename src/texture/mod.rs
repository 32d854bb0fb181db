//! Pixel buffers and the channel transforms applied to them.
//!
//! [`TextureData`] is the pixel-access surface the translator needs from the
//! host: dimensions, CPU-side RGBA8 pixels (which may be unavailable for
//! GPU-only uploads) and PNG encode/decode for the command line tool.

pub mod cache;
pub mod repack;

pub use cache::RepackCache;
pub use repack::{create_metallic_smoothness_texture, create_occlusion_texture, RepackKind};

use crate::error::{Result, TranslatorError};
use image::ImageEncoder;

/// Decoded image data.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    /// Name used for logging and derived resource names.
    pub name: String,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// RGBA8 pixel data (4 bytes per pixel). Empty when not CPU-readable.
    pixels: Vec<u8>,
    cpu_readable: bool,
}

impl TextureData {
    /// Create a CPU-readable texture from RGBA data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            name: String::new(),
            width,
            height,
            pixels,
            cpu_readable: true,
        }
    }

    /// Create a CPU-readable texture, checking the buffer length.
    pub fn try_new(name: impl Into<String>, width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(TranslatorError::InvalidPixelBuffer {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self::new(width, height, pixels).with_name(name))
    }

    /// A texture that only exists on the GPU. Its pixels cannot be read back.
    pub fn gpu_only(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            pixels: Vec::new(),
            cpu_readable: false,
        }
    }

    /// Create a placeholder texture (magenta/black checkerboard).
    pub fn placeholder(name: impl Into<String>) -> Self {
        let size = 16;
        let mut pixels = vec![0u8; (size * size * 4) as usize];

        for y in 0..size {
            for x in 0..size {
                let idx = ((y * size + x) * 4) as usize;
                let is_magenta = ((x / 2) + (y / 2)) % 2 == 0;

                pixels[idx] = if is_magenta { 255 } else { 0 }; // R
                pixels[idx + 2] = if is_magenta { 255 } else { 0 }; // B
                pixels[idx + 3] = 255; // A
            }
        }

        Self::new(size, size, pixels).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether pixels can be read on the CPU.
    pub fn is_readable(&self) -> bool {
        self.cpu_readable
    }

    /// Borrow the RGBA8 pixel data.
    pub fn pixels(&self) -> Result<&[u8]> {
        if self.cpu_readable {
            Ok(&self.pixels)
        } else {
            Err(TranslatorError::UnreadablePixelData(self.name.clone()))
        }
    }

    /// Get a pixel at (x, y). `None` if out of range or unreadable.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if !self.cpu_readable || x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let pixel = self.pixels.get(idx..idx + 4)?;
        Some([pixel[0], pixel[1], pixel[2], pixel[3]])
    }

    /// Decode PNG (or any enabled `image` format) bytes into RGBA8.
    pub fn from_png_bytes(name: impl Into<String>, data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self::new(width, height, rgba.into_raw()).with_name(name))
    }

    /// Encode the texture as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let pixels = self.pixels()?;
        let mut bytes = Vec::new();
        let cursor = std::io::Cursor::new(&mut bytes);
        let encoder = image::codecs::png::PngEncoder::new(cursor);

        encoder.write_image(pixels, self.width, self.height, image::ExtendedColorType::Rgba8)?;

        Ok(bytes)
    }
}
