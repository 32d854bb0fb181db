//! Error types for the material translator.

use thiserror::Error;

/// Result type alias using TranslatorError.
pub type Result<T> = std::result::Result<T, TranslatorError>;

/// Main error type for material translation and the host-side glue around it.
#[derive(Error, Debug)]
pub enum TranslatorError {
    /// A texture reference points past the end of the texture table.
    #[error("Texture #{0} not found")]
    TextureNotFound(i64),

    /// A texture entry points at an image that is not in the image table.
    #[error("Image #{image} not found (referenced by texture #{texture})")]
    ImageNotFound { texture: i64, image: i64 },

    /// CPU-side pixel access is unavailable (GPU-only upload).
    #[error("Pixel data of image '{0}' is not CPU-readable")]
    UnreadablePixelData(String),

    /// The descriptor asks for something the target shader cannot express.
    #[error("Unsupported feature requested: {0}")]
    UnsupportedFeature(String),

    /// Pixel buffer does not match the declared dimensions.
    #[error("Invalid pixel buffer: expected {expected} bytes for {width}x{height}, got {actual}")]
    InvalidPixelBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Failed to read or parse a ZIP archive.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or process an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid material package structure.
    #[error("Invalid material package: {0}")]
    InvalidPackage(String),
}

impl TranslatorError {
    /// Whether this is a texture or image lookup failure.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            TranslatorError::TextureNotFound(_) | TranslatorError::ImageNotFound { .. }
        )
    }
}
