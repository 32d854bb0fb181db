//! Material package loading from JSON documents and ZIP archives.
//!
//! A package is a JSON document with `materials`, `textures` and `images`
//! arrays (any other glTF tables are ignored) plus the image files its
//! `uri`s point at. PNG images are decoded to CPU-readable buffers; KTX2
//! images are registered as GPU-only, block-compressed entries using the
//! dimensions from their header.

use super::{ImageEntry, ImageSource, MaterialDescriptor, MaterialDocument, TextureEntry};
use crate::error::{Result, TranslatorError};
use crate::texture::TextureData;
use std::io::Read;
use std::path::Path;

/// The KTX2 file identifier: `«KTX 20»\r\n\x1A\n`.
pub const KTX2_IDENTIFIER: [u8; 12] = [0xAB, 0x4B, 0x54, 0x58, 0x20, 0x32, 0x30, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A];

/// Decoded tables ready for the generator.
#[derive(Debug, Clone, Default)]
pub struct MaterialPackage {
    pub materials: Vec<MaterialDescriptor>,
    pub textures: Vec<TextureEntry>,
    pub images: Vec<ImageEntry>,
}

impl MaterialPackage {
    /// Number of images flagged as block-compressed.
    pub fn compressed_image_count(&self) -> usize {
        self.images.iter().filter(|i| i.is_compressed_block).count()
    }

    /// Number of images whose pixels can be read on the CPU.
    pub fn readable_image_count(&self) -> usize {
        self.images.iter().filter(|i| i.texture.is_readable()).count()
    }
}

/// Load a package from a file path.
///
/// `.zip` files are read as archives; anything else as a JSON document with
/// image URIs relative to its directory.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<MaterialPackage> {
    let path = path.as_ref();
    let is_zip = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("zip"));

    if is_zip {
        let data = std::fs::read(path)?;
        return load_from_zip_bytes(&data);
    }

    let json = std::fs::read_to_string(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    load_document(&json, |uri| Ok(std::fs::read(base.join(uri))?))
}

/// Load a package from ZIP bytes.
///
/// The first `.gltf` or `.json` entry (by name) is the document.
pub fn load_from_zip_bytes(data: &[u8]) -> Result<MaterialPackage> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let document_name = archive
        .file_names()
        .filter(|name| name.ends_with(".gltf") || name.ends_with(".json"))
        .min()
        .map(str::to_string)
        .ok_or_else(|| TranslatorError::InvalidPackage("No .gltf or .json document in archive".to_string()))?;

    let mut json = String::new();
    archive.by_name(&document_name)?.read_to_string(&mut json)?;

    let base = document_name
        .rsplit_once('/')
        .map(|(dir, _)| dir.to_string())
        .unwrap_or_default();

    load_document(&json, |uri| {
        let entry_name = if base.is_empty() {
            uri.to_string()
        } else {
            format!("{}/{}", base, uri)
        };
        let mut file = archive.by_name(&entry_name)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    })
}

/// Parse a document and load its images through `read`.
///
/// Images that cannot be read or decoded are replaced by a placeholder so
/// that image indices stay stable.
pub fn load_document(json: &str, mut read: impl FnMut(&str) -> Result<Vec<u8>>) -> Result<MaterialPackage> {
    let document: MaterialDocument = serde_json::from_str(json)?;

    let images = document
        .images
        .iter()
        .enumerate()
        .map(|(index, source)| load_image(index, source, &mut read))
        .collect();

    Ok(MaterialPackage {
        materials: document.materials,
        textures: document.textures,
        images,
    })
}

fn load_image(index: usize, source: &ImageSource, read: &mut impl FnMut(&str) -> Result<Vec<u8>>) -> ImageEntry {
    let name = source.display_name(index);

    let uri = match source.uri.as_deref() {
        Some(uri) if !uri.starts_with("data:") => uri,
        _ => {
            log::warn!("Image #{} ({}) is not stored as an external file, using placeholder", index, name);
            return ImageEntry::new(TextureData::placeholder(name));
        }
    };

    let data = match read(uri) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Failed to read image {}: {}", uri, e);
            return ImageEntry::new(TextureData::placeholder(name));
        }
    };

    if source.is_ktx2() || data.starts_with(&KTX2_IDENTIFIER) {
        let (width, height) = parse_ktx2_dimensions(&data).unwrap_or_else(|| {
            log::warn!("Invalid KTX2 header in {}", uri);
            (0, 0)
        });
        return ImageEntry::compressed(TextureData::gpu_only(name, width, height));
    }

    match TextureData::from_png_bytes(name.clone(), &data) {
        Ok(texture) => ImageEntry::new(texture),
        Err(e) => {
            log::warn!("Failed to decode image {}: {}", uri, e);
            ImageEntry::new(TextureData::placeholder(name))
        }
    }
}

/// Read `pixelWidth` and `pixelHeight` from a KTX2 header.
pub fn parse_ktx2_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() < 28 || !data.starts_with(&KTX2_IDENTIFIER) {
        return None;
    }
    // identifier, vkFormat, typeSize, pixelWidth, pixelHeight
    let width = u32::from_le_bytes(data[20..24].try_into().ok()?);
    let height = u32::from_le_bytes(data[24..28].try_into().ok()?);
    Some((width, height))
}
