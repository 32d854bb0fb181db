//! Texture reference -> image lookup.

use crate::descriptor::{ImageEntry, TextureEntry, TextureReference};
use crate::error::{Result, TranslatorError};
use crate::texture::TextureData;
use std::rc::Rc;

/// A texture reference resolved to its image.
#[derive(Debug, Clone)]
pub struct ResolvedTexture {
    /// Index into the texture table.
    pub texture_index: usize,
    /// Index into the image table (after any compressed-format override).
    pub image_index: usize,
    pub image: Rc<TextureData>,
    pub is_compressed_block: bool,
}

/// Resolves texture references against one document's tables.
#[derive(Debug, Clone, Copy)]
pub struct TextureResolver<'a> {
    textures: &'a [TextureEntry],
    images: &'a [ImageEntry],
}

impl<'a> TextureResolver<'a> {
    pub fn new(textures: &'a [TextureEntry], images: &'a [ImageEntry]) -> Self {
        Self { textures, images }
    }

    /// Resolve a texture reference.
    ///
    /// Returns `Ok(None)` when no texture is requested (absent reference or
    /// negative index). Out-of-range texture or image indices are errors.
    pub fn resolve(&self, reference: Option<&TextureReference>) -> Result<Option<ResolvedTexture>> {
        let reference = match reference {
            Some(reference) if reference.is_set() => reference,
            _ => return Ok(None),
        };

        let texture_index = reference.index;
        let entry = usize::try_from(texture_index)
            .ok()
            .and_then(|i| self.textures.get(i))
            .ok_or(TranslatorError::TextureNotFound(texture_index))?;

        let image_index = entry.effective_source().unwrap_or(-1);
        let image = usize::try_from(image_index)
            .ok()
            .and_then(|i| self.images.get(i))
            .ok_or(TranslatorError::ImageNotFound {
                texture: texture_index,
                image: image_index,
            })?;

        Ok(Some(ResolvedTexture {
            texture_index: texture_index as usize,
            image_index: image_index as usize,
            image: Rc::clone(&image.texture),
            is_compressed_block: image.is_compressed_block,
        }))
    }
}
