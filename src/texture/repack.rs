//! Channel repacking from glTF layouts to Standard-shader layouts.
//!
//! glTF stores metalness in B and roughness in G of one texture, and
//! occlusion in R of another. The Standard shader expects metalness in RGB
//! with smoothness in A, and occlusion in every color channel.

use super::TextureData;
use crate::error::Result;

/// Which channel transform to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RepackKind {
    /// B = metal, G = roughness  ->  RGB = metal, A = 255 - roughness.
    MetallicRoughness,
    /// R = occlusion  ->  RGB = occlusion, A = 255.
    Occlusion,
}

impl RepackKind {
    /// Transform a single RGBA8 pixel.
    pub fn apply(self, pixel: [u8; 4]) -> [u8; 4] {
        match self {
            RepackKind::MetallicRoughness => metallic_smoothness_pixel(pixel),
            RepackKind::Occlusion => occlusion_pixel(pixel),
        }
    }

    /// Suffix appended to the source name of a repacked texture.
    pub fn name_suffix(self) -> &'static str {
        match self {
            RepackKind::MetallicRoughness => "metal_smooth",
            RepackKind::Occlusion => "occlusion",
        }
    }
}

/// Metallic-roughness pixel to metallic-smoothness.
///
/// Smoothness is the linear complement of roughness. No gamma handling.
pub fn metallic_smoothness_pixel([_, g, b, _]: [u8; 4]) -> [u8; 4] {
    [b, b, b, 255 - g]
}

/// Occlusion pixel broadcast to RGB with opaque alpha.
pub fn occlusion_pixel([r, _, _, _]: [u8; 4]) -> [u8; 4] {
    [r, r, r, 255]
}

/// Run `kind` over every pixel of `source`, producing a new texture of the
/// same dimensions.
///
/// Fails with `UnreadablePixelData` when the source lives on the GPU only.
pub fn repack(source: &TextureData, kind: RepackKind) -> Result<TextureData> {
    let pixels = source.pixels()?;

    log::warn!(
        "Converting texture '{}' ({}x{}) to {} layout (slow operation)",
        source.name,
        source.width,
        source.height,
        kind.name_suffix()
    );

    let mut out = Vec::with_capacity(pixels.len());
    for chunk in pixels.chunks_exact(4) {
        out.extend_from_slice(&kind.apply([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    Ok(TextureData::new(source.width, source.height, out)
        .with_name(format!("{}_{}", source.name, kind.name_suffix())))
}

/// Metallic-roughness to metallic-smoothness repack.
pub fn create_metallic_smoothness_texture(source: &TextureData) -> Result<TextureData> {
    repack(source, RepackKind::MetallicRoughness)
}

/// Occlusion to broadcast-RGB repack.
pub fn create_occlusion_texture(source: &TextureData) -> Result<TextureData> {
    repack(source, RepackKind::Occlusion)
}
