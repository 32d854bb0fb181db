//! Texture references and the texture/image tables they index into.

use crate::texture::TextureData;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// A reference from a material slot into the texture table.
///
/// A negative index means "no texture".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureReference {
    pub index: i64,
    #[serde(default)]
    pub tex_coord: u32,
}

impl TextureReference {
    pub fn new(index: i64) -> Self {
        Self { index, tex_coord: 0 }
    }

    /// Whether this reference requests a texture at all.
    pub fn is_set(&self) -> bool {
        self.index >= 0
    }
}

/// One entry of the texture table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawTextureEntry", into = "RawTextureEntry")]
pub struct TextureEntry {
    /// Index of the default image.
    pub source: Option<i64>,
    /// Alternate image supplied by a compressed-format extension.
    pub override_source: Option<i64>,
}

impl TextureEntry {
    pub fn new(source: i64) -> Self {
        Self {
            source: Some(source),
            override_source: None,
        }
    }

    /// Texture whose compressed-format extension points at another image.
    pub fn with_override(source: i64, override_source: i64) -> Self {
        Self {
            source: Some(source),
            override_source: Some(override_source),
        }
    }

    /// The image index to use: the override if present, else the source.
    pub fn effective_source(&self) -> Option<i64> {
        self.override_source.or(self.source)
    }
}

/// One entry of the image table: a decoded image and its codec class.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub texture: Rc<TextureData>,
    /// Block-compressed codecs (KTX2/Basis) use an unflipped V axis.
    pub is_compressed_block: bool,
}

impl ImageEntry {
    pub fn new(texture: TextureData) -> Self {
        Self {
            texture: Rc::new(texture),
            is_compressed_block: false,
        }
    }

    pub fn compressed(texture: TextureData) -> Self {
        Self {
            texture: Rc::new(texture),
            is_compressed_block: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawTextureEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extensions: Option<RawTextureExtensions>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawTextureExtensions {
    #[serde(rename = "KHR_texture_basisu", default, skip_serializing_if = "Option::is_none")]
    basisu: Option<RawBasisu>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBasisu {
    source: i64,
}

impl From<RawTextureEntry> for TextureEntry {
    fn from(raw: RawTextureEntry) -> Self {
        Self {
            source: raw.source,
            override_source: raw.extensions.and_then(|ext| ext.basisu).map(|b| b.source),
        }
    }
}

impl From<TextureEntry> for RawTextureEntry {
    fn from(entry: TextureEntry) -> Self {
        Self {
            source: entry.source,
            extensions: entry.override_source.map(|source| RawTextureExtensions {
                basisu: Some(RawBasisu { source }),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_reference_is_unset() {
        assert!(!TextureReference::new(-1).is_set());
        assert!(TextureReference::new(0).is_set());
    }

    #[test]
    fn test_basisu_override_wins() {
        let entry: TextureEntry = serde_json::from_str(
            r#"{"source": 0, "extensions": {"KHR_texture_basisu": {"source": 3}}}"#,
        )
        .unwrap();

        assert_eq!(entry.source, Some(0));
        assert_eq!(entry.override_source, Some(3));
        assert_eq!(entry.effective_source(), Some(3));
    }

    #[test]
    fn test_plain_texture_entry() {
        let entry: TextureEntry = serde_json::from_str(r#"{"source": 2, "sampler": 0}"#).unwrap();
        assert_eq!(entry.effective_source(), Some(2));

        let empty: TextureEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.effective_source(), None);
    }
}
