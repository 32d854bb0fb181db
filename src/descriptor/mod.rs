//! Input data model for material translation.
//!
//! These types mirror the parts of the interchange format the translator
//! consumes: material descriptors, the texture table and the image table.
//! Decoding the container itself is the host's job; [`loader`] only covers
//! the small JSON-plus-images packages used by the command line tool.

pub mod loader;
pub mod material;
pub mod texture;

pub use material::{
    AlphaMode, MaterialDescriptor, MaterialExtensions, PbrMetallicRoughness, SpecularGlossiness,
    Unlit,
};
pub use texture::{ImageEntry, TextureEntry, TextureReference};

use serde::{Deserialize, Serialize};

/// An `images` array entry before decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl ImageSource {
    /// Whether the declared mime type is a KTX2 container.
    pub fn is_ktx2(&self) -> bool {
        self.mime_type.as_deref() == Some("image/ktx2")
            || self
                .uri
                .as_deref()
                .map_or(false, |uri| uri.to_ascii_lowercase().ends_with(".ktx2"))
    }

    /// Display name: explicit name, else the file stem of the URI.
    pub fn display_name(&self, index: usize) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.uri
            .as_deref()
            .and_then(|uri| std::path::Path::new(uri).file_stem())
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| format!("image_{}", index))
    }
}

/// The material-related tables of a source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialDocument {
    #[serde(default)]
    pub materials: Vec<MaterialDescriptor>,
    #[serde(default)]
    pub textures: Vec<TextureEntry>,
    #[serde(default)]
    pub images: Vec<ImageSource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_ignores_other_tables() {
        let json = r#"{
            "asset": {"version": "2.0"},
            "meshes": [],
            "materials": [{"name": "a"}, {"name": "b"}],
            "textures": [{"source": 0}],
            "images": [{"uri": "textures/albedo.png"}]
        }"#;
        let doc: MaterialDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.materials.len(), 2);
        assert_eq!(doc.textures.len(), 1);
        assert_eq!(doc.images[0].display_name(0), "albedo");
    }

    #[test]
    fn test_ktx2_detection() {
        let by_mime = ImageSource {
            mime_type: Some("image/ktx2".to_string()),
            ..Default::default()
        };
        let by_uri = ImageSource {
            uri: Some("rock.KTX2".to_string()),
            ..Default::default()
        };
        let png = ImageSource {
            uri: Some("rock.png".to_string()),
            ..Default::default()
        };

        assert!(by_mime.is_ktx2());
        assert!(by_uri.is_ktx2());
        assert!(!png.is_ktx2());
        assert_eq!(png.display_name(4), "rock");
        assert_eq!(ImageSource::default().display_name(4), "image_4");
    }
}
