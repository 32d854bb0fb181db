//! Material descriptors as they arrive from the interchange format.
//!
//! Field names follow the glTF JSON schema so a `materials` array can be
//! deserialized directly. Defaults match the glTF 2.0 defaults.

use super::TextureReference;
use serde::{Deserialize, Serialize};

/// How the alpha channel of the base color is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlphaMode {
    /// Alpha is ignored.
    #[default]
    Opaque,
    /// Alpha is compared against `alpha_cutoff`.
    Mask,
    /// Alpha blends with the background.
    Blend,
}

/// The core metallic-roughness parameter block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    /// Linear RGBA base color.
    #[serde(default = "white_rgba")]
    pub base_color_factor: [f32; 4],
    #[serde(default)]
    pub base_color_texture: Option<TextureReference>,
    #[serde(default = "one")]
    pub metallic_factor: f32,
    #[serde(default = "one")]
    pub roughness_factor: f32,
    /// Metalness in B, roughness in G.
    #[serde(default)]
    pub metallic_roughness_texture: Option<TextureReference>,
}

impl Default for PbrMetallicRoughness {
    fn default() -> Self {
        Self {
            base_color_factor: white_rgba(),
            base_color_texture: None,
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            metallic_roughness_texture: None,
        }
    }
}

/// `KHR_materials_pbrSpecularGlossiness` parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecularGlossiness {
    #[serde(default = "white_rgba")]
    pub diffuse_factor: [f32; 4],
    #[serde(default)]
    pub diffuse_texture: Option<TextureReference>,
    #[serde(default = "white_rgb")]
    pub specular_factor: [f32; 3],
    #[serde(default = "one")]
    pub glossiness_factor: f32,
    #[serde(default)]
    pub specular_glossiness_texture: Option<TextureReference>,
}

impl Default for SpecularGlossiness {
    fn default() -> Self {
        Self {
            diffuse_factor: white_rgba(),
            diffuse_texture: None,
            specular_factor: white_rgb(),
            glossiness_factor: 1.0,
            specular_glossiness_texture: None,
        }
    }
}

/// `KHR_materials_unlit` marker. The extension carries no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Unlit {}

/// Material extensions understood by the translator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialExtensions {
    #[serde(
        rename = "KHR_materials_pbrSpecularGlossiness",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pbr_specular_glossiness: Option<SpecularGlossiness>,

    #[serde(
        rename = "KHR_materials_unlit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unlit: Option<Unlit>,
}

/// A single material from the source asset. Read-only input to the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    #[serde(default)]
    pub normal_texture: Option<TextureReference>,
    /// Occlusion in R.
    #[serde(default)]
    pub occlusion_texture: Option<TextureReference>,
    #[serde(default)]
    pub emissive_texture: Option<TextureReference>,
    #[serde(default)]
    pub emissive_factor: [f32; 3],
    #[serde(default)]
    pub alpha_mode: AlphaMode,
    /// Only meaningful under [`AlphaMode::Mask`].
    #[serde(default = "default_alpha_cutoff")]
    pub alpha_cutoff: f32,
    #[serde(default)]
    pub double_sided: bool,
    #[serde(default)]
    pub extensions: Option<MaterialExtensions>,
}

impl Default for MaterialDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            pbr_metallic_roughness: None,
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
            emissive_factor: [0.0; 3],
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: default_alpha_cutoff(),
            double_sided: false,
            extensions: None,
        }
    }
}

impl MaterialDescriptor {
    /// Create an empty descriptor with glTF defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach a metallic-roughness block.
    pub fn with_metallic_roughness(mut self, pbr: PbrMetallicRoughness) -> Self {
        self.pbr_metallic_roughness = Some(pbr);
        self
    }

    /// Attach a specular-glossiness extension.
    pub fn with_specular_glossiness(mut self, spec_gloss: SpecularGlossiness) -> Self {
        self.extensions
            .get_or_insert_with(MaterialExtensions::default)
            .pbr_specular_glossiness = Some(spec_gloss);
        self
    }

    /// Mark the material as unlit.
    pub fn with_unlit(mut self) -> Self {
        self.extensions
            .get_or_insert_with(MaterialExtensions::default)
            .unlit = Some(Unlit {});
        self
    }

    /// The specular-glossiness extension, if present.
    pub fn specular_glossiness(&self) -> Option<&SpecularGlossiness> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.pbr_specular_glossiness.as_ref())
    }

    /// Whether the unlit extension is present.
    pub fn is_unlit(&self) -> bool {
        self.extensions
            .as_ref()
            .map_or(false, |ext| ext.unlit.is_some())
    }
}

fn white_rgba() -> [f32; 4] {
    [1.0; 4]
}

fn white_rgb() -> [f32; 3] {
    [1.0; 3]
}

fn one() -> f32 {
    1.0
}

fn default_alpha_cutoff() -> f32 {
    0.5
}
