//! Output materials in the target engine's Standard-shader model.
//!
//! A [`Material`] is a plain value: shader variant, scalar properties,
//! texture slots, enabled keywords, blend state and the main texture
//! transform. Every generated material starts as a clone of the template
//! held by [`template::DefaultMaterialCache`].

pub mod blend;
pub mod template;

pub use blend::{BlendFactor, BlendState, CullMode, RenderMode};
pub use template::{DefaultMaterialCache, StandardTemplate, TemplateSource};

use crate::texture::TextureData;
use glam::{Vec2, Vec3, Vec4};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Shader a material renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShaderKind {
    /// Metallic workflow.
    Standard,
    /// Specular workflow.
    StandardSpecular,
    /// Flat color, no lighting.
    UnlitColor,
}

impl ShaderKind {
    /// Engine-side shader name.
    pub fn shader_name(self) -> &'static str {
        match self {
            ShaderKind::Standard => "Standard",
            ShaderKind::StandardSpecular => "Standard (Specular setup)",
            ShaderKind::UnlitColor => "Unlit/Color",
        }
    }
}

/// Texture properties of the Standard shaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TextureSlot {
    Main,
    SpecGlossMap,
    MetallicGlossMap,
    BumpMap,
    OcclusionMap,
    EmissionMap,
}

impl TextureSlot {
    pub fn property_name(self) -> &'static str {
        match self {
            TextureSlot::Main => "_MainTex",
            TextureSlot::SpecGlossMap => "_SpecGlossMap",
            TextureSlot::MetallicGlossMap => "_MetallicGlossMap",
            TextureSlot::BumpMap => "_BumpMap",
            TextureSlot::OcclusionMap => "_OcclusionMap",
            TextureSlot::EmissionMap => "_EmissionMap",
        }
    }
}

/// Shader feature keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Keyword {
    SpecGlossMap,
    MetallicGlossMap,
    NormalMap,
    Emission,
    AlphaTestOn,
    AlphaBlendOn,
}

impl Keyword {
    pub fn name(self) -> &'static str {
        match self {
            Keyword::SpecGlossMap => "_SPECGLOSSMAP",
            Keyword::MetallicGlossMap => "_METALLICGLOSSMAP",
            Keyword::NormalMap => "_NORMALMAP",
            Keyword::Emission => "_EMISSION",
            Keyword::AlphaTestOn => "_ALPHATEST_ON",
            Keyword::AlphaBlendOn => "_ALPHABLEND_ON",
        }
    }
}

/// A material instance in the target engine's model.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub shader: ShaderKind,
    /// `_Color`, linear RGBA.
    pub color: Vec4,
    /// `_Metallic`.
    pub metallic: f32,
    /// `_Glossiness` (smoothness).
    pub glossiness: f32,
    /// `_SpecColor`.
    pub specular_color: Vec3,
    /// `_EmissionColor`.
    pub emission_color: Vec3,
    /// `_Cutoff`.
    pub alpha_cutoff: f32,
    pub blend: BlendState,
    pub main_texture_scale: Vec2,
    pub main_texture_offset: Vec2,
    textures: BTreeMap<TextureSlot, Rc<TextureData>>,
    keywords: BTreeSet<Keyword>,
}

impl Material {
    /// The built-in Standard-shader template.
    pub fn standard() -> Self {
        Self {
            name: String::new(),
            shader: ShaderKind::Standard,
            color: Vec4::ONE,
            metallic: 0.0,
            glossiness: 0.5,
            specular_color: Vec3::splat(0.2),
            emission_color: Vec3::ZERO,
            alpha_cutoff: 0.5,
            blend: BlendState::opaque(),
            main_texture_scale: Vec2::ONE,
            main_texture_offset: Vec2::ZERO,
            textures: BTreeMap::new(),
            keywords: BTreeSet::new(),
        }
    }

    pub fn set_texture(&mut self, slot: TextureSlot, texture: Rc<TextureData>) {
        self.textures.insert(slot, texture);
    }

    pub fn texture(&self, slot: TextureSlot) -> Option<&Rc<TextureData>> {
        self.textures.get(&slot)
    }

    pub fn main_texture(&self) -> Option<&Rc<TextureData>> {
        self.texture(TextureSlot::Main)
    }

    /// Bound textures in slot order.
    pub fn textures(&self) -> impl Iterator<Item = (TextureSlot, &Rc<TextureData>)> {
        self.textures.iter().map(|(slot, tex)| (*slot, tex))
    }

    pub fn enable_keyword(&mut self, keyword: Keyword) {
        self.keywords.insert(keyword);
    }

    pub fn disable_keyword(&mut self, keyword: Keyword) {
        self.keywords.remove(&keyword);
    }

    pub fn is_keyword_enabled(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    pub fn keywords(&self) -> impl Iterator<Item = Keyword> + '_ {
        self.keywords.iter().copied()
    }

    /// Serializable snapshot with textures referred to by name.
    pub fn summary(&self) -> MaterialSummary {
        MaterialSummary {
            name: self.name.clone(),
            shader: self.shader.shader_name(),
            color: self.color,
            metallic: self.metallic,
            glossiness: self.glossiness,
            specular_color: self.specular_color,
            emission_color: self.emission_color,
            alpha_cutoff: self.alpha_cutoff,
            blend: self.blend,
            main_texture_scale: self.main_texture_scale,
            main_texture_offset: self.main_texture_offset,
            textures: self
                .textures
                .iter()
                .map(|(slot, tex)| (slot.property_name(), tex.name.clone()))
                .collect(),
            keywords: self.keywords.iter().map(|k| k.name()).collect(),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard()
    }
}

/// JSON-friendly view of a [`Material`].
#[derive(Debug, Clone, Serialize)]
pub struct MaterialSummary {
    pub name: String,
    pub shader: &'static str,
    pub color: Vec4,
    pub metallic: f32,
    pub glossiness: f32,
    pub specular_color: Vec3,
    pub emission_color: Vec3,
    pub alpha_cutoff: f32,
    pub blend: BlendState,
    pub main_texture_scale: Vec2,
    pub main_texture_offset: Vec2,
    pub textures: BTreeMap<&'static str, String>,
    pub keywords: Vec<&'static str>,
}
