//! Individual binding rules applied to an output material.
//!
//! Each function handles one concern of material assembly and only touches
//! the fields that concern owns, so they can be exercised on a bare
//! template without running the whole generator.

use super::GeneratorConfig;
use crate::descriptor::AlphaMode;
use crate::material::{BlendState, Keyword, Material, TextureSlot};
use crate::resolver::ResolvedTexture;
use crate::shading::{BaseColorInputs, MetallicRoughnessInputs, SpecularGlossinessInputs};
use crate::texture::TextureData;
use glam::{Vec2, Vec3, Vec4};
use std::rc::Rc;

/// Main texture scale and offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvTransform {
    pub scale: Vec2,
    pub offset: Vec2,
}

pub fn apply_base_color(material: &mut Material, inputs: &BaseColorInputs, texture: Option<&ResolvedTexture>) {
    match texture {
        Some(texture) => {
            material.set_texture(TextureSlot::Main, Rc::clone(&texture.image));
            if inputs.factor_with_texture {
                material.color = Vec4::from_array(inputs.factor);
            }
        }
        None => material.color = Vec4::from_array(inputs.factor),
    }
}

pub fn apply_specular_glossiness(
    material: &mut Material,
    inputs: &SpecularGlossinessInputs,
    map: Option<&ResolvedTexture>,
) {
    match map {
        Some(map) => {
            material.set_texture(TextureSlot::SpecGlossMap, Rc::clone(&map.image));
            material.enable_keyword(Keyword::SpecGlossMap);
        }
        None => {
            material.specular_color = Vec3::from_array(inputs.specular_factor);
            material.glossiness = inputs.glossiness_factor;
        }
    }
}

/// Smoothness is stored as `1 - roughness`.
pub fn apply_metallic_roughness_factors(material: &mut Material, inputs: &MetallicRoughnessInputs) {
    material.metallic = inputs.metallic_factor;
    material.glossiness = 1.0 - inputs.roughness_factor;
}

/// Bind an already repacked metallic-smoothness texture.
pub fn apply_metallic_gloss_map(material: &mut Material, repacked: Rc<TextureData>) {
    material.set_texture(TextureSlot::MetallicGlossMap, repacked);
    material.enable_keyword(Keyword::MetallicGlossMap);
}

pub fn apply_normal_map(material: &mut Material, normal: &ResolvedTexture) {
    material.set_texture(TextureSlot::BumpMap, Rc::clone(&normal.image));
    material.enable_keyword(Keyword::NormalMap);
}

/// Bind an already repacked occlusion texture.
pub fn apply_occlusion_map(material: &mut Material, repacked: Rc<TextureData>) {
    material.set_texture(TextureSlot::OcclusionMap, repacked);
}

pub fn apply_emission_map(material: &mut Material, emission: &ResolvedTexture) {
    material.set_texture(TextureSlot::EmissionMap, Rc::clone(&emission.image));
    material.enable_keyword(Keyword::Emission);
}

pub fn apply_alpha_mode(material: &mut Material, mode: AlphaMode, cutoff: f32) {
    let blend = match mode {
        AlphaMode::Mask => {
            material.alpha_cutoff = cutoff;
            BlendState::cutout()
        }
        AlphaMode::Blend => BlendState::fade(),
        AlphaMode::Opaque => BlendState::opaque(),
    };

    material.disable_keyword(Keyword::AlphaTestOn);
    material.disable_keyword(Keyword::AlphaBlendOn);
    if let Some(keyword) = blend.keyword() {
        material.enable_keyword(keyword);
    }
    material.blend = blend;
}

/// Non-zero emissive factors set the emission color and the emission keyword.
pub fn apply_emissive_factor(material: &mut Material, factor: [f32; 3]) {
    if factor.iter().all(|c| *c == 0.0) {
        return;
    }
    material.emission_color = Vec3::from_array(factor);
    material.enable_keyword(Keyword::Emission);
}

/// Transform for the whole material, from whether any resolved image was
/// block-compressed.
pub fn uv_transform(any_compressed: bool, config: &GeneratorConfig) -> UvTransform {
    UvTransform {
        scale: if any_compressed {
            config.compressed_texture_scale
        } else {
            config.flip_texture_scale
        },
        offset: config.texture_offset,
    }
}

pub fn apply_uv_transform(material: &mut Material, transform: UvTransform) {
    material.main_texture_scale = transform.scale;
    material.main_texture_offset = transform.offset;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::RenderMode;

    fn resolved(name: &str, compressed: bool) -> ResolvedTexture {
        ResolvedTexture {
            texture_index: 0,
            image_index: 0,
            image: Rc::new(TextureData::new(1, 1, vec![0; 4]).with_name(name)),
            is_compressed_block: compressed,
        }
    }

    fn base(factor_with_texture: bool) -> BaseColorInputs {
        BaseColorInputs {
            factor: [0.5, 0.5, 0.5, 1.0],
            texture: None,
            factor_with_texture,
        }
    }

    #[test]
    fn test_base_color_factor_without_texture() {
        let mut material = Material::standard();
        apply_base_color(&mut material, &base(false), None);

        assert_eq!(material.color, Vec4::new(0.5, 0.5, 0.5, 1.0));
        assert!(material.main_texture().is_none());
    }

    #[test]
    fn test_base_color_texture_replaces_or_multiplies() {
        let albedo = resolved("albedo", false);

        let mut replaced = Material::standard();
        apply_base_color(&mut replaced, &base(false), Some(&albedo));
        assert_eq!(replaced.color, Vec4::ONE);
        assert_eq!(replaced.main_texture().unwrap().name, "albedo");

        let mut multiplied = Material::standard();
        apply_base_color(&mut multiplied, &base(true), Some(&albedo));
        assert_eq!(multiplied.color, Vec4::new(0.5, 0.5, 0.5, 1.0));
        assert!(multiplied.main_texture().is_some());
    }

    #[test]
    fn test_specular_glossiness_factors_or_map() {
        let inputs = SpecularGlossinessInputs {
            base_color: base(false),
            specular_factor: [0.1, 0.2, 0.3],
            glossiness_factor: 0.8,
            specular_glossiness_texture: None,
        };

        let mut factors = Material::standard();
        apply_specular_glossiness(&mut factors, &inputs, None);
        assert_eq!(factors.specular_color, Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(factors.glossiness, 0.8);
        assert!(!factors.is_keyword_enabled(Keyword::SpecGlossMap));

        let mut mapped = Material::standard();
        apply_specular_glossiness(&mut mapped, &inputs, Some(&resolved("sg", false)));
        assert!(mapped.is_keyword_enabled(Keyword::SpecGlossMap));
        assert!(mapped.texture(TextureSlot::SpecGlossMap).is_some());
        assert_eq!(mapped.glossiness, Material::standard().glossiness);
    }

    #[test]
    fn test_metallic_roughness_factors() {
        let mut material = Material::standard();
        let inputs = MetallicRoughnessInputs {
            base_color: base(true),
            metallic_factor: 0.25,
            roughness_factor: 0.75,
            metallic_roughness_texture: None,
        };
        apply_metallic_roughness_factors(&mut material, &inputs);

        assert_eq!(material.metallic, 0.25);
        assert_eq!(material.glossiness, 0.25);
    }

    #[test]
    fn test_texture_maps_enable_keywords() {
        let mut material = Material::standard();
        apply_normal_map(&mut material, &resolved("normal", false));
        apply_emission_map(&mut material, &resolved("glow", false));
        apply_occlusion_map(&mut material, Rc::new(TextureData::new(1, 1, vec![0; 4])));
        apply_metallic_gloss_map(&mut material, Rc::new(TextureData::new(1, 1, vec![0; 4])));

        assert!(material.is_keyword_enabled(Keyword::NormalMap));
        assert!(material.is_keyword_enabled(Keyword::Emission));
        assert!(material.is_keyword_enabled(Keyword::MetallicGlossMap));
        assert!(material.texture(TextureSlot::OcclusionMap).is_some());
        assert_eq!(material.texture(TextureSlot::BumpMap).unwrap().name, "normal");
    }

    #[test]
    fn test_alpha_modes() {
        let mut material = Material::standard();

        apply_alpha_mode(&mut material, AlphaMode::Mask, 0.3);
        assert_eq!(material.alpha_cutoff, 0.3);
        assert_eq!(material.blend.mode, RenderMode::Cutout);
        assert!(material.is_keyword_enabled(Keyword::AlphaTestOn));

        apply_alpha_mode(&mut material, AlphaMode::Blend, 0.9);
        assert_eq!(material.alpha_cutoff, 0.3);
        assert_eq!(material.blend, BlendState::fade());
        assert!(material.is_keyword_enabled(Keyword::AlphaBlendOn));
        assert!(!material.is_keyword_enabled(Keyword::AlphaTestOn));

        apply_alpha_mode(&mut material, AlphaMode::Opaque, 0.5);
        assert_eq!(material.blend, BlendState::opaque());
        assert_eq!(material.keywords().count(), 0);
    }

    #[test]
    fn test_emissive_factor() {
        let mut black = Material::standard();
        apply_emissive_factor(&mut black, [0.0; 3]);
        assert!(!black.is_keyword_enabled(Keyword::Emission));
        assert_eq!(black.emission_color, Vec3::ZERO);

        let mut glowing = Material::standard();
        apply_emissive_factor(&mut glowing, [0.0, 0.5, 0.0]);
        assert!(glowing.is_keyword_enabled(Keyword::Emission));
        assert_eq!(glowing.emission_color, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_uv_transform_policy() {
        let config = GeneratorConfig::default();

        let flipped = uv_transform(false, &config);
        assert_eq!(flipped.scale, Vec2::new(1.0, -1.0));
        assert_eq!(flipped.offset, Vec2::new(0.0, 1.0));

        let compressed = uv_transform(true, &config);
        assert_eq!(compressed.scale, Vec2::ONE);
        assert_eq!(compressed.offset, Vec2::new(0.0, 1.0));

        let mut material = Material::standard();
        apply_uv_transform(&mut material, flipped);
        assert_eq!(material.main_texture_scale, Vec2::new(1.0, -1.0));
        assert_eq!(material.main_texture_offset, Vec2::new(0.0, 1.0));
    }
}
