//! Shading model selection.
//!
//! Picks one of three closed outcomes per material. Precedence:
//!
//! | unlit ext | metallic-roughness block | spec-gloss ext | result               |
//! |-----------|--------------------------|----------------|----------------------|
//! | yes       | yes                      | any            | `Unlit`              |
//! | yes       | no                       | yes            | `SpecularGlossiness` |
//! | no        | any                      | yes            | `SpecularGlossiness` |
//! | otherwise |                          |                | `MetallicRoughness`  |
//!
//! An unlit material without a metallic-roughness block is shaded as if the
//! unlit extension were absent.

use crate::descriptor::{MaterialDescriptor, PbrMetallicRoughness, TextureReference};
use crate::material::ShaderKind;

/// Where the base color comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColorInputs {
    /// Linear RGBA factor.
    pub factor: [f32; 4],
    pub texture: Option<TextureReference>,
    /// If false, a resolved texture replaces the factor (the color is left at
    /// the template value). If true, the factor is applied either way.
    pub factor_with_texture: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecularGlossinessInputs {
    pub base_color: BaseColorInputs,
    pub specular_factor: [f32; 3],
    pub glossiness_factor: f32,
    pub specular_glossiness_texture: Option<TextureReference>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetallicRoughnessInputs {
    pub base_color: BaseColorInputs,
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub metallic_roughness_texture: Option<TextureReference>,
}

/// The selected shading path and the inputs it binds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadingModel {
    SpecularGlossiness(SpecularGlossinessInputs),
    Unlit(BaseColorInputs),
    MetallicRoughness(MetallicRoughnessInputs),
}

impl ShadingModel {
    /// Select the shading model for a descriptor.
    pub fn select(descriptor: &MaterialDescriptor) -> Self {
        if descriptor.is_unlit() {
            if let Some(pbr) = &descriptor.pbr_metallic_roughness {
                return ShadingModel::Unlit(metallic_roughness_base_color(pbr));
            }
        }

        if let Some(spec_gloss) = descriptor.specular_glossiness() {
            return ShadingModel::SpecularGlossiness(SpecularGlossinessInputs {
                base_color: BaseColorInputs {
                    factor: spec_gloss.diffuse_factor,
                    texture: spec_gloss.diffuse_texture,
                    factor_with_texture: false,
                },
                specular_factor: spec_gloss.specular_factor,
                glossiness_factor: spec_gloss.glossiness_factor,
                specular_glossiness_texture: spec_gloss.specular_glossiness_texture,
            });
        }

        let default_pbr = PbrMetallicRoughness::default();
        let pbr = descriptor.pbr_metallic_roughness.as_ref().unwrap_or(&default_pbr);
        ShadingModel::MetallicRoughness(MetallicRoughnessInputs {
            base_color: metallic_roughness_base_color(pbr),
            metallic_factor: pbr.metallic_factor,
            roughness_factor: pbr.roughness_factor,
            metallic_roughness_texture: pbr.metallic_roughness_texture,
        })
    }

    pub fn shader(&self) -> ShaderKind {
        match self {
            ShadingModel::SpecularGlossiness(_) => ShaderKind::StandardSpecular,
            ShadingModel::Unlit(_) => ShaderKind::UnlitColor,
            ShadingModel::MetallicRoughness(_) => ShaderKind::Standard,
        }
    }

    pub fn base_color(&self) -> &BaseColorInputs {
        match self {
            ShadingModel::SpecularGlossiness(inputs) => &inputs.base_color,
            ShadingModel::Unlit(base_color) => base_color,
            ShadingModel::MetallicRoughness(inputs) => &inputs.base_color,
        }
    }
}

fn metallic_roughness_base_color(pbr: &PbrMetallicRoughness) -> BaseColorInputs {
    BaseColorInputs {
        factor: pbr.base_color_factor,
        texture: pbr.base_color_texture,
        factor_with_texture: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::SpecularGlossiness;

    fn pbr() -> PbrMetallicRoughness {
        PbrMetallicRoughness {
            base_color_factor: [0.2, 0.4, 0.6, 1.0],
            metallic_factor: 0.3,
            roughness_factor: 0.7,
            ..Default::default()
        }
    }

    fn spec_gloss() -> SpecularGlossiness {
        SpecularGlossiness {
            diffuse_factor: [0.9, 0.8, 0.7, 1.0],
            diffuse_texture: Some(TextureReference::new(4)),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_extensions_is_metallic_roughness() {
        let model = ShadingModel::select(&MaterialDescriptor::new("m").with_metallic_roughness(pbr()));

        match model {
            ShadingModel::MetallicRoughness(inputs) => {
                assert_eq!(inputs.base_color.factor, [0.2, 0.4, 0.6, 1.0]);
                assert_eq!(inputs.metallic_factor, 0.3);
                assert_eq!(inputs.roughness_factor, 0.7);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(model.shader(), ShaderKind::Standard);
    }

    #[test]
    fn test_missing_block_uses_defaults() {
        let model = ShadingModel::select(&MaterialDescriptor::new("bare"));

        match model {
            ShadingModel::MetallicRoughness(inputs) => {
                assert_eq!(inputs.base_color.factor, [1.0; 4]);
                assert_eq!(inputs.metallic_factor, 1.0);
                assert_eq!(inputs.roughness_factor, 1.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_spec_gloss_overrides_metallic_roughness_base_color() {
        let descriptor = MaterialDescriptor::new("m")
            .with_metallic_roughness(pbr())
            .with_specular_glossiness(spec_gloss());
        let model = ShadingModel::select(&descriptor);

        assert_eq!(model.shader(), ShaderKind::StandardSpecular);
        assert_eq!(model.base_color().factor, [0.9, 0.8, 0.7, 1.0]);
        assert_eq!(model.base_color().texture, Some(TextureReference::new(4)));
        assert!(!model.base_color().factor_with_texture);
    }

    #[test]
    fn test_unlit_requires_metallic_roughness_block() {
        let with_block = MaterialDescriptor::new("m").with_metallic_roughness(pbr()).with_unlit();
        let without_block = MaterialDescriptor::new("m").with_unlit();

        assert_eq!(ShadingModel::select(&with_block).shader(), ShaderKind::UnlitColor);
        assert_eq!(ShadingModel::select(&without_block).shader(), ShaderKind::Standard);
    }

    #[test]
    fn test_unlit_beats_spec_gloss_only_with_block() {
        let unlit_spec_gloss = MaterialDescriptor::new("m")
            .with_metallic_roughness(pbr())
            .with_specular_glossiness(spec_gloss())
            .with_unlit();
        let model = ShadingModel::select(&unlit_spec_gloss);
        assert_eq!(model.shader(), ShaderKind::UnlitColor);
        assert_eq!(model.base_color().factor, [0.2, 0.4, 0.6, 1.0]);

        let no_block = MaterialDescriptor::new("m")
            .with_specular_glossiness(spec_gloss())
            .with_unlit();
        assert_eq!(ShadingModel::select(&no_block).shader(), ShaderKind::StandardSpecular);
    }
}
