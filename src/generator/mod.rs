//! Material generation.
//!
//! [`StandardMaterialGenerator`] turns one [`MaterialDescriptor`] plus the
//! document's texture and image tables into a [`Material`] for the Standard
//! shader family. Lookup and conversion failures never abort a build; they
//! are logged and returned as [`Diagnostic`]s alongside a material that is
//! missing the affected features.

mod diagnostics;
pub mod patch;

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use patch::UvTransform;

use crate::descriptor::{ImageEntry, MaterialDescriptor, TextureEntry, TextureReference};
use crate::error::{Result, TranslatorError};
use crate::material::{DefaultMaterialCache, Material, StandardTemplate, TemplateSource};
use crate::resolver::{ResolvedTexture, TextureResolver};
use crate::shading::ShadingModel;
use crate::texture::{repack::repack, RepackCache, RepackKind, TextureData};
use diagnostics::Diagnostics;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::rc::Rc;

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Main texture scale for materials without block-compressed images.
    pub flip_texture_scale: Vec2,
    /// Main texture scale once any block-compressed image is bound.
    pub compressed_texture_scale: Vec2,
    /// Main texture offset, applied in both cases.
    pub texture_offset: Vec2,
    /// Reuse repacked textures across materials sharing a source image.
    pub cache_repacked_textures: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            flip_texture_scale: Vec2::new(1.0, -1.0),
            compressed_texture_scale: Vec2::ONE,
            texture_offset: Vec2::new(0.0, 1.0),
            cache_repacked_textures: true,
        }
    }
}

impl GeneratorConfig {
    /// Enable or disable the repack cache.
    pub fn with_repack_cache(mut self, enabled: bool) -> Self {
        self.cache_repacked_textures = enabled;
        self
    }

    /// Load a configuration from a JSON file. Missing fields take defaults;
    /// unknown fields are an error.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Result of generating one material.
#[derive(Debug, Clone)]
pub struct GeneratedMaterial {
    pub material: Material,
    /// The shading path that was selected.
    pub shading: ShadingModel,
    /// Repacked textures referenced by `material`. Keep them alive as long
    /// as the material and dispose of them together.
    pub owned_resources: Vec<Rc<TextureData>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedMaterial {
    pub fn diagnostic_count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

/// Produces engine materials from descriptors.
pub trait MaterialGenerator {
    /// The shared template material. Repeated calls return the same handle.
    fn default_material(&mut self) -> Rc<Material>;

    /// Build a material. Always returns a usable material.
    fn generate_material(
        &mut self,
        descriptor: &MaterialDescriptor,
        textures: &[TextureEntry],
        images: &[ImageEntry],
    ) -> GeneratedMaterial;
}

/// Generator targeting the Standard, Standard (Specular setup) and
/// Unlit/Color shaders.
///
/// Holds the template cache and the repack cache; neither is synchronized,
/// so one generator serves one thread.
pub struct StandardMaterialGenerator<S = StandardTemplate> {
    config: GeneratorConfig,
    templates: DefaultMaterialCache<S>,
    repacks: RepackCache,
}

impl StandardMaterialGenerator<StandardTemplate> {
    /// Create a generator with default configuration.
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a generator with custom configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self::with_template_source(config, StandardTemplate)
    }
}

impl Default for StandardMaterialGenerator<StandardTemplate> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TemplateSource> StandardMaterialGenerator<S> {
    /// Create a generator whose template comes from `source`.
    pub fn with_template_source(config: GeneratorConfig, source: S) -> Self {
        Self {
            config,
            templates: DefaultMaterialCache::new(source),
            repacks: RepackCache::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn repack_cache(&self) -> &RepackCache {
        &self.repacks
    }

    pub fn repack_cache_mut(&mut self) -> &mut RepackCache {
        &mut self.repacks
    }

    /// Forget every cached repack. Buffers already handed out stay valid.
    pub fn clear_repack_cache(&mut self) {
        self.repacks.clear();
    }

    fn repack(
        &mut self,
        build: &mut MaterialBuild<'_>,
        context: &str,
        source: &ResolvedTexture,
        kind: RepackKind,
    ) -> Option<Rc<TextureData>> {
        let repacked = if self.config.cache_repacked_textures {
            self.repacks.get_or_repack(&source.image, kind)
        } else {
            repack(&source.image, kind).map(Rc::new)
        };

        match repacked {
            Ok(texture) => {
                build.owned_resources.push(Rc::clone(&texture));
                Some(texture)
            }
            Err(err) => {
                build.diagnostics.record(context, err);
                None
            }
        }
    }
}

impl<S: TemplateSource> MaterialGenerator for StandardMaterialGenerator<S> {
    fn default_material(&mut self) -> Rc<Material> {
        self.templates.get()
    }

    fn generate_material(
        &mut self,
        descriptor: &MaterialDescriptor,
        textures: &[TextureEntry],
        images: &[ImageEntry],
    ) -> GeneratedMaterial {
        let mut material = self.templates.instantiate();
        material.name = descriptor.name.clone();

        let mut build = MaterialBuild::new(&descriptor.name, textures, images);

        let shading = ShadingModel::select(descriptor);
        material.shader = shading.shader();

        let base_color = shading.base_color();
        let base_texture = build.resolve("base color texture", base_color.texture.as_ref());
        patch::apply_base_color(&mut material, base_color, base_texture.as_ref());

        match &shading {
            ShadingModel::SpecularGlossiness(inputs) => {
                let map = build.resolve(
                    "specular-glossiness texture",
                    inputs.specular_glossiness_texture.as_ref(),
                );
                patch::apply_specular_glossiness(&mut material, inputs, map.as_ref());
            }
            ShadingModel::MetallicRoughness(inputs) => {
                patch::apply_metallic_roughness_factors(&mut material, inputs);
            }
            ShadingModel::Unlit(_) => {}
        }

        if let Some(normal) = build.resolve("normal texture", descriptor.normal_texture.as_ref()) {
            patch::apply_normal_map(&mut material, &normal);
        }

        if let Some(occlusion) = build.resolve("occlusion texture", descriptor.occlusion_texture.as_ref()) {
            if let Some(repacked) = self.repack(&mut build, "occlusion texture", &occlusion, RepackKind::Occlusion) {
                patch::apply_occlusion_map(&mut material, repacked);
            }
        }

        if let ShadingModel::MetallicRoughness(inputs) = &shading {
            let context = "metallic-roughness texture";
            if let Some(source) = build.resolve(context, inputs.metallic_roughness_texture.as_ref()) {
                if let Some(repacked) = self.repack(&mut build, context, &source, RepackKind::MetallicRoughness) {
                    patch::apply_metallic_gloss_map(&mut material, repacked);
                }
            }
        }

        if let Some(emission) = build.resolve("emissive texture", descriptor.emissive_texture.as_ref()) {
            patch::apply_emission_map(&mut material, &emission);
        }

        patch::apply_alpha_mode(&mut material, descriptor.alpha_mode, descriptor.alpha_cutoff);
        patch::apply_emissive_factor(&mut material, descriptor.emissive_factor);

        if descriptor.double_sided {
            build.diagnostics.record(
                "doubleSided",
                TranslatorError::UnsupportedFeature("double sided shading".to_string()),
            );
        }

        let transform = patch::uv_transform(build.any_compressed, &self.config);
        patch::apply_uv_transform(&mut material, transform);

        GeneratedMaterial {
            material,
            shading,
            owned_resources: build.owned_resources,
            diagnostics: build.diagnostics.into_vec(),
        }
    }
}

/// Per-call state of one material build.
struct MaterialBuild<'a> {
    resolver: TextureResolver<'a>,
    diagnostics: Diagnostics,
    owned_resources: Vec<Rc<TextureData>>,
    any_compressed: bool,
}

impl<'a> MaterialBuild<'a> {
    fn new(material: &str, textures: &'a [TextureEntry], images: &'a [ImageEntry]) -> Self {
        Self {
            resolver: TextureResolver::new(textures, images),
            diagnostics: Diagnostics::new(material),
            owned_resources: Vec::new(),
            any_compressed: false,
        }
    }

    fn resolve(&mut self, context: &str, reference: Option<&TextureReference>) -> Option<ResolvedTexture> {
        match self.resolver.resolve(reference) {
            Ok(Some(resolved)) => {
                self.any_compressed |= resolved.is_compressed_block;
                Some(resolved)
            }
            Ok(None) => None,
            Err(err) => {
                self.diagnostics.record(context, err);
                None
            }
        }
    }
}
