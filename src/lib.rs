//! # glTF Material Translator
//!
//! Translates glTF physically-based material descriptions into materials for
//! a Standard-shader engine model.
//!
//! ## Overview
//!
//! Given one material descriptor and the document's texture and image tables,
//! the generator:
//!
//! - picks a shading path (specular-glossiness, unlit or metallic-roughness),
//! - resolves texture references to images, following `KHR_texture_basisu`
//!   source overrides,
//! - repacks metallic-roughness and occlusion maps into the channel layouts
//!   the Standard shader expects,
//! - sets blend state from the alpha mode and flips V for non-compressed
//!   images.
//!
//! Lookup and conversion failures never abort generation. They are logged
//! through the `log` facade and returned as diagnostics.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gltf_material_translator::{load_material_package, MaterialGenerator, StandardMaterialGenerator};
//!
//! let package = load_material_package("path/to/scene.gltf")?;
//! let mut generator = StandardMaterialGenerator::new();
//!
//! for descriptor in &package.materials {
//!     let generated = generator.generate_material(descriptor, &package.textures, &package.images);
//!     // Keep `generated.owned_resources` alive as long as `generated.material`.
//! }
//! ```

pub mod error;
pub mod descriptor;
pub mod texture;
pub mod resolver;
pub mod shading;
pub mod material;
pub mod generator;

// Re-export main types for convenience
pub use error::{TranslatorError, Result};
pub use descriptor::{
    AlphaMode, ImageEntry, MaterialDescriptor, PbrMetallicRoughness, SpecularGlossiness, TextureEntry,
    TextureReference,
};
pub use descriptor::loader::MaterialPackage;
pub use texture::{RepackCache, RepackKind, TextureData};
pub use resolver::{ResolvedTexture, TextureResolver};
pub use shading::ShadingModel;
pub use material::{DefaultMaterialCache, Keyword, Material, ShaderKind, TemplateSource, TextureSlot};
pub use generator::{
    Diagnostic, DiagnosticKind, GeneratedMaterial, GeneratorConfig, MaterialGenerator, StandardMaterialGenerator,
};

/// Load a material package from a file path (JSON document or ZIP).
pub fn load_material_package<P: AsRef<std::path::Path>>(path: P) -> Result<MaterialPackage> {
    descriptor::loader::load_from_path(path)
}

/// Load a material package from ZIP bytes.
pub fn load_material_package_from_bytes(data: &[u8]) -> Result<MaterialPackage> {
    descriptor::loader::load_from_zip_bytes(data)
}

/// Generate every material of a package with one generator.
pub fn generate_package<G: MaterialGenerator>(generator: &mut G, package: &MaterialPackage) -> Vec<GeneratedMaterial> {
    package
        .materials
        .iter()
        .map(|descriptor| generator.generate_material(descriptor, &package.textures, &package.images))
        .collect()
}
