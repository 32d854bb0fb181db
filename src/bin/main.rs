//! glTF Material Translator CLI
//!
//! Translate the materials of a glTF document into Standard-shader materials.

use clap::{Parser, Subcommand};
use gltf_material_translator::generator::Diagnostic;
use gltf_material_translator::material::MaterialSummary;
use gltf_material_translator::{
    generate_package, load_material_package, GeneratorConfig, StandardMaterialGenerator, TextureData,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "gltf-material-translator")]
#[command(author, version, about = "Translate glTF materials into Standard-shader materials", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate materials and repacked textures
    Generate {
        /// glTF/JSON document or ZIP package
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Generator configuration (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Recompute repacked textures for every material
        #[arg(long)]
        no_cache: bool,
    },

    /// Show information about a package
    Info {
        /// glTF/JSON document or ZIP package
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Serialize)]
struct MaterialReport<'a> {
    material: MaterialSummary,
    owned_resources: Vec<String>,
    diagnostics: &'a [Diagnostic],
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            config,
            no_cache,
        } => {
            let mut generator_config = match config {
                Some(path) => GeneratorConfig::from_json_file(path)?,
                None => GeneratorConfig::default(),
            };
            if no_cache {
                generator_config = generator_config.with_repack_cache(false);
            }
            generate(&input, &output, generator_config)?;
        }
        Commands::Info { input } => {
            show_package_info(&input)?;
        }
    }

    Ok(())
}

fn generate(input: &Path, output: &Path, config: GeneratorConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading package from {:?}...", input);
    let package = load_material_package(input)?;
    println!(
        "  Found {} materials, {} textures, {} images",
        package.materials.len(),
        package.textures.len(),
        package.images.len()
    );

    fs::create_dir_all(output)?;

    let mut generator = StandardMaterialGenerator::with_config(config);
    let generated = generate_package(&mut generator, &package);

    let mut names = OutputNames::default();
    let mut texture_count = 0;
    let mut warnings = 0;

    for (index, result) in generated.iter().enumerate() {
        let stem = if result.material.name.is_empty() {
            format!("material_{}", index)
        } else {
            sanitize(&result.material.name)
        };
        let report_name = names.reserve(&stem, "json");

        let mut owned_resources = Vec::new();
        for resource in &result.owned_resources {
            let (file_name, is_new) = names.texture(resource);
            if is_new {
                fs::write(output.join(&file_name), resource.to_png()?)?;
                texture_count += 1;
            }
            owned_resources.push(file_name);
        }

        let mut material = result.material.summary();
        for (slot, texture) in result.material.textures() {
            if let Some(file_name) = names.texture_file(texture) {
                material.textures.insert(slot.property_name(), file_name.to_string());
            }
        }

        let report = MaterialReport {
            material,
            owned_resources,
            diagnostics: &result.diagnostics,
        };
        fs::write(output.join(&report_name), serde_json::to_string_pretty(&report)?)?;

        warnings += result.diagnostics.len();
        println!(
            "  {} -> {} ({} repacked, {} diagnostics)",
            report_name,
            result.material.shader.shader_name(),
            result.owned_resources.len(),
            result.diagnostics.len()
        );
    }

    println!(
        "Wrote {} materials and {} textures to {:?} ({} diagnostics, {} cache hits)",
        generated.len(),
        texture_count,
        output,
        warnings,
        generator.repack_cache().hits()
    );

    Ok(())
}

fn show_package_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading package from {:?}...", input);
    let package = load_material_package(input)?;

    println!("\nPackage Info:");
    println!("  Materials: {}", package.materials.len());
    println!("  Textures: {}", package.textures.len());
    println!(
        "  Images: {} ({} compressed, {} CPU-readable)",
        package.images.len(),
        package.compressed_image_count(),
        package.readable_image_count()
    );

    for (index, material) in package.materials.iter().enumerate() {
        let mut extensions = Vec::new();
        if material.specular_glossiness().is_some() {
            extensions.push("KHR_materials_pbrSpecularGlossiness");
        }
        if material.is_unlit() {
            extensions.push("KHR_materials_unlit");
        }
        println!(
            "  #{} '{}' alpha={:?} double_sided={} extensions=[{}]",
            index,
            material.name,
            material.alpha_mode,
            material.double_sided,
            extensions.join(", ")
        );
    }

    Ok(())
}

/// Unique output file names. Repacked textures are keyed by buffer identity,
/// so distinct images sharing a display name never overwrite each other.
#[derive(Default)]
struct OutputNames {
    taken: HashSet<String>,
    textures: HashMap<*const TextureData, String>,
}

impl OutputNames {
    /// Claim `<stem>.<extension>`, or `<stem>_<n>.<extension>` if taken.
    fn reserve(&mut self, stem: &str, extension: &str) -> String {
        let mut file_name = format!("{}.{}", stem, extension);
        let mut suffix = 2;
        while !self.taken.insert(file_name.clone()) {
            file_name = format!("{}_{}.{}", stem, suffix, extension);
            suffix += 1;
        }
        file_name
    }

    /// File name for a repacked texture and whether it still has to be written.
    fn texture(&mut self, texture: &Rc<TextureData>) -> (String, bool) {
        if let Some(file_name) = self.texture_file(texture) {
            return (file_name.to_string(), false);
        }
        let file_name = self.reserve(&sanitize(&texture.name), "png");
        self.textures.insert(Rc::as_ptr(texture), file_name.clone());
        (file_name, true)
    }

    fn texture_file(&self, texture: &Rc<TextureData>) -> Option<&str> {
        self.textures.get(&Rc::as_ptr(texture)).map(String::as_str)
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_names_follow_texture_identity() {
        let mut names = OutputNames::default();
        let a = Rc::new(TextureData::new(1, 1, vec![10; 4]).with_name("ao_occlusion"));
        let b = Rc::new(TextureData::new(1, 1, vec![200; 4]).with_name("ao_occlusion"));

        assert_eq!(names.texture(&a), ("ao_occlusion.png".to_string(), true));
        assert_eq!(names.texture(&b), ("ao_occlusion_2.png".to_string(), true));
        assert_eq!(names.texture(&a), ("ao_occlusion.png".to_string(), false));
        assert_eq!(names.reserve("m", "json"), "m.json");
        assert_eq!(names.reserve("m", "json"), "m_2.json");
    }

    #[test]
    fn test_generate_keeps_same_named_images_apart() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scene.gltf");
        fs::write(
            &input,
            r#"{
                "materials": [
                    {"name": "m", "occlusionTexture": {"index": 0}},
                    {"name": "m", "occlusionTexture": {"index": 1}}
                ],
                "textures": [{"source": 0}, {"source": 1}],
                "images": [{"uri": "a/ao.png"}, {"uri": "b/ao.png"}]
            }"#,
        )
        .unwrap();
        for (folder, value) in [("a", 10u8), ("b", 200u8)] {
            fs::create_dir_all(dir.path().join(folder)).unwrap();
            let png = TextureData::new(1, 1, vec![value, 0, 0, 255]).to_png().unwrap();
            fs::write(dir.path().join(folder).join("ao.png"), png).unwrap();
        }
        let output = dir.path().join("out");

        generate(&input, &output, GeneratorConfig::default()).unwrap();

        let first = fs::read(output.join("ao_occlusion.png")).unwrap();
        let second = fs::read(output.join("ao_occlusion_2.png")).unwrap();
        let first = TextureData::from_png_bytes("first", &first).unwrap();
        let second = TextureData::from_png_bytes("second", &second).unwrap();
        assert_eq!(first.get_pixel(0, 0), Some([10, 10, 10, 255]));
        assert_eq!(second.get_pixel(0, 0), Some([200, 200, 200, 255]));

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output.join("m_2.json")).unwrap()).unwrap();
        assert_eq!(report["owned_resources"][0], "ao_occlusion_2.png");
        assert_eq!(report["material"]["textures"]["_OcclusionMap"], "ao_occlusion_2.png");
        assert!(output.join("m.json").exists());
    }
}
