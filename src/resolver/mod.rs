//! Texture resolution.
//!
//! This module follows a material's texture references through the texture
//! table to decoded images, honoring compressed-format source overrides.

pub mod texture_resolver;

pub use texture_resolver::{ResolvedTexture, TextureResolver};
