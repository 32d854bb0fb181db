//! Render state presets for the Standard shader's rendering modes.

use super::Keyword;
use serde::Serialize;

/// Render queue constants.
pub mod render_queue {
    pub const GEOMETRY: u32 = 2000;
    pub const ALPHA_TEST: u32 = 2450;
    pub const TRANSPARENT: u32 = 3000;
}

/// Standard shader `_Mode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderMode {
    Opaque = 0,
    Cutout = 1,
    Fade = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

/// Face culling. Generated materials always cull back faces; double-sided
/// descriptors are reported instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CullMode {
    Back,
}

/// Blend, depth and cull configuration of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlendState {
    pub mode: RenderMode,
    pub src_blend: BlendFactor,
    pub dst_blend: BlendFactor,
    pub z_write: bool,
    pub render_queue: u32,
    pub cull: CullMode,
}

impl BlendState {
    pub fn opaque() -> Self {
        Self {
            mode: RenderMode::Opaque,
            src_blend: BlendFactor::One,
            dst_blend: BlendFactor::Zero,
            z_write: true,
            render_queue: render_queue::GEOMETRY,
            cull: CullMode::Back,
        }
    }

    /// Alpha-tested: opaque blending, fragments below the cutoff discarded.
    pub fn cutout() -> Self {
        Self {
            mode: RenderMode::Cutout,
            render_queue: render_queue::ALPHA_TEST,
            ..Self::opaque()
        }
    }

    /// Alpha-blended, no depth writes.
    pub fn fade() -> Self {
        Self {
            mode: RenderMode::Fade,
            src_blend: BlendFactor::SrcAlpha,
            dst_blend: BlendFactor::OneMinusSrcAlpha,
            z_write: false,
            render_queue: render_queue::TRANSPARENT,
            cull: CullMode::Back,
        }
    }

    /// The shader keyword that goes with this mode, if any.
    pub fn keyword(&self) -> Option<Keyword> {
        match self.mode {
            RenderMode::Opaque => None,
            RenderMode::Cutout => Some(Keyword::AlphaTestOn),
            RenderMode::Fade => Some(Keyword::AlphaBlendOn),
        }
    }
}

impl Default for BlendState {
    fn default() -> Self {
        Self::opaque()
    }
}
