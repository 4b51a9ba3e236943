//! Core types for the rasterizer

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// RGBA color (0-255 per channel), packed as ARGB for the framebuffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    pub const YELLOW: Color = Color { r: 255, g: 255, b: 0, a: 255 };
    pub const MAGENTA: Color = Color { r: 255, g: 0, b: 255, a: 255 };
    pub const CYAN: Color = Color { r: 0, g: 255, b: 255, a: 255 };
    pub const GRAY: Color = Color { r: 0x66, g: 0x66, b: 0x66, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack from `0xAARRGGBB`
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Pack as `0xAARRGGBB` (alpha in the most significant byte)
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Apply shading (multiply RGB by intensity clamped to 0.0-1.0, alpha kept)
    pub fn shade(self, intensity: f32) -> Self {
        let i = if intensity.is_nan() { 0.0 } else { intensity.clamp(0.0, 1.0) };
        Self {
            r: (self.r as f32 * i) as u8,
            g: (self.g as f32 * i) as u8,
            b: (self.b as f32 * i) as u8,
            a: self.a,
        }
    }

    /// Convert to [u8; 4] RGBA bytes (macroquad texture upload)
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Swap the red and blue bytes of a packed pixel.
///
/// Decoders hand out RGBA byte order, which reads as `0xAABBGGRR` when loaded
/// as a little-endian word. Swapping bytes 0 and 2 yields `0xAARRGGBB`.
pub const fn swap_red_blue(pixel: u32) -> u32 {
    let a = pixel & 0xFF00_0000;
    let r = (pixel & 0x00FF_0000) >> 16;
    let g = pixel & 0x0000_FF00;
    let b = (pixel & 0x0000_00FF) << 16;
    a | r | g | b
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Pixel data is {got} bytes, expected {expected}")]
    Size { expected: usize, got: usize },
}

/// Decoded image stored as packed ARGB pixels
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
    pub name: String,
}

impl Texture {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::WHITE.to_argb(); width * height],
            name: String::new(),
        }
    }

    /// Load texture from an image file (PNG, JPEG, BMP)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::from_bytes(&bytes, name)
    }

    /// Load texture from encoded image bytes
    pub fn from_bytes(bytes: &[u8], name: String) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width as usize, height as usize, rgba.as_raw(), name)
    }

    /// Build from raw RGBA8 bytes, converting each pixel to ARGB
    pub fn from_rgba8(width: usize, height: usize, data: &[u8], name: String) -> Result<Self, TextureError> {
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(TextureError::Size { expected, got: data.len() });
        }

        let pixels = data
            .chunks_exact(4)
            .map(|p| swap_red_blue(u32::from_le_bytes([p[0], p[1], p[2], p[3]])))
            .collect();

        Ok(Self { width, height, pixels, name })
    }

    /// Get pixel at x,y coordinates
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            Color::from_argb(self.pixels[y * self.width + x])
        } else {
            Color::BLACK
        }
    }
}

/// Which primitives are drawn per triangle. The flags combine freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderMode {
    /// Small square at each projected vertex
    pub vertices: bool,
    /// Triangle outline
    pub wireframe: bool,
    /// Flat-shaded fill
    pub filled: bool,
}

impl RenderMode {
    pub const VERTICES_WIREFRAME: RenderMode = RenderMode { vertices: true, wireframe: true, filled: false };
    pub const WIREFRAME: RenderMode = RenderMode { vertices: false, wireframe: true, filled: false };
    pub const FILLED: RenderMode = RenderMode { vertices: false, wireframe: false, filled: true };
    pub const FILLED_WIREFRAME: RenderMode = RenderMode { vertices: false, wireframe: true, filled: true };

    /// Presets selected by the digit keys 1-4
    pub fn from_preset(index: u8) -> Option<RenderMode> {
        match index {
            1 => Some(Self::VERTICES_WIREFRAME),
            2 => Some(Self::WIREFRAME),
            3 => Some(Self::FILLED),
            4 => Some(Self::FILLED_WIREFRAME),
            _ => None,
        }
    }
}

impl Default for RenderMode {
    fn default() -> Self {
        Self::FILLED_WIREFRAME
    }
}

/// Culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CullMode {
    /// Drop faces pointing away from the camera
    #[default]
    Backface,
    /// Keep every face
    None,
}

/// Per-frame render configuration, passed into the pipeline and rasterizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub mode: RenderMode,
    pub cull: CullMode,
    /// Outline color (drawn over fills)
    pub wire_color: Color,
    /// Vertex marker color
    pub vertex_color: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            cull: CullMode::default(),
            wire_color: Color::WHITE,
            vertex_color: Color::RED,
        }
    }
}
