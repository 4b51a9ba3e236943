//! Flatcube: flat-shaded software rasterizer
//!
//! Renders one rotating mesh per frame entirely on the CPU:
//! - Homogeneous transforms and perspective projection
//! - Backface culling and flat per-face lighting
//! - Painter's algorithm ordering
//! - DDA lines and scanline triangle fill into an ARGB framebuffer

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod app;
pub mod config;
pub mod input;
pub mod mesh;
pub mod rasterizer;
