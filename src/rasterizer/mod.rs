//! Flat-shaded software rasterizer
//!
//! Features:
//! - Homogeneous 4x4 transforms with perspective divide
//! - Backface culling against the camera ray
//! - Painter's algorithm (stable back-to-front sort, no depth buffer)
//! - DDA lines and flat-top / flat-bottom scanline triangle fill

mod light;
mod math;
mod matrix;
mod pipeline;
mod render;
mod types;

pub use light::*;
pub use math::*;
pub use matrix::*;
pub use pipeline::*;
pub use render::*;
pub use types::*;

/// Default framebuffer dimensions
pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;
