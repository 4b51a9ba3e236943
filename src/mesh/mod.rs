//! Mesh module - the single rendered object
//!
//! - Vertex list and 1-based indexed triangle faces with flat colors
//! - Uniform scale / rotation / translation applied every frame
//! - Builtin cube and a lenient text geometry loader

mod model;
mod obj;

pub use model::*;
pub use obj::*;
