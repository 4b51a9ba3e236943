//! Text geometry loading
//!
//! Reads the `v` / `f` subset of the OBJ format. Parsing is lenient: a
//! vertex or face line that cannot be scanned is skipped and counted, and
//! the rest of the file still loads. Every other line is ignored.

use std::fs;
use std::path::Path;
use thiserror::Error;

use super::model::{Face, Mesh};
use crate::rasterizer::{Color, Vec3};

/// Color given to faces read from a file
pub const DEFAULT_FACE_COLOR: Color = Color::WHITE;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no faces found in geometry")]
    Empty,
}

/// Outcome of a lenient parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// 1-based line numbers of `v` / `f` lines that were dropped
    pub skipped_lines: Vec<usize>,
}

impl Mesh {
    /// Load a mesh from a geometry file.
    ///
    /// Fails if the file cannot be read or yields no faces. Malformed lines
    /// are skipped (see [`parse_obj`]).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Mesh, MeshError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let (mesh, report) = parse_obj(&contents);

        if !report.skipped_lines.is_empty() {
            log::warn!(
                "{}: skipped {} malformed lines (first at line {})",
                path.display(),
                report.skipped_lines.len(),
                report.skipped_lines[0]
            );
        }
        if mesh.is_empty() {
            return Err(MeshError::Empty);
        }

        log::info!(
            "Loaded {}: {} vertices, {} faces",
            path.display(),
            mesh.vertices.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    /// Parse geometry text, ignoring the skip report
    pub fn parse_obj(src: &str) -> Mesh {
        parse_obj(src).0
    }
}

/// Parse geometry text.
///
/// - `v x y z`: vertex; the first three numbers are used
/// - `f a/t/n b/t/n c/t/n` (or `f a b c`): face; only the vertex index is
///   used, and only the first three groups
///
/// A face referring to a vertex not declared above it is skipped like any
/// other malformed line.
pub fn parse_obj(src: &str) -> (Mesh, ParseReport) {
    let mut mesh = Mesh::new();
    let mut report = ParseReport::default();

    for (line_no, line) in src.lines().enumerate() {
        if let Some(rest) = line.strip_prefix("v ") {
            match parse_vertex(rest) {
                Some(v) => mesh.vertices.push(v),
                None => report.skipped_lines.push(line_no + 1),
            }
        } else if let Some(rest) = line.strip_prefix("f ") {
            match parse_face(rest, mesh.vertices.len()) {
                Some(f) => mesh.faces.push(f),
                None => report.skipped_lines.push(line_no + 1),
            }
        }
    }

    (mesh, report)
}

fn parse_vertex(rest: &str) -> Option<Vec3> {
    let mut nums = rest.split_whitespace().map(|s| s.parse::<f32>());
    let x = nums.next()?.ok()?;
    let y = nums.next()?.ok()?;
    let z = nums.next()?.ok()?;
    let v = Vec3::new(x, y, z);
    v.is_finite().then_some(v)
}

fn parse_face(rest: &str, vertex_count: usize) -> Option<Face> {
    let mut groups = rest.split_whitespace().map(|group| {
        let index = group.split('/').next()?;
        let index: usize = index.parse().ok()?;
        (1..=vertex_count).contains(&index).then_some(index)
    });
    let a = groups.next()??;
    let b = groups.next()??;
    let c = groups.next()??;
    Some(Face::new(a, b, c, DEFAULT_FACE_COLOR))
}
