//! Geometry pipeline
//! World transform, culling, projection, flat shading and depth ordering

use super::light::Light;
use super::math::{Vec2, Vec3, Vec4};
use super::matrix::{project, Mat4};
use super::render::Framebuffer;
use super::types::{Color, CullMode, RenderSettings};
use crate::mesh::Mesh;

/// Side length of the vertex markers drawn in vertex mode
const VERTEX_MARKER_SIZE: i32 = 6;

/// Camera state. Looks down +Z from `position`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub position: Vec3,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

/// Projected triangle ready for rasterization. Lives for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Screen-space points (y grows downward)
    pub points: [Vec2; 3],
    /// Flat-shaded fill color
    pub color: Color,
    /// Mean camera-space z of the three vertices, before projection
    pub avg_depth: f32,
}

/// Unit face normal for winding A -> B -> C, or `None` for a degenerate face
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Option<Vec3> {
    let ab = (b - a).try_normalize()?;
    let ac = (c - a).try_normalize()?;
    ab.cross(ac).try_normalize()
}

/// Alignment between a face normal and the ray from the face to the camera.
/// Positive when the face looks toward the camera.
pub fn face_alignment(normal: Vec3, a: Vec3, camera: Vec3) -> f32 {
    normal.dot(camera - a)
}

/// Map a projected point from normalized device space to pixels
fn to_screen(p: Vec4, width: usize, height: usize) -> Vec2 {
    let half_w = width as f32 / 2.0;
    let half_h = height as f32 / 2.0;
    // NDC y grows up, screen y grows down
    Vec2::new(p.x * half_w + half_w, -p.y * half_h + half_h)
}

/// Run the mesh through the pipeline and return its visible triangles
/// ordered back to front.
///
/// Faces that cannot be rendered (bad vertex index, zero-area geometry, a
/// vertex on the camera plane) are skipped. Triangles with equal depth keep
/// their face order.
pub fn project_mesh(
    mesh: &Mesh,
    camera: &Camera,
    light: &Light,
    projection: &Mat4,
    settings: &RenderSettings,
    width: usize,
    height: usize,
) -> Vec<Triangle> {
    let world = mesh.world_matrix();
    let mut triangles = Vec::with_capacity(mesh.faces.len());
    let mut skipped = 0usize;

    for face in &mesh.faces {
        let Some(local) = mesh.face_vertices(face) else {
            skipped += 1;
            continue;
        };
        // View space: camera at the origin, looking down +Z
        let [a, b, c] = local.map(|v| world.transform_point(v) - camera.position);

        let Some(normal) = face_normal(a, b, c) else {
            skipped += 1;
            continue;
        };

        if settings.cull == CullMode::Backface && face_alignment(normal, a, Vec3::ZERO) < 0.0 {
            continue;
        }

        let mut points = [Vec2::default(); 3];
        let mut projectable = true;
        for (point, vertex) in points.iter_mut().zip([a, b, c]) {
            match project(projection, Vec4::from_point(vertex)) {
                Some(p) => *point = to_screen(p, width, height),
                None => {
                    projectable = false;
                    break;
                }
            }
        }
        if !projectable {
            skipped += 1;
            continue;
        }

        triangles.push(Triangle {
            points,
            color: light.shade(face.color, normal),
            avg_depth: (a.z + b.z + c.z) / 3.0,
        });
    }

    if skipped > 0 {
        log::trace!("skipped {} unrenderable faces", skipped);
    }

    sort_back_to_front(&mut triangles);
    triangles
}

/// Painter's order: farthest first. `sort_by` is stable, so equal depths
/// keep their emission order.
pub fn sort_back_to_front(triangles: &mut [Triangle]) {
    triangles.sort_by(|a, b| b.avg_depth.total_cmp(&a.avg_depth));
}

/// Rasterize triangles in order according to the render mode
pub fn render_triangles(fb: &mut Framebuffer, triangles: &[Triangle], settings: &RenderSettings) {
    let mode = settings.mode;

    for tri in triangles {
        let [p0, p1, p2] = tri.points;

        if mode.filled {
            fb.draw_filled_triangle(p0, p1, p2, tri.color);
        }

        if mode.wireframe {
            // Outline goes on top of the fill
            fb.draw_triangle(p0, p1, p2, settings.wire_color);
        }

        if mode.vertices {
            let half = VERTEX_MARKER_SIZE / 2;
            for p in tri.points {
                fb.draw_rect(
                    p.x.round() as i32 - half,
                    p.y.round() as i32 - half,
                    VERTEX_MARKER_SIZE,
                    VERTEX_MARKER_SIZE,
                    settings.vertex_color,
                );
            }
        }
    }
}
