//! Mesh data structures

use crate::rasterizer::{Color, Mat4, Vec3};

/// A triangle face: three 1-based indices into the vertex list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub color: Color,
}

impl Face {
    pub const fn new(a: usize, b: usize, c: usize, color: Color) -> Self {
        Self { a, b, c, color }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

/// Vertices, faces and the transform applied to all of them
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,
    pub scale: Vec3,
    pub translation: Vec3,
}

const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0), // 1
    Vec3::new(-1.0, 1.0, -1.0),  // 2
    Vec3::new(1.0, 1.0, -1.0),   // 3
    Vec3::new(1.0, -1.0, -1.0),  // 4
    Vec3::new(1.0, 1.0, 1.0),    // 5
    Vec3::new(1.0, -1.0, 1.0),   // 6
    Vec3::new(-1.0, 1.0, 1.0),   // 7
    Vec3::new(-1.0, -1.0, 1.0),  // 8
];

const CUBE_FACES: [Face; 12] = [
    // front
    Face::new(1, 2, 3, Color::RED),
    Face::new(1, 3, 4, Color::RED),
    // right
    Face::new(4, 3, 5, Color::GREEN),
    Face::new(4, 5, 6, Color::GREEN),
    // back
    Face::new(6, 5, 7, Color::BLUE),
    Face::new(6, 7, 8, Color::BLUE),
    // left
    Face::new(8, 7, 2, Color::YELLOW),
    Face::new(8, 2, 1, Color::YELLOW),
    // top
    Face::new(2, 7, 5, Color::MAGENTA),
    Face::new(2, 5, 3, Color::MAGENTA),
    // bottom
    Face::new(6, 8, 1, Color::CYAN),
    Face::new(6, 1, 4, Color::CYAN),
];

impl Mesh {
    /// Empty mesh with identity transform
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            translation: Vec3::ZERO,
        }
    }

    /// Unit cube (corners at +-1), two faces per side, one color per side,
    /// placed 5 units in front of the camera
    pub fn builtin_cube() -> Self {
        Self {
            vertices: CUBE_VERTICES.to_vec(),
            faces: CUBE_FACES.to_vec(),
            translation: Vec3::new(0.0, 0.0, 5.0),
            ..Self::new()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Resolve a face's 1-based indices. `None` if any index is out of range.
    pub fn face_vertices(&self, face: &Face) -> Option<[Vec3; 3]> {
        let lookup = |i: usize| i.checked_sub(1).and_then(|i| self.vertices.get(i)).copied();
        Some([lookup(face.a)?, lookup(face.b)?, lookup(face.c)?])
    }

    /// `Translation * RotZ * RotY * RotX * Scale` for the current transform
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::world(self.scale, self.rotation, self.translation)
    }

    /// Advance the rotation by `angular_velocity` (radians per second)
    pub fn update(&mut self, dt: f32, angular_velocity: Vec3) {
        self.rotation = self.rotation + angular_velocity * dt;
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_cube_counts() {
        let cube = Mesh::builtin_cube();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.faces.len(), 12);
        for face in &cube.faces {
            for i in face.indices() {
                assert!((1..=8).contains(&i));
            }
            assert!(cube.face_vertices(face).is_some());
        }
    }

    #[test]
    fn builtin_cube_sides_share_color() {
        let cube = Mesh::builtin_cube();
        for pair in cube.faces.chunks(2) {
            assert_eq!(pair[0].color, pair[1].color);
        }
    }

    #[test]
    fn face_lookup_is_one_based() {
        let cube = Mesh::builtin_cube();
        let verts = cube.face_vertices(&Face::new(1, 2, 8, Color::WHITE)).unwrap();
        assert_eq!(verts[0], CUBE_VERTICES[0]);
        assert_eq!(verts[2], CUBE_VERTICES[7]);

        assert_eq!(cube.face_vertices(&Face::new(0, 1, 2, Color::WHITE)), None);
        assert_eq!(cube.face_vertices(&Face::new(1, 2, 9, Color::WHITE)), None);
    }

    #[test]
    fn update_scales_with_time() {
        let mut mesh = Mesh::new();
        let velocity = Vec3::new(0.3, 0.6, 0.9);
        mesh.update(0.5, velocity);
        mesh.update(0.5, velocity);
        assert!((mesh.rotation.x - 0.3).abs() < 1e-6);
        assert!((mesh.rotation.y - 0.6).abs() < 1e-6);
        assert!((mesh.rotation.z - 0.9).abs() < 1e-6);
    }

    #[test]
    fn world_matrix_places_cube() {
        let cube = Mesh::builtin_cube();
        let p = cube.world_matrix().transform_point(CUBE_VERTICES[0]);
        assert_eq!(p, Vec3::new(-1.0, -1.0, 4.0));
    }
}
