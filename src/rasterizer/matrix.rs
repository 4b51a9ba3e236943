//! 4x4 transform matrices
//!
//! Row-major storage (`m[row][col]`), column vectors: `M * v`.
//! Composition reads right to left, so `T * R * S` scales first.

use super::math::{Vec3, Vec4};
use std::ops::Mul;

/// Below this |w| a projected point is treated as lying on the camera plane
const W_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][0] = sx;
        out.m[1][1] = sy;
        out.m[2][2] = sz;
        out
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        let mut out = Self::IDENTITY;
        out.m[0][3] = tx;
        out.m[1][3] = ty;
        out.m[2][3] = tz;
        out
    }

    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut out = Self::IDENTITY;
        out.m[1][1] = c;
        out.m[1][2] = -s;
        out.m[2][1] = s;
        out.m[2][2] = c;
        out
    }

    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut out = Self::IDENTITY;
        out.m[0][0] = c;
        out.m[0][2] = s;
        out.m[2][0] = -s;
        out.m[2][2] = c;
        out
    }

    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut out = Self::IDENTITY;
        out.m[0][0] = c;
        out.m[0][1] = -s;
        out.m[1][0] = s;
        out.m[1][1] = c;
        out
    }

    /// Perspective projection for a camera looking down +Z.
    ///
    /// `aspect` is height / width. The output `w` equals the input `z`,
    /// which is what the perspective divide in [`project`] relies on.
    pub fn perspective(fov: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let f = 1.0 / (fov / 2.0).tan();
        let mut m = [[0.0; 4]; 4];
        m[0][0] = aspect * f;
        m[1][1] = f;
        m[2][2] = z_far / (z_far - z_near);
        m[2][3] = (-z_far * z_near) / (z_far - z_near);
        m[3][2] = 1.0;
        Self { m }
    }

    /// World matrix: `Translation * RotZ * RotY * RotX * Scale`
    pub fn world(scale: Vec3, rotation: Vec3, translation: Vec3) -> Self {
        Self::translation(translation.x, translation.y, translation.z)
            * Self::rotation_z(rotation.z)
            * Self::rotation_y(rotation.y)
            * Self::rotation_x(rotation.x)
            * Self::scale(scale.x, scale.y, scale.z)
    }

    pub fn mul_mat(&self, other: &Mat4) -> Mat4 {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        Mat4 { m }
    }

    pub fn mul_vec4(&self, v: Vec4) -> Vec4 {
        let r = |i: usize| {
            self.m[i][0] * v.x + self.m[i][1] * v.y + self.m[i][2] * v.z + self.m[i][3] * v.w
        };
        Vec4::new(r(0), r(1), r(2), r(3))
    }

    /// Transform a point (w = 1) and drop w
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.mul_vec4(Vec4::from_point(p)).xyz()
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, other: Mat4) -> Mat4 {
        self.mul_mat(&other)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        self.mul_vec4(v)
    }
}

/// Multiply by the projection matrix and perform the perspective divide.
///
/// Returns `None` when the point is unprojectable: `w` is (near) zero, i.e.
/// the point lies on the camera plane, or the result is not finite.
pub fn project(proj: &Mat4, v: Vec4) -> Option<Vec4> {
    let mut out = proj.mul_vec4(v);
    if out.w.abs() < W_EPSILON {
        return None;
    }
    out.x /= out.w;
    out.y /= out.w;
    out.z /= out.w;
    out.is_finite().then_some(out)
}
