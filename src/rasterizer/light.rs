//! Directional lighting

use super::math::Vec3;
use super::types::Color;

/// A single directional light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Normalized direction the light travels in
    pub direction: Vec3,
}

impl Light {
    /// Falls back to +Z (straight into the screen) for a zero direction.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.try_normalize().unwrap_or(Vec3::new(0.0, 0.0, 1.0)),
        }
    }

    /// Unclamped alignment between a face normal and the incoming light.
    /// 1.0 when the face looks straight into the light.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        -normal.dot(self.direction)
    }

    /// Flat-shade a base color for a face with the given normal
    pub fn shade(&self, base: Color, normal: Vec3) -> Color {
        base.shade(self.intensity(normal))
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_light_is_full_brightness() {
        let light = Light::default();
        let normal = Vec3::new(0.0, 0.0, -1.0);
        assert!((light.intensity(normal) - 1.0).abs() < 1e-6);
        assert_eq!(light.shade(Color::RED, normal), Color::RED);
    }

    #[test]
    fn facing_away_is_black() {
        let light = Light::default();
        let shaded = light.shade(Color::WHITE, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(shaded, Color::BLACK);
    }

    #[test]
    fn direction_is_normalized() {
        let light = Light::new(Vec3::new(0.0, 3.0, 4.0));
        assert!((light.direction.len() - 1.0).abs() < 1e-6);
        assert_eq!(Light::new(Vec3::ZERO), Light::default());
    }
}
