//! Directional light: no position, one direction everywhere.

use glint_math::{normalize, Color, Interval, Vec3};

use crate::light::{Illuminate, LightOptions};

/// A light infinitely far away, like the sun.
///
/// Attenuation is ignored: intensity is the same at every point.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    /// Unit vector pointing toward the light
    to_light: Vec3,
    intensity: f64,
    color: Color,
}

impl DirectionalLight {
    /// Create a directional light from the direction the light travels in.
    ///
    /// A zero direction falls back to light travelling along +Z.
    pub fn new(direction: Vec3, options: LightOptions) -> Self {
        let to_light = match normalize(-direction) {
            v if v == Vec3::ZERO => -Vec3::Z,
            v => v,
        };

        Self {
            to_light,
            intensity: options.intensity,
            color: options.normalized_color(),
        }
    }
}

impl Illuminate for DirectionalLight {
    fn direction_to_light(&self, _point: Vec3) -> Vec3 {
        self.to_light
    }

    fn intensity_at(&self, _point: Vec3) -> f64 {
        self.intensity
    }

    fn color(&self) -> Color {
        self.color
    }

    /// No light position bounds the shadow ray.
    fn shadow_interval(&self, epsilon: f64) -> Interval {
        Interval::from_min(epsilon)
    }
}
