//! Point light: emits in all directions from a position.

use glint_math::{Color, Interval, Vec3};

use crate::light::{Attenuation, Illuminate, LightOptions};

/// A light at a position, optionally attenuated with distance.
#[derive(Debug, Clone)]
pub struct PointLight {
    position: Vec3,
    intensity: f64,
    color: Color,
    attenuation: Option<Attenuation>,
}

impl PointLight {
    /// Create a point light at `position`.
    pub fn new(position: Vec3, options: LightOptions) -> Self {
        Self {
            position,
            intensity: options.intensity,
            color: options.normalized_color(),
            attenuation: options.attenuation,
        }
    }

    /// Position of the light.
    pub fn position(&self) -> Vec3 {
        self.position
    }
}

impl Illuminate for PointLight {
    fn direction_to_light(&self, point: Vec3) -> Vec3 {
        self.position - point
    }

    fn intensity_at(&self, point: Vec3) -> f64 {
        match &self.attenuation {
            Some(attenuation) => {
                attenuation.apply(self.intensity, self.position.distance(point))
            }
            None => self.intensity,
        }
    }

    fn color(&self) -> Color {
        self.color
    }

    /// The segment between the point and the light, minus a sliver at each end.
    fn shadow_interval(&self, epsilon: f64) -> Interval {
        Interval::new(epsilon, 1.0 - epsilon)
    }
}
