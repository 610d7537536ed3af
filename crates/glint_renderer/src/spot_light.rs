//! Spot light: a point light restricted to a cone.

use std::f64::consts::PI;

use glint_math::{normalize, Color, Interval, Vec3};
use serde::Deserialize;

use crate::light::{Attenuation, Illuminate, LightOptions};

/// Cone configuration for a [`SpotLight`], angles in radians.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpotOptions {
    /// Half-angle of the fully lit cone
    pub cone_angle: f64,

    /// Half-angle where the light reaches zero. Defaults to `cone_angle`.
    pub cone_outer_angle: Option<f64>,
}

impl Default for SpotOptions {
    fn default() -> Self {
        Self {
            cone_angle: PI / 12.0,
            cone_outer_angle: None,
        }
    }
}

/// A point light whose intensity fades out between two cone angles
/// around its axis.
#[derive(Debug, Clone)]
pub struct SpotLight {
    position: Vec3,
    /// Unit vector the cone points along
    axis: Vec3,
    intensity: f64,
    color: Color,
    attenuation: Option<Attenuation>,
    cos_inner: f64,
    cos_outer: f64,
}

impl SpotLight {
    /// Create a spot light at `position` shining along `direction`.
    ///
    /// An outer angle smaller than the inner angle is raised to match it.
    pub fn new(position: Vec3, direction: Vec3, options: LightOptions, cone: SpotOptions) -> Self {
        let inner = cone.cone_angle.abs();
        let outer = cone.cone_outer_angle.map_or(inner, |angle| angle.abs().max(inner));

        Self {
            position,
            axis: normalize(direction),
            intensity: options.intensity,
            color: options.normalized_color(),
            attenuation: options.attenuation,
            cos_inner: inner.cos(),
            cos_outer: outer.cos(),
        }
    }

    /// Position of the light.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Unit direction the cone points along.
    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    /// Angular falloff in [0, 1] for a point seen from the light.
    fn falloff(&self, point: Vec3) -> f64 {
        let cos_angle = normalize(point - self.position).dot(self.axis);
        if cos_angle <= self.cos_outer {
            return 0.0;
        }

        let penumbra = self.cos_inner - self.cos_outer;
        if penumbra <= 0.0 {
            return 1.0;
        }

        ((cos_angle - self.cos_outer) / penumbra).clamp(0.0, 1.0)
    }
}

impl Illuminate for SpotLight {
    fn direction_to_light(&self, point: Vec3) -> Vec3 {
        self.position - point
    }

    fn intensity_at(&self, point: Vec3) -> f64 {
        let falloff = self.falloff(point);
        if falloff == 0.0 {
            return 0.0;
        }

        let base = match &self.attenuation {
            Some(attenuation) => {
                attenuation.apply(self.intensity, self.position.distance(point))
            }
            None => self.intensity,
        };
        base * falloff
    }

    fn color(&self) -> Color {
        self.color
    }

    fn shadow_interval(&self, epsilon: f64) -> Interval {
        Interval::new(epsilon, 1.0 - epsilon)
    }
}
