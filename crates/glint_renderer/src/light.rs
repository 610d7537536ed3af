//! Light sources.
//!
//! Lights report the (unnormalized) vector from a surface point toward
//! themselves, a scalar intensity at that point, and a color. The shadow
//! test uses the unnormalized vector directly, so for positional lights a
//! shadow ray's `t = 1` lands exactly on the light.

use glint_math::{color_from_rgb8, Color, Interval, Rgb8, Vec3};
use serde::Deserialize;

use crate::{DirectionalLight, PointLight, SpotLight};

/// Distance falloff coefficients: `intensity / (c + l·d + q·d²)`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Attenuation {
    pub constant: f64,
    pub linear: f64,
    pub quadratic: f64,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }
}

impl Attenuation {
    /// Attenuate `intensity` over `distance`.
    pub fn apply(&self, intensity: f64, distance: f64) -> f64 {
        intensity / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

/// Light configuration as supplied by scene-building code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightOptions {
    /// Scalar multiplier on the light's contribution
    pub intensity: f64,

    /// Light color (RGB, 0-255)
    pub color: Rgb8,

    /// Distance falloff; constant intensity when absent
    pub attenuation: Option<Attenuation>,
}

impl Default for LightOptions {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            color: [255, 255, 255],
            attenuation: None,
        }
    }
}

impl LightOptions {
    pub(crate) fn normalized_color(&self) -> Color {
        color_from_rgb8(self.color)
    }
}

/// Queries every light variant answers.
pub trait Illuminate {
    /// Vector from `point` toward the light. Not necessarily unit length.
    fn direction_to_light(&self, point: Vec3) -> Vec3;

    /// Light intensity arriving at `point`.
    fn intensity_at(&self, point: Vec3) -> f64;

    /// Light color, [0, 1] per channel.
    fn color(&self) -> Color;

    /// Range of shadow-ray parameters that can occlude this light, for a
    /// shadow ray along `direction_to_light`.
    fn shadow_interval(&self, epsilon: f64) -> Interval;
}

/// A light source. The variant set is closed.
#[derive(Debug, Clone)]
pub enum Light {
    Point(PointLight),
    Directional(DirectionalLight),
    Spot(SpotLight),
}

impl Light {
    /// Vector from `point` toward the light. Not necessarily unit length.
    pub fn direction_to_light(&self, point: Vec3) -> Vec3 {
        match self {
            Light::Point(light) => light.direction_to_light(point),
            Light::Directional(light) => light.direction_to_light(point),
            Light::Spot(light) => light.direction_to_light(point),
        }
    }

    /// Light intensity arriving at `point`.
    pub fn intensity_at(&self, point: Vec3) -> f64 {
        match self {
            Light::Point(light) => light.intensity_at(point),
            Light::Directional(light) => light.intensity_at(point),
            Light::Spot(light) => light.intensity_at(point),
        }
    }

    /// Light color, [0, 1] per channel.
    pub fn color(&self) -> Color {
        match self {
            Light::Point(light) => light.color(),
            Light::Directional(light) => light.color(),
            Light::Spot(light) => light.color(),
        }
    }

    /// Range of shadow-ray parameters that can occlude this light.
    pub fn shadow_interval(&self, epsilon: f64) -> Interval {
        match self {
            Light::Point(light) => light.shadow_interval(epsilon),
            Light::Directional(light) => light.shadow_interval(epsilon),
            Light::Spot(light) => light.shadow_interval(epsilon),
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

impl From<SpotLight> for Light {
    fn from(light: SpotLight) -> Self {
        Light::Spot(light)
    }
}
