//! Surface shading parameters.

use glint_math::{color_from_rgb8, Color, Rgb8};
use serde::Deserialize;

/// Default Blinn-Phong exponent; high enough to give a tight highlight.
pub const DEFAULT_SPECULAR_EXPONENT: f64 = 512.0;

/// Default diffuse color for surfaces that don't declare one.
pub const DEFAULT_COLOR: Rgb8 = [100, 100, 100];

/// Material configuration as supplied by scene-building code.
///
/// Colors are 8-bit; every field is optional when deserializing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaterialOptions {
    /// Diffuse color (RGB, 0-255)
    pub color: Rgb8,

    /// Blinn-Phong specular exponent (must be > 0)
    pub specular_exp: f64,

    /// Mirror blend factor (0 = matte, 1 = perfect mirror)
    pub reflectiveness: f64,
}

impl Default for MaterialOptions {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            specular_exp: DEFAULT_SPECULAR_EXPONENT,
            reflectiveness: 0.0,
        }
    }
}

/// Normalized shading parameters owned by a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Diffuse/albedo color (RGB, 0-1)
    pub diffuse_color: Color,

    /// Blinn-Phong specular exponent (> 0)
    pub specular_exponent: f64,

    /// Reflectiveness in [0, 1]
    pub reflectiveness: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(&MaterialOptions::default())
    }
}

impl Material {
    /// Normalize material options.
    ///
    /// A non-positive or non-finite exponent falls back to the default, and
    /// reflectiveness is clamped into [0, 1].
    pub fn new(options: &MaterialOptions) -> Self {
        let specular_exponent = if options.specular_exp.is_finite() && options.specular_exp > 0.0 {
            options.specular_exp
        } else {
            DEFAULT_SPECULAR_EXPONENT
        };

        let reflectiveness = if options.reflectiveness.is_nan() {
            0.0
        } else {
            options.reflectiveness.clamp(0.0, 1.0)
        };

        Self {
            diffuse_color: color_from_rgb8(options.color),
            specular_exponent,
            reflectiveness,
        }
    }

    /// Check if shading this material spawns a reflection ray.
    pub fn is_reflective(&self) -> bool {
        self.reflectiveness != 0.0
    }
}

impl From<MaterialOptions> for Material {
    fn from(options: MaterialOptions) -> Self {
        Self::new(&options)
    }
}
