//! Color conversions at the 8-bit boundaries.
//!
//! Inside the renderer a color is a `Vec3` of linear-ish [0, 1] channels
//! (r, g, b in x, y, z). Values are only clamped when they leave the
//! renderer as bytes.

use crate::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// 8-bit RGB triple as accepted by scene-building code.
pub type Rgb8 = [u8; 3];

/// Convert an 8-bit color to [0, 1] channels.
pub fn color_from_rgb8(rgb: Rgb8) -> Color {
    Color::new(
        rgb[0] as f64 / 255.0,
        rgb[1] as f64 / 255.0,
        rgb[2] as f64 / 255.0,
    )
}

/// Quantize a color to opaque RGBA8.
///
/// Each channel becomes `clamp(floor(c * 255), 0, 255)`; alpha is always 255.
/// NaN channels quantize to 0.
pub fn color_to_rgba8(color: Color) -> [u8; 4] {
    [
        quantize(color.x),
        quantize(color.y),
        quantize(color.z),
        255,
    ]
}

#[inline]
fn quantize(channel: f64) -> u8 {
    // `as` saturates and maps NaN to 0
    (channel * 255.0).floor().clamp(0.0, 255.0) as u8
}
