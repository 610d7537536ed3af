//! Glint math - vectors, rays, intervals and colors.
//!
//! Everything here is double precision. `Vec3` is glam's `DVec3`, so the
//! usual `dot`, `cross`, `+`, `-` and scalar `*` come straight from glam;
//! this crate only adds the pieces whose semantics the renderer depends on
//! (zero-safe normalization, reflection, color quantization).

// Re-export glam for convenience
pub use glam::{self, DVec2, DVec3};

mod color;
mod interval;
mod ray;
mod vector;

pub use color::{color_from_rgb8, color_to_rgba8, Color, Rgb8};
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{normalize, reflect};

/// 3-component f64 vector used for points, directions and normals.
pub type Vec3 = DVec3;

/// 2-component f64 vector used for texture coordinates.
pub type Vec2 = DVec2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(2.0 * a, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }
}
