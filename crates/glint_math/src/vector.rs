//! Vector helpers layered on top of glam.

use crate::Vec3;

/// Normalize a vector, returning it unchanged when its length is zero.
///
/// glam's `normalize` yields NaNs for a zero vector; the renderer instead
/// treats that as a no-op so a degenerate direction never poisons a pixel.
/// Callers must not rely on the result being unit length in that case.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    let length = v.length();
    if length == 0.0 {
        return v;
    }
    v / length
}

/// Mirror `direction` about `normal`: `D - 2(D·N)N`.
///
/// `normal` is expected to be unit length; `direction` keeps its magnitude.
#[inline]
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    direction - 2.0 * direction.dot(normal) * normal
}
