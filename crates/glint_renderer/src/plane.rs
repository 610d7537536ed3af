//! Infinite plane primitive.

use glint_core::Material;
use glint_math::{normalize, Interval, Ray, Vec3};

use crate::surface::{Intersect, SurfaceHit, EPSILON};

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    normal: Vec3,
    point: Vec3,
    material: Material,
}

impl Plane {
    /// Create a new plane. The normal is normalized on construction.
    pub fn new(normal: Vec3, point: Vec3, material: impl Into<Material>) -> Self {
        Self {
            normal: normalize(normal),
            point,
            material: material.into(),
        }
    }

    /// Unit normal as declared (front face).
    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Intersect for Plane {
    /// Rays within `EPSILON` of parallel never hit. `t` must lie strictly
    /// inside `ray_t`.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let denom = ray.direction().dot(self.normal);
        if denom.abs() < EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        ray_t.surrounds(t).then(|| SurfaceHit::at(t))
    }

    /// The normal facing the incoming ray.
    fn normal_at(&self, _point: Vec3, ray: &Ray, _hit: &SurfaceHit) -> Vec3 {
        if ray.direction().dot(self.normal) > 0.0 {
            -self.normal
        } else {
            self.normal
        }
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
