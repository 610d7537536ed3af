//! Sphere primitive for ray tracing.

use glint_core::Material;
use glint_math::{Interval, Ray, Vec3};

use crate::surface::{Intersect, SurfaceHit};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. A negative radius is taken by magnitude.
    pub fn new(center: Vec3, radius: f64, material: impl Into<Material>) -> Self {
        Self {
            center,
            radius: radius.abs(),
            material: material.into(),
        }
    }

    /// Center of the sphere.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Radius of the sphere.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersect for Sphere {
    /// Solve `|O + tD - C|² = r²`, accepting roots strictly inside `ray_t`.
    ///
    /// The nearer root wins whenever it is in range.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // t1 <= t2
        let t1 = (-sqrtd - b) / a;
        if ray_t.surrounds(t1) {
            return Some(SurfaceHit::at(t1));
        }

        let t2 = (sqrtd - b) / a;
        if ray_t.surrounds(t2) {
            return Some(SurfaceHit::at(t2));
        }

        None
    }

    /// Outward normal, never flipped toward the ray.
    fn normal_at(&self, point: Vec3, _ray: &Ray, _hit: &SurfaceHit) -> Vec3 {
        (point - self.center) / self.radius
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
