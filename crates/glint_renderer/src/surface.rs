//! Surface enum and Intersection record for ray-surface queries.

use glint_core::Material;
use glint_math::{Color, Interval, Ray, Vec3};

use crate::{Mesh, Plane, Sphere};

/// Tolerance for parallel-ray rejection and near-zero triangle hits.
pub const EPSILON: f64 = 1e-6;

/// Where a ray struck a single surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Ray parameter of the hit
    pub t: f64,
    /// Index of the triangle hit, for meshes
    pub primitive: Option<usize>,
}

impl SurfaceHit {
    /// Hit on a surface without sub-primitives.
    pub fn at(t: f64) -> Self {
        Self { t, primitive: None }
    }
}

/// Record of the closest ray-surface intersection.
///
/// Lives for one trace call only; it borrows the surface it refers to.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// The surface that was hit
    pub surface: &'a Surface,
    /// Ray parameter where the intersection occurs
    pub t: f64,
    /// Index of the triangle hit, for meshes
    pub primitive: Option<usize>,
}

impl<'a> Intersection<'a> {
    fn new(surface: &'a Surface, hit: SurfaceHit) -> Self {
        Self {
            surface,
            t: hit.t,
            primitive: hit.primitive,
        }
    }

    /// The primitive-level hit this intersection was built from.
    pub fn hit(&self) -> SurfaceHit {
        SurfaceHit {
            t: self.t,
            primitive: self.primitive,
        }
    }
}

/// Geometry queries every surface variant answers.
pub trait Intersect {
    /// Find the nearest hit with `t` inside `ray_t`, if any.
    ///
    /// Each variant decides whether the interval endpoints are open; see the
    /// variant docs.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit>;

    /// Surface normal at a point previously returned by `intersect`.
    fn normal_at(&self, point: Vec3, ray: &Ray, hit: &SurfaceHit) -> Vec3;

    /// Shading parameters of this surface.
    fn material(&self) -> &Material;

    /// Diffuse color at a hit point. Defaults to the material color.
    fn diffuse_color(&self, _point: Vec3, _hit: &SurfaceHit) -> Color {
        self.material().diffuse_color
    }
}

/// A renderable surface. The variant set is closed.
#[derive(Debug, Clone)]
pub enum Surface {
    Sphere(Sphere),
    Plane(Plane),
    Mesh(Mesh),
}

impl Surface {
    /// Test if a ray hits this surface within the given interval.
    pub fn find_intersection(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'_>> {
        let hit = match self {
            Surface::Sphere(sphere) => sphere.intersect(ray, ray_t),
            Surface::Plane(plane) => plane.intersect(ray, ray_t),
            Surface::Mesh(mesh) => mesh.intersect(ray, ray_t),
        };
        hit.map(|hit| Intersection::new(self, hit))
    }

    /// Normal at `point` for an intersection produced by this surface.
    pub fn normal_at(&self, point: Vec3, ray: &Ray, intersection: &Intersection<'_>) -> Vec3 {
        let hit = intersection.hit();
        match self {
            Surface::Sphere(sphere) => sphere.normal_at(point, ray, &hit),
            Surface::Plane(plane) => plane.normal_at(point, ray, &hit),
            Surface::Mesh(mesh) => mesh.normal_at(point, ray, &hit),
        }
    }

    /// Diffuse color at `point`, sampling the texture where one is bound.
    pub fn diffuse_color(&self, point: Vec3, intersection: &Intersection<'_>) -> Color {
        let hit = intersection.hit();
        match self {
            Surface::Sphere(sphere) => sphere.diffuse_color(point, &hit),
            Surface::Plane(plane) => plane.diffuse_color(point, &hit),
            Surface::Mesh(mesh) => mesh.diffuse_color(point, &hit),
        }
    }

    /// Shading parameters of this surface.
    pub fn material(&self) -> &Material {
        match self {
            Surface::Sphere(sphere) => sphere.material(),
            Surface::Plane(plane) => plane.material(),
            Surface::Mesh(mesh) => mesh.material(),
        }
    }
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}

impl From<Plane> for Surface {
    fn from(plane: Plane) -> Self {
        Surface::Plane(plane)
    }
}

impl From<Mesh> for Surface {
    fn from(mesh: Mesh) -> Self {
        Surface::Mesh(mesh)
    }
}
