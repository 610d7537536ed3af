//! Triangle mesh surface.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection and a
//! brute-force scan over all triangles. Shading is flat: every point on a
//! triangle gets its face normal.

use std::sync::Arc;

use glint_core::{Material, Texture};
use glint_math::{normalize, Color, Interval, Ray, Vec2, Vec3};
use thiserror::Error;

use crate::surface::{Intersect, SurfaceHit, EPSILON};

/// Errors raised while building geometry.
#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("mesh requires a multiple of 3 vertices, got {vertex_count}")]
    InvalidGeometry { vertex_count: usize },

    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("no models found in OBJ file")]
    NoModels,
}

/// A mesh vertex: position plus texture coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub uv: Vec2,
}

impl MeshVertex {
    pub fn new(position: Vec3, uv: Vec2) -> Self {
        Self { position, uv }
    }
}

impl From<Vec3> for MeshVertex {
    fn from(position: Vec3) -> Self {
        Self::new(position, Vec2::ZERO)
    }
}

/// A single triangle with its edges and face normal precomputed.
#[derive(Debug, Clone)]
pub struct Triangle {
    vertex_a: MeshVertex,
    vertex_b: MeshVertex,
    vertex_c: MeshVertex,
    edge_ab: Vec3,
    edge_ac: Vec3,
    /// Unit face normal, from counter-clockwise winding
    normal: Vec3,
}

impl Triangle {
    /// Create a triangle from three vertices in counter-clockwise order.
    pub fn new(a: MeshVertex, b: MeshVertex, c: MeshVertex) -> Self {
        let edge_ab = b.position - a.position;
        let edge_ac = c.position - a.position;

        Self {
            vertex_a: a,
            vertex_b: b,
            vertex_c: c,
            edge_ab,
            edge_ac,
            normal: normalize(edge_ab.cross(edge_ac)),
        }
    }

    /// Positions of the three vertices.
    pub fn vertices(&self) -> [Vec3; 3] {
        [
            self.vertex_a.position,
            self.vertex_b.position,
            self.vertex_c.position,
        ]
    }

    /// Unit face normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Möller-Trumbore ray-triangle intersection.
    ///
    /// Returns `t` for hits with `t > EPSILON`; range checks against the
    /// caller's interval happen in `Mesh`.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let h = ray.direction().cross(self.edge_ac);
        let a = self.edge_ab.dot(h);

        // Ray is parallel to triangle
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.vertex_a.position;
        let u = f * s.dot(h);
        if !Interval::UNIT.contains(u) {
            return None;
        }

        let q = s.cross(self.edge_ab);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * self.edge_ac.dot(q);
        (t > EPSILON).then_some(t)
    }

    /// Barycentric weights of `point` for vertices A, B and C.
    ///
    /// Weights sum to one; all are in [0, 1] when the point lies inside
    /// the triangle.
    pub fn barycentric(&self, point: Vec3) -> Vec3 {
        let ap = point - self.vertex_a.position;
        let d00 = self.edge_ab.dot(self.edge_ab);
        let d01 = self.edge_ab.dot(self.edge_ac);
        let d11 = self.edge_ac.dot(self.edge_ac);
        let d20 = ap.dot(self.edge_ab);
        let d21 = ap.dot(self.edge_ac);
        let denom = d00 * d11 - d01 * d01;

        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        Vec3::new(1.0 - v - w, v, w)
    }

    /// Interpolated texture coordinates at `point`.
    pub fn uv_at(&self, point: Vec3) -> Vec2 {
        let weights = self.barycentric(point);
        self.vertex_a.uv * weights.x + self.vertex_b.uv * weights.y + self.vertex_c.uv * weights.z
    }
}

/// A triangle soup sharing one material and an optional texture.
#[derive(Debug, Clone)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    material: Material,
    texture: Option<Arc<Texture>>,
}

impl Mesh {
    /// Build a mesh from a flat vertex list, three vertices per triangle.
    ///
    /// The mesh starts untextured; bind a texture with [`Mesh::with_texture`]
    /// to sample diffuse color at interpolated UVs.
    pub fn new<V>(
        vertices: impl IntoIterator<Item = V>,
        material: impl Into<Material>,
    ) -> Result<Self, GeometryError>
    where
        V: Into<MeshVertex>,
    {
        let vertices: Vec<MeshVertex> = vertices.into_iter().map(Into::into).collect();
        if vertices.len() % 3 != 0 {
            return Err(GeometryError::InvalidGeometry {
                vertex_count: vertices.len(),
            });
        }

        let triangles: Vec<Triangle> = vertices
            .chunks_exact(3)
            .map(|tri| Triangle::new(tri[0], tri[1], tri[2]))
            .collect();

        log::debug!("Built mesh with {} triangles", triangles.len());

        Ok(Self {
            triangles,
            material: material.into(),
            texture: None,
        })
    }

    /// Bind a texture for diffuse color lookup.
    pub fn with_texture(mut self, texture: Arc<Texture>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Triangles in declaration order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Get the number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Intersect for Mesh {
    /// Closest triangle hit with `t` in `[ray_t.min, ray_t.max)`.
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit> {
        let mut closest: Option<SurfaceHit> = None;
        let mut closest_so_far = ray_t.max;

        for (idx, triangle) in self.triangles.iter().enumerate() {
            if let Some(t) = triangle.intersect(ray) {
                if ray_t.with_max(closest_so_far).contains_half_open(t) {
                    closest_so_far = t;
                    closest = Some(SurfaceHit {
                        t,
                        primitive: Some(idx),
                    });
                }
            }
        }

        closest
    }

    /// Face normal of the triangle that was hit.
    fn normal_at(&self, _point: Vec3, _ray: &Ray, hit: &SurfaceHit) -> Vec3 {
        hit.primitive
            .and_then(|idx| self.triangles.get(idx))
            .map_or(Vec3::ZERO, Triangle::normal)
    }

    fn material(&self) -> &Material {
        &self.material
    }

    /// Texture sample at the interpolated UV, or the material color.
    fn diffuse_color(&self, point: Vec3, hit: &SurfaceHit) -> Color {
        let triangle = hit.primitive.and_then(|idx| self.triangles.get(idx));
        match (&self.texture, triangle) {
            (Some(texture), Some(triangle)) => {
                let uv = triangle.uv_at(point);
                texture.sample(uv.x, uv.y)
            }
            _ => self.material.diffuse_color,
        }
    }
}
