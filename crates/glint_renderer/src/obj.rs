//! Wavefront OBJ loading for meshes.

use std::io::BufRead;
use std::path::Path;

use glint_core::Material;
use glint_math::{Vec2, Vec3};

use crate::{GeometryError, Mesh, MeshVertex};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

impl Mesh {
    /// Load an OBJ file into a single mesh.
    ///
    /// Every model in the file is merged; polygons are triangulated and
    /// texture coordinates are kept as stored. `.mtl` materials are ignored.
    pub fn load_obj(path: impl AsRef<Path>, material: impl Into<Material>) -> Result<Self, GeometryError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &load_options())?;
        log::debug!("Loaded {} model(s) from {}", models.len(), path.display());

        Self::from_models(&models, material)
    }

    /// Read OBJ data from a buffered reader. `mtllib` references fail to load
    /// and are skipped.
    pub fn read_obj<R: BufRead>(reader: &mut R, material: impl Into<Material>) -> Result<Self, GeometryError> {
        let (models, _materials) =
            tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))?;

        Self::from_models(&models, material)
    }

    fn from_models(models: &[tobj::Model], material: impl Into<Material>) -> Result<Self, GeometryError> {
        if models.is_empty() {
            return Err(GeometryError::NoModels);
        }

        let vertices = models.iter().flat_map(|model| model_vertices(&model.mesh));
        Self::new(vertices, material)
    }
}

/// Unindexed vertex list for one model, three vertices per triangle.
fn model_vertices(mesh: &tobj::Mesh) -> impl Iterator<Item = MeshVertex> + '_ {
    mesh.indices.iter().map(move |&index| {
        let i = index as usize;

        let position = mesh
            .positions
            .get(3 * i..3 * i + 3)
            .map_or(Vec3::ZERO, |p| {
                Vec3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))
            });
        let uv = mesh
            .texcoords
            .get(2 * i..2 * i + 2)
            .map_or(Vec2::ZERO, |t| Vec2::new(f64::from(t[0]), f64::from(t[1])));

        MeshVertex::new(position, uv)
    })
}
