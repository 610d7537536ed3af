//! Pinhole camera for primary ray generation.

use glint_math::{normalize, Ray, Vec3};

use crate::RenderOptions;

/// Camera basis plus the pixel-grid offsets for one target resolution.
///
/// `up` is used as given (normalized, not re-orthogonalized against
/// `front`); only `right` is derived.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,

    /// `front` scaled by the projection distance
    world_front: Vec3,
    x_offset: f64,
    y_offset: f64,
}

impl Camera {
    /// Create a camera for a `width` x `height` target.
    ///
    /// `vertical_fov` is in radians.
    pub fn new(position: Vec3, view_dir: Vec3, up: Vec3, vertical_fov: f64, width: u32, height: u32) -> Self {
        let front = normalize(view_dir);
        let up = normalize(up);
        let right = normalize(front.cross(up));

        let width = f64::from(width);
        let height = f64::from(height);
        let z = height / (vertical_fov / 2.0).tan();

        Self {
            position,
            front,
            up,
            right,
            world_front: front * z,
            x_offset: 0.5 - width / 2.0,
            y_offset: height / 2.0 - 0.5,
        }
    }

    pub fn from_options(options: &RenderOptions) -> Self {
        Self::new(
            options.camera_position,
            options.view_dir,
            options.camera_up,
            options.vertical_fov,
            options.target_width,
            options.target_height,
        )
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Primary ray through pixel `(i, j)` (column, row from the top-left),
    /// shifted by a sub-pixel offset `(dx, dy)`. `dy` points up.
    ///
    /// The direction is not normalized.
    pub fn ray_for(&self, i: u32, j: u32, dx: f64, dy: f64) -> Ray {
        let vertical = self.y_offset - f64::from(j) + dy;
        let horizontal = f64::from(i) + self.x_offset + dx;
        let direction = self.world_front + self.up * vertical + self.right * horizontal;
        Ray::new(self.position, direction)
    }
}
