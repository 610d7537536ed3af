//! Render entry points, options and anti-aliasing.
//!
//! A render call checks the target size, builds a [`Scene`] and [`Camera`]
//! from the options, and fills the caller's RGBA8 buffer bucket by bucket.
//! Output is row-major, top row first, 4 bytes per pixel, alpha always 255.

use std::f64::consts::FRAC_PI_4;
use std::time::Instant;

use glint_math::{Color, Interval, Rgb8, Vec3};
use image::RgbaImage;
use rayon::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::bucket::{generate_buckets, render_bucket, Bucket, CancelToken, DEFAULT_BUCKET_ROWS};
use crate::scene::DEFAULT_AMBIENT_LIGHT;
use crate::{Camera, Light, Scene, Surface, EPSILON};

/// Default recursion depth: primary hit plus one bounce.
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Errors that can abort a render call.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render target has {len} bytes, expected {width}x{height}x4")]
    SizeMismatch { len: usize, width: u32, height: u32 },

    #[error("render cancelled")]
    Cancelled,

    #[error("unsupported SSAA sample count {0} (expected 0, 4 or 16)")]
    UnsupportedSsaa(u32),

    #[error("invalid render options: {0}")]
    Options(#[from] serde_json::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Supersampling mode: a square grid of samples per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "u32")]
pub enum Ssaa {
    /// One ray through the pixel center
    #[default]
    Off,
    /// 2x2 grid
    X4,
    /// 4x4 grid
    X16,
}

impl Ssaa {
    /// Number of samples per pixel.
    pub fn samples(self) -> u32 {
        match self {
            Ssaa::Off => 1,
            Ssaa::X4 => 4,
            Ssaa::X16 => 16,
        }
    }

    /// Sub-pixel offsets along one axis, `k / samples` for odd `k`.
    pub fn offsets(self) -> &'static [f64] {
        match self {
            Ssaa::Off => &[0.0],
            Ssaa::X4 => &[-0.25, 0.25],
            Ssaa::X16 => &[-3.0 / 16.0, -1.0 / 16.0, 1.0 / 16.0, 3.0 / 16.0],
        }
    }
}

impl TryFrom<u32> for Ssaa {
    type Error = RenderError;

    fn try_from(samples: u32) -> Result<Self, Self::Error> {
        match samples {
            0 => Ok(Ssaa::Off),
            4 => Ok(Ssaa::X4),
            16 => Ok(Ssaa::X16),
            other => Err(RenderError::UnsupportedSsaa(other)),
        }
    }
}

/// Configuration for one render call.
///
/// Deserializes from camelCase JSON with every field optional; vectors are
/// `[x, y, z]` arrays and colors `[r, g, b]` bytes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    pub camera_position: Vec3,

    /// Normalized before use
    pub view_dir: Vec3,

    /// Normalized before use
    pub camera_up: Vec3,

    /// Vertical field of view in radians
    #[serde(alias = "verticalFOV")]
    pub vertical_fov: f64,

    /// Color for rays that hit nothing
    pub background: Rgb8,

    pub ambient_light: f64,
    pub target_width: u32,
    pub target_height: u32,
    pub ssaa: Ssaa,

    /// Recursion limit; 1 means primary hits only, no reflections
    pub max_depth: u32,

    /// Offset for shadow and reflection rays
    pub epsilon: f64,

    /// Scanlines per bucket
    pub bucket_rows: u32,

    /// Render buckets on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            camera_position: Vec3::ZERO,
            view_dir: -Vec3::Z,
            camera_up: Vec3::Y,
            vertical_fov: FRAC_PI_4,
            background: [0, 0, 0],
            ambient_light: DEFAULT_AMBIENT_LIGHT,
            target_width: 1280,
            target_height: 720,
            ssaa: Ssaa::Off,
            max_depth: DEFAULT_MAX_DEPTH,
            epsilon: EPSILON,
            bucket_rows: DEFAULT_BUCKET_ROWS,
            parallel: true,
        }
    }
}

impl RenderOptions {
    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set target resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.target_width = width;
        self.target_height = height;
        self
    }

    /// Required length of the RGBA8 target buffer.
    pub fn target_len(&self) -> usize {
        self.target_width as usize * self.target_height as usize * 4
    }
}

/// Color of pixel `(i, j)`, averaged over the supersampling grid.
///
/// Rays that escape contribute the background color.
pub fn render_pixel(scene: &Scene<'_>, camera: &Camera, options: &RenderOptions, i: u32, j: u32) -> Color {
    let offsets = options.ssaa.offsets();
    let mut pixel_color = Color::ZERO;

    for &dy in offsets {
        for &dx in offsets {
            let ray = camera.ray_for(i, j, dx, dy);
            pixel_color += scene
                .trace_ray(&ray, Interval::from_min(0.0), options.max_depth)
                .unwrap_or_else(|| scene.background());
        }
    }

    pixel_color / options.ssaa.samples() as f64
}

/// Render `surfaces` lit by `lights` into `target`.
///
/// `target` must be exactly `target_width * target_height * 4` bytes; it is
/// checked before anything is written.
pub fn render(surfaces: &[Surface], lights: &[Light], target: &mut [u8], options: &RenderOptions) -> RenderResult<()> {
    render_with_cancel(surfaces, lights, target, options, &CancelToken::new())
}

/// [`render`] with a cancellation token checked before each bucket.
///
/// On cancellation, buckets that already finished stay written.
pub fn render_with_cancel(
    surfaces: &[Surface],
    lights: &[Light],
    target: &mut [u8],
    options: &RenderOptions,
    cancel: &CancelToken,
) -> RenderResult<()> {
    let (width, height) = (options.target_width, options.target_height);
    if target.len() != options.target_len() {
        return Err(RenderError::SizeMismatch {
            len: target.len(),
            width,
            height,
        });
    }
    if target.is_empty() {
        return Ok(());
    }

    let scene = Scene::from_options(surfaces, lights, options);
    let camera = Camera::from_options(options);
    let buckets = generate_buckets(width, height, options.bucket_rows);
    let band_len = options.bucket_rows.max(1) as usize * width as usize * 4;

    log::info!(
        "Rendering {}x{} ({} surfaces, {} lights, {} spp, {} buckets)",
        width,
        height,
        surfaces.len(),
        lights.len(),
        options.ssaa.samples(),
        buckets.len()
    );
    let start = Instant::now();

    let render_band = |(bucket, pixels): (&Bucket, &mut [u8])| -> RenderResult<()> {
        if cancel.is_cancelled() {
            return Err(RenderError::Cancelled);
        }
        render_bucket(bucket, &scene, &camera, options, pixels);
        Ok(())
    };

    let result = if options.parallel {
        buckets
            .par_iter()
            .zip(target.par_chunks_mut(band_len))
            .try_for_each(render_band)
    } else {
        buckets
            .iter()
            .zip(target.chunks_mut(band_len))
            .try_for_each(render_band)
    };

    match &result {
        Ok(()) => log::info!("Render complete in {:.2?}", start.elapsed()),
        Err(err) => log::warn!("Render stopped after {:.2?}: {}", start.elapsed(), err),
    }

    result
}

/// Render into a freshly allocated image.
pub fn render_image(surfaces: &[Surface], lights: &[Light], options: &RenderOptions) -> RenderResult<RgbaImage> {
    let (width, height) = (options.target_width, options.target_height);
    let len = options.target_len();

    let mut pixels = vec![0u8; len];
    render(surfaces, lights, &mut pixels, options)?;

    RgbaImage::from_raw(width, height, pixels).ok_or(RenderError::SizeMismatch { len, width, height })
}
