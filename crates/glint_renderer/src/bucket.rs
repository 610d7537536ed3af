//! Bucket-based rendering for Glint.
//!
//! Divides the target into horizontal bands (buckets) of whole scanlines.
//! Each band owns a disjoint slice of the RGBA8 buffer, so bands can be
//! rendered independently and in parallel using rayon.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glint_math::color_to_rgba8;

use crate::renderer::render_pixel;
use crate::{Camera, RenderOptions, Scene};

/// A band of scanlines to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// First row of the band
    pub y: u32,
    /// Width of the band in pixels (the full target width)
    pub width: u32,
    /// Number of rows in the band
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { y, width, height, index }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of this bucket's slice of an RGBA8 buffer.
    pub fn byte_len(&self) -> usize {
        self.pixel_count() * 4
    }
}

/// Default bucket height in scanlines.
pub const DEFAULT_BUCKET_ROWS: u32 = 16;

/// Generate buckets for an image, top to bottom.
///
/// The last bucket is shorter when `rows` doesn't divide `height`. A `rows`
/// of zero is treated as one.
pub fn generate_buckets(width: u32, height: u32, rows: u32) -> Vec<Bucket> {
    let rows = rows.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let bh = rows.min(height - y);
        buckets.push(Bucket::new(y, width, bh, buckets.len()));
        y += rows;
    }

    buckets
}

/// Render a single bucket into its slice of the target buffer.
///
/// `pixels` holds the bucket's rows, row-major, 4 bytes per pixel.
pub fn render_bucket(
    bucket: &Bucket,
    scene: &Scene<'_>,
    camera: &Camera,
    options: &RenderOptions,
    pixels: &mut [u8],
) {
    debug_assert_eq!(pixels.len(), bucket.byte_len());

    let mut texels = pixels.chunks_exact_mut(4);
    for local_y in 0..bucket.height {
        for x in 0..bucket.width {
            let Some(texel) = texels.next() else {
                return;
            };
            let color = render_pixel(scene, camera, options, x, bucket.y + local_y);
            texel.copy_from_slice(&color_to_rgba8(color));
        }
    }

    log::debug!("Bucket {} done (rows {}..{})", bucket.index, bucket.y, bucket.y + bucket.height);
}

/// Cooperative cancellation flag shared between a render and its caller.
///
/// Checked before each bucket starts; buckets already running finish.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone of this token observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Surface;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 2);

        // Total pixels should equal image size
        let total_pixels: usize = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 100, 64);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[1], Bucket::new(64, 100, 36, 1));

        let total_pixels: usize = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 100);
    }

    #[test]
    fn test_buckets_are_ordered_top_to_bottom() {
        let buckets = generate_buckets(10, 50, 16);
        for (i, pair) in buckets.windows(2).enumerate() {
            assert_eq!(pair[0].index, i);
            assert_eq!(pair[0].y + pair[0].height, pair[1].y);
        }
    }

    #[test]
    fn test_zero_rows_treated_as_one() {
        let buckets = generate_buckets(4, 3, 0);
        assert_eq!(buckets.len(), 3);
        assert!(buckets.iter().all(|b| b.height == 1));
    }

    #[test]
    fn test_empty_image_has_no_buckets() {
        assert!(generate_buckets(0, 0, 16).is_empty());
    }

    #[test]
    fn test_render_bucket_fills_slice() {
        let options = RenderOptions {
            background: [10, 20, 30],
            ..Default::default()
        }
        .with_resolution(4, 4);
        let surfaces: Vec<Surface> = Vec::new();
        let scene = Scene::from_options(&surfaces, &[], &options);
        let camera = Camera::from_options(&options);

        let bucket = Bucket::new(2, 4, 2, 1);
        let mut pixels = vec![0u8; bucket.byte_len()];
        render_bucket(&bucket, &scene, &camera, &options, &mut pixels);

        for texel in pixels.chunks_exact(4) {
            assert_eq!(texel, [10, 20, 30, 255]);
        }
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();
        assert!(clone.is_cancelled());
    }
}
