//! Texture sampling for UV-mapped diffuse color.
//!
//! A texture wraps a tightly packed RGBA8 buffer and samples it with
//! nearest-neighbour lookup. There is no filtering and no
//! wrapping: UVs outside [0, 1) clamp to the edge pixels.

use std::path::Path;

use glint_math::{color_from_rgb8, Color};
use thiserror::Error;

/// Errors that can occur while building a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("texture data has size {len} which doesn't match the given dimensions of {width} x {height}")]
    SizeMismatch { len: usize, width: u32, height: u32 },

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// An RGBA8 image sampled by UV coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    /// Row-major, top row first, 4 bytes per pixel
    data: Vec<u8>,
}

impl Texture {
    /// Wrap a raw RGBA8 buffer.
    ///
    /// Fails with `SizeMismatch` unless `data.len() == width * height * 4`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> TextureResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                len: data.len(),
                width,
                height,
            });
        }

        log::debug!("Created texture {}x{}", width, height);

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Take ownership of an already decoded image.
    pub fn from_image(image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }

    /// Decode an image file into a texture.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgba8();

        log::debug!(
            "Loaded texture: {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );

        Ok(Self::from_image(image))
    }

    /// Texture width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample the texture at UV coordinates (nearest neighbour).
    ///
    /// `(0, 0)` is the top-left pixel. Continuous coordinates map to
    /// `floor(u * width)` / `floor(v * height)`, clamped to the image. The
    /// alpha channel is ignored. An empty texture samples as black.
    pub fn sample(&self, u: f64, v: f64) -> Color {
        if self.data.is_empty() {
            return Color::ZERO;
        }

        let x = texel_index(u, self.width);
        let y = texel_index(v, self.height);
        let idx = (y * self.width as usize + x) * 4;

        color_from_rgb8([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }
}

/// Map a continuous coordinate to a pixel index in `[0, size - 1]`.
#[inline]
fn texel_index(coord: f64, size: u32) -> usize {
    let max = (size - 1) as f64;
    // NaN falls through clamp and casts to 0
    (coord * size as f64).floor().clamp(0.0, max) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 texture: red, green / blue, white
    fn quad() -> Texture {
        #[rustfmt::skip]
        let data = vec![
            255, 0, 0, 255,     0, 255, 0, 255,
            0, 0, 255, 255,     255, 255, 255, 255,
        ];
        Texture::new(data, 2, 2).unwrap()
    }

    #[test]
    fn test_size_mismatch() {
        let result = Texture::new(vec![0; 15], 2, 2);
        assert!(matches!(
            result,
            Err(TextureError::SizeMismatch {
                len: 15,
                width: 2,
                height: 2
            })
        ));
    }

    #[test]
    fn test_sample_quadrants() {
        let tex = quad();
        assert_eq!(tex.sample(0.25, 0.25), Color::new(1.0, 0.0, 0.0));
        assert_eq!(tex.sample(0.75, 0.25), Color::new(0.0, 1.0, 0.0));
        assert_eq!(tex.sample(0.25, 0.75), Color::new(0.0, 0.0, 1.0));
        assert_eq!(tex.sample(0.75, 0.75), Color::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_sample_clamps_to_edges() {
        let tex = quad();
        // u = 1.0 would index column 2; it clamps to the last column
        assert_eq!(tex.sample(1.0, 0.0), Color::new(0.0, 1.0, 0.0));
        assert_eq!(tex.sample(-3.0, 7.0), Color::new(0.0, 0.0, 1.0));
        assert_eq!(tex.sample(f64::NAN, 0.0), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_sample_ignores_alpha() {
        let tex = Texture::new(vec![51, 102, 255, 0], 1, 1).unwrap();
        assert_eq!(tex.sample(0.5, 0.5), Color::new(0.2, 0.4, 1.0));
    }

    #[test]
    fn test_from_image() {
        let image = image::RgbaImage::from_pixel(3, 2, image::Rgba([0, 255, 0, 255]));
        let tex = Texture::from_image(image);
        assert_eq!(tex.width(), 3);
        assert_eq!(tex.height(), 2);
        assert_eq!(tex.sample(0.9, 0.9), Color::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_empty_texture_samples_black() {
        let tex = Texture::new(Vec::new(), 0, 0).unwrap();
        assert_eq!(tex.sample(0.5, 0.5), Color::ZERO);
    }
}
