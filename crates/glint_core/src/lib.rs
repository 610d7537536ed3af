//! Glint Core - per-surface shading data.
//!
//! This crate provides:
//!
//! - **Materials**: `Material` and the `MaterialOptions` configuration
//!   object that scene-building code fills in
//! - **Textures**: nearest-neighbour RGBA8 image sampling for UV-mapped
//!   diffuse color
//!
//! # Example
//!
//! ```
//! use glint_core::{Material, MaterialOptions, Texture};
//!
//! let material = Material::new(&MaterialOptions {
//!     color: [255, 0, 0],
//!     reflectiveness: 0.25,
//!     ..Default::default()
//! });
//! assert_eq!(material.diffuse_color.x, 1.0);
//!
//! let checker = Texture::new(vec![0, 0, 0, 255, 255, 255, 255, 255], 2, 1)?;
//! assert_eq!(checker.sample(0.75, 0.0).x, 1.0);
//! # Ok::<(), glint_core::TextureError>(())
//! ```

pub mod material;
pub mod texture;

// Re-export commonly used types
pub use material::{Material, MaterialOptions};
pub use texture::{Texture, TextureError, TextureResult};
