//! Glint renderer - recursive Whitted-style CPU ray tracing.
//!
//! Traces one primary ray per pixel (or a 2x2 / 4x4 supersampling grid)
//! against spheres, planes and triangle meshes, shades hits with ambient,
//! Lambertian and Blinn-Phong terms under hard shadows, and follows mirror
//! reflections up to a fixed depth. The result is written into a caller-owned
//! RGBA8 buffer, rendered in row buckets on the rayon thread pool.
//!
//! ```
//! use glint_renderer::{render, PointLight, LightOptions, RenderOptions, Sphere, Surface, Light, Vec3};
//! use glint_core::MaterialOptions;
//!
//! let surfaces: Vec<Surface> = vec![Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, MaterialOptions::default()).into()];
//! let lights: Vec<Light> = vec![PointLight::new(Vec3::new(0.0, 5.0, 0.0), LightOptions::default()).into()];
//!
//! let options = RenderOptions::default().with_resolution(32, 24);
//! let mut target = vec![0u8; options.target_len()];
//! render(&surfaces, &lights, &mut target, &options)?;
//! # Ok::<(), glint_renderer::RenderError>(())
//! ```

mod bucket;
mod camera;
mod directional_light;
mod light;
mod mesh;
mod obj;
mod plane;
mod point_light;
mod renderer;
mod scene;
mod sphere;
mod spot_light;
mod surface;

pub use bucket::{generate_buckets, render_bucket, Bucket, CancelToken, DEFAULT_BUCKET_ROWS};
pub use camera::Camera;
pub use directional_light::DirectionalLight;
pub use light::{Attenuation, Illuminate, Light, LightOptions};
pub use mesh::{GeometryError, Mesh, MeshVertex, Triangle};
pub use plane::Plane;
pub use point_light::PointLight;
pub use renderer::{
    render, render_image, render_pixel, render_with_cancel, RenderError, RenderOptions, RenderResult, Ssaa,
    DEFAULT_MAX_DEPTH,
};
pub use scene::{Scene, DEFAULT_AMBIENT_LIGHT};
pub use sphere::Sphere;
pub use spot_light::{SpotLight, SpotOptions};
pub use surface::{Intersect, Intersection, Surface, SurfaceHit, EPSILON};

/// Re-export the math types that appear in this crate's API
pub use glint_math::{Color, Interval, Ray, Rgb8, Vec2, Vec3};
