//! Simple ray tracer example.
//!
//! Renders three stacked spheres, a large mirror sphere and a slightly
//! reflective floor, then saves the result as a PNG.
//!
//! Usage: `simple_render [options.json] [output.png]`

use std::env;
use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use glint_core::MaterialOptions;
use glint_renderer::{
    render_image, Light, LightOptions, Plane, PointLight, RenderOptions, Sphere, Ssaa, Surface, Vec3,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let options = match args.next() {
        Some(path) => {
            let json = fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
            RenderOptions::from_json(&json).with_context(|| format!("parsing {}", path))?
        }
        None => RenderOptions {
            background: [100, 100, 100],
            ssaa: Ssaa::X4,
            ..Default::default()
        },
    };
    let filename = args.next().unwrap_or_else(|| "output.png".to_string());

    let start = Instant::now();
    let (surfaces, lights) = build_scene();
    log::info!("Scene built in {:?}", start.elapsed());

    let image = render_image(&surfaces, &lights, &options)?;

    image.save(&filename).with_context(|| format!("saving {}", filename))?;
    log::info!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> (Vec<Surface>, Vec<Light>) {
    let glossy = |color| MaterialOptions {
        color,
        specular_exp: 10_000.0,
        ..Default::default()
    };

    let surfaces = vec![
        // Stacked spheres
        Sphere::new(Vec3::new(-300.0, 200.0, -2800.0), 80.0, glossy([160, 160, 160])).into(),
        Sphere::new(Vec3::new(-300.0, 40.0, -2800.0), 80.0, glossy([200, 200, 200])).into(),
        Sphere::new(Vec3::new(-300.0, -120.0, -2800.0), 80.0, glossy([45, 45, 45])).into(),
        // Mirror
        Sphere::new(
            Vec3::new(400.0, 400.0, -5000.0),
            500.0,
            MaterialOptions {
                color: [200, 200, 200],
                reflectiveness: 1.0,
                ..Default::default()
            },
        )
        .into(),
        // Floor
        Plane::new(
            Vec3::Y,
            Vec3::new(0.0, -200.0, 0.0),
            MaterialOptions {
                color: [80, 80, 80],
                reflectiveness: 0.1,
                ..Default::default()
            },
        )
        .into(),
    ];

    let lights = vec![PointLight::new(
        Vec3::new(800.0, 1600.0, -1000.0),
        LightOptions {
            intensity: 0.8,
            ..Default::default()
        },
    )
    .into()];

    log::info!("Created {} surfaces, {} lights", surfaces.len(), lights.len());
    (surfaces, lights)
}
