//! Scene aggregate and the recursive trace/shade core.

use std::ptr;

use glint_math::{color_from_rgb8, normalize, reflect, Color, Interval, Ray};

use crate::{Intersection, Light, RenderOptions, Surface, EPSILON};

/// Default ambient light term.
pub const DEFAULT_AMBIENT_LIGHT: f64 = 0.1;

/// Blinn-Phong dot products are scaled by this before `powf`, so a value a
/// hair above 1.0 can't blow up a large exponent.
const SPECULAR_DOT_SCALE: f64 = 0.999;

/// Read-only view of everything a render call traces against.
///
/// Borrows the caller's surfaces and lights; nothing is mutated while
/// rendering, so a `Scene` can be shared freely across worker threads.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    surfaces: &'a [Surface],
    lights: &'a [Light],
    ambient_light: f64,
    background: Color,
    epsilon: f64,
}

impl<'a> Scene<'a> {
    /// Scene with default ambient light, black background and [`EPSILON`].
    pub fn new(surfaces: &'a [Surface], lights: &'a [Light]) -> Self {
        Self {
            surfaces,
            lights,
            ambient_light: DEFAULT_AMBIENT_LIGHT,
            background: Color::ZERO,
            epsilon: EPSILON,
        }
    }

    /// Scene configured from render options.
    pub fn from_options(surfaces: &'a [Surface], lights: &'a [Light], options: &RenderOptions) -> Self {
        Self::new(surfaces, lights)
            .with_ambient_light(options.ambient_light)
            .with_background(color_from_rgb8(options.background))
            .with_epsilon(options.epsilon)
    }

    /// Set the ambient term applied to every hit.
    pub fn with_ambient_light(mut self, ambient_light: f64) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    /// Set the color used for rays that escape.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Set the offset for shadow and reflection rays.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Surfaces in declaration order.
    pub fn surfaces(&self) -> &'a [Surface] {
        self.surfaces
    }

    /// Lights in declaration order.
    pub fn lights(&self) -> &'a [Light] {
        self.lights
    }

    pub fn ambient_light(&self) -> f64 {
        self.ambient_light
    }

    /// Color for rays that escape the scene.
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Closest intersection with `t` in `ray_t`.
    ///
    /// The search window shrinks to the best `t` found so far, so on an exact
    /// tie the surface listed first wins.
    pub fn closest_intersection(&self, ray: &Ray, ray_t: Interval) -> Option<Intersection<'a>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for surface in self.surfaces {
            if let Some(hit) = surface.find_intersection(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = hit.t;
                closest = Some(hit);
            }
        }

        closest
    }

    /// Check if any surface other than `exclude` is hit within `ray_t`.
    pub fn is_occluded(&self, ray: &Ray, ray_t: Interval, exclude: &Surface) -> bool {
        self.surfaces
            .iter()
            .filter(|surface| !ptr::eq(*surface, exclude))
            .any(|surface| surface.find_intersection(ray, ray_t).is_some())
    }

    /// Color seen along `ray`, or `None` if it escapes or `depth` is spent.
    ///
    /// The caller substitutes the background for `None`.
    pub fn trace_ray(&self, ray: &Ray, ray_t: Interval, depth: u32) -> Option<Color> {
        if depth == 0 {
            return None;
        }

        self.closest_intersection(ray, ray_t)
            .map(|intersection| self.shade(ray, &intersection, depth))
    }

    /// Local illumination at an intersection plus any mirror reflection.
    ///
    /// The result is unclamped.
    pub fn shade(&self, ray: &Ray, intersection: &Intersection<'_>, depth: u32) -> Color {
        let surface = intersection.surface;
        let material = surface.material();

        let point = ray.at(intersection.t);
        let normal = surface.normal_at(point, ray, intersection);
        let diffuse = surface.diffuse_color(point, intersection);
        let view = normalize(ray.direction());

        let mut color = diffuse * self.ambient_light;

        for light in self.lights {
            let to_light = light.direction_to_light(point);

            // to_light is unnormalized: t = 1 is the light itself
            let shadow_ray = Ray::new(point, to_light);
            if self.is_occluded(&shadow_ray, light.shadow_interval(self.epsilon), surface) {
                continue;
            }

            let to_light = normalize(to_light);
            let lambert = normal.dot(to_light).max(0.0);

            let halfway = normalize(to_light - view);
            let specular = (normal.dot(halfway) * SPECULAR_DOT_SCALE)
                .max(0.0)
                .powf(material.specular_exponent);

            color += diffuse * light.color() * (light.intensity_at(point) * (lambert + specular));
        }

        if material.is_reflective() {
            let reflection = Ray::new(point, reflect(ray.direction(), normal));
            let reflected = self.trace_ray(&reflection, Interval::from_min(self.epsilon), depth.saturating_sub(1));

            if let Some(reflected) = reflected {
                let r = material.reflectiveness;
                color = reflected * r + color * (1.0 - r);
            }
        }

        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DirectionalLight, LightOptions, Plane, PointLight, Sphere};
    use glint_core::{Material, MaterialOptions};
    use glint_math::Vec3;

    fn white() -> Material {
        Material::new(&MaterialOptions {
            color: [255, 255, 255],
            ..Default::default()
        })
    }

    fn target_sphere() -> Surface {
        Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, white()).into()
    }

    fn light_behind_camera() -> Light {
        PointLight::new(Vec3::new(0.0, 0.0, 5.0), LightOptions::default()).into()
    }

    fn center_ray() -> Ray {
        Ray::new(Vec3::ZERO, -Vec3::Z)
    }

    fn primary() -> Interval {
        Interval::from_min(0.0)
    }

    #[test]
    fn test_zero_depth_yields_nothing() {
        let surfaces = vec![target_sphere()];
        let scene = Scene::new(&surfaces, &[]);
        assert_eq!(scene.trace_ray(&center_ray(), primary(), 0), None);
    }

    #[test]
    fn test_miss_yields_nothing() {
        let surfaces = vec![target_sphere()];
        let scene = Scene::new(&surfaces, &[]);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(scene.trace_ray(&ray, primary(), 2), None);
    }

    #[test]
    fn test_ambient_only_without_lights() {
        let surfaces = vec![target_sphere()];
        let scene = Scene::new(&surfaces, &[]).with_ambient_light(0.25);
        let color = scene.trace_ray(&center_ray(), primary(), 1).unwrap();
        assert_eq!(color, Color::splat(0.25));
    }

    #[test]
    fn test_closest_surface_wins() {
        let near = Material::new(&MaterialOptions {
            color: [255, 0, 0],
            ..Default::default()
        });
        let surfaces = vec![
            target_sphere(),
            Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, near).into(),
        ];
        let scene = Scene::new(&surfaces, &[]);

        let hit = scene.closest_intersection(&center_ray(), primary()).unwrap();
        assert!(ptr::eq(hit.surface, &surfaces[1]));
        assert!((hit.t - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_tie_goes_to_first_surface() {
        let surfaces: Vec<Surface> = vec![target_sphere(), target_sphere()];
        let scene = Scene::new(&surfaces, &[]);
        let hit = scene.closest_intersection(&center_ray(), primary()).unwrap();
        assert!(ptr::eq(hit.surface, &surfaces[0]));
    }

    #[test]
    fn test_lit_surface_is_brighter_than_ambient() {
        let surfaces = vec![target_sphere()];
        let lights = vec![light_behind_camera()];
        let scene = Scene::new(&surfaces, &lights);

        let color = scene.trace_ray(&center_ray(), primary(), 1).unwrap();
        // Lambert term alone is 1.0 head-on
        assert!(color.x > 1.0);
        assert_eq!(color.x, color.y);
        assert_eq!(color.y, color.z);
    }

    #[test]
    fn test_occluder_between_point_and_light_casts_shadow() {
        let surfaces = vec![
            target_sphere(),
            Sphere::new(Vec3::new(0.0, 0.0, 2.0), 0.5, white()).into(),
        ];
        let lights = vec![light_behind_camera()];
        let scene = Scene::new(&surfaces, &lights);

        let color = scene.trace_ray(&center_ray(), primary(), 1).unwrap();
        assert!((color - Color::splat(DEFAULT_AMBIENT_LIGHT)).abs().max_element() < 1e-12);
    }

    #[test]
    fn test_surface_beyond_light_casts_no_shadow() {
        let lights = vec![light_behind_camera()];

        let alone = vec![target_sphere()];
        let expected = Scene::new(&alone, &lights).trace_ray(&center_ray(), primary(), 1);

        let with_far_sphere = vec![
            target_sphere(),
            Sphere::new(Vec3::new(0.0, 0.0, 8.0), 0.5, white()).into(),
        ];
        let actual = Scene::new(&with_far_sphere, &lights).trace_ray(&center_ray(), primary(), 1);

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_directional_shadow_is_unbounded() {
        let surfaces = vec![
            target_sphere(),
            Sphere::new(Vec3::new(0.0, 0.0, 100.0), 1.0, white()).into(),
        ];
        let lights: Vec<Light> =
            vec![DirectionalLight::new(-Vec3::Z, LightOptions::default()).into()];
        let scene = Scene::new(&surfaces, &lights);

        let color = scene.trace_ray(&center_ray(), primary(), 1).unwrap();
        assert!((color - Color::splat(DEFAULT_AMBIENT_LIGHT)).abs().max_element() < 1e-12);
    }

    #[test]
    fn test_matte_surface_ignores_mirrors_elsewhere() {
        let lights = vec![light_behind_camera()];

        let alone = vec![target_sphere()];
        let expected = Scene::new(&alone, &lights).trace_ray(&center_ray(), primary(), 2);

        let mirror = Material::new(&MaterialOptions {
            reflectiveness: 1.0,
            ..Default::default()
        });
        let with_mirror = vec![
            target_sphere(),
            Sphere::new(Vec3::new(10.0, 0.0, -5.0), 1.0, mirror).into(),
        ];
        let actual = Scene::new(&with_mirror, &lights).trace_ray(&center_ray(), primary(), 2);

        assert_eq!(actual, expected);
    }

    fn mirror_scene() -> Vec<Surface> {
        let mirror = Material::new(&MaterialOptions {
            reflectiveness: 1.0,
            ..Default::default()
        });
        let red = Material::new(&MaterialOptions {
            color: [255, 0, 0],
            ..Default::default()
        });
        vec![
            Plane::new(Vec3::Z, Vec3::new(0.0, 0.0, -5.0), mirror).into(),
            // Behind the camera, visible only in the mirror
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, red).into(),
        ]
    }

    #[test]
    fn test_mirror_shows_reflected_surface() {
        let surfaces = mirror_scene();
        let scene = Scene::new(&surfaces, &[]);

        let color = scene.trace_ray(&center_ray(), primary(), 2).unwrap();
        assert!((color - Color::new(0.1, 0.0, 0.0)).abs().max_element() < 1e-12);
    }

    #[test]
    fn test_spent_depth_leaves_local_color() {
        let surfaces = mirror_scene();
        let scene = Scene::new(&surfaces, &[]);

        let color = scene.trace_ray(&center_ray(), primary(), 1).unwrap();
        let plane_diffuse = surfaces[0].material().diffuse_color;
        assert!((color - plane_diffuse * DEFAULT_AMBIENT_LIGHT).abs().max_element() < 1e-12);
    }

    #[test]
    fn test_from_options() {
        let options = RenderOptions {
            ambient_light: 0.3,
            background: [255, 0, 0],
            epsilon: 1e-4,
            ..Default::default()
        };
        let scene = Scene::from_options(&[], &[], &options);
        assert_eq!(scene.ambient_light(), 0.3);
        assert_eq!(scene.background(), Color::new(1.0, 0.0, 0.0));
        assert_eq!(scene.epsilon(), 1e-4);
    }

    #[test]
    fn test_accessors() {
        let surfaces = vec![target_sphere()];
        let lights = vec![light_behind_camera()];
        let scene = Scene::new(&surfaces, &lights);
        assert_eq!(scene.surfaces().len(), 1);
        assert_eq!(scene.lights().len(), 1);
        assert_eq!(scene.background(), Color::ZERO);
        assert_eq!(scene.epsilon(), EPSILON);
    }

    /// White matte floor at y = -1 with a soft highlight exponent.
    fn glossy_floor() -> Vec<Surface> {
        let material = Material::new(&MaterialOptions {
            color: [255, 255, 255],
            specular_exp: 2.0,
            ..Default::default()
        });
        vec![Plane::new(Vec3::Y, Vec3::new(0.0, -1.0, 0.0), material).into()]
    }

    /// Hits the floor at (0, -1, -1), lit from straight above.
    fn oblique_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, -1.0))
    }

    fn overhead_light(color: [u8; 3]) -> Light {
        PointLight::new(
            Vec3::new(0.0, 1.0, -1.0),
            LightOptions {
                color,
                ..Default::default()
            },
        )
        .into()
    }

    /// ambient + N·L + (0.999 N·H)^2 for the oblique floor hit.
    fn expected_floor_intensity() -> f64 {
        let normal = Vec3::Y;
        let to_light = Vec3::Y;
        let view = oblique_ray().direction().normalize();
        let halfway = (to_light - view).normalize();
        DEFAULT_AMBIENT_LIGHT + normal.dot(to_light) + (0.999 * normal.dot(halfway)).powf(2.0)
    }

    #[test]
    fn test_blinn_phong_highlight() {
        let surfaces = glossy_floor();
        let lights = vec![overhead_light([255, 255, 255])];
        let scene = Scene::new(&surfaces, &lights);

        let ray = oblique_ray();
        let hit = scene.closest_intersection(&ray, primary()).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-12);

        let color = scene.shade(&ray, &hit, 1);
        let expected = expected_floor_intensity();

        // The highlight is well above ambient + Lambert
        assert!(expected - (DEFAULT_AMBIENT_LIGHT + 1.0) > 0.5);
        assert!((color - Color::splat(expected)).abs().max_element() < 1e-12);
    }

    #[test]
    fn test_light_color_weights_direct_term() {
        let surfaces = glossy_floor();
        let lights = vec![overhead_light([255, 0, 0])];
        let scene = Scene::new(&surfaces, &lights);

        let color = scene.trace_ray(&oblique_ray(), primary(), 1).unwrap();

        assert!((color.x - expected_floor_intensity()).abs() < 1e-12);
        assert_eq!(color.y, DEFAULT_AMBIENT_LIGHT);
        assert_eq!(color.z, DEFAULT_AMBIENT_LIGHT);
    }
}
