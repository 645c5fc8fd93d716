use crate::{
    algebra::{lerp, random_unit_cube, reflect, Vec3},
    camera::{Camera, RenderState},
    light::Light,
    ray::Ray,
    error::SceneError,
    scene::Scene,
    sphere::Sphere,
    tonemap::{downsample, pixelate, ColorBuffer, PixelBuffer},
};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use std::time::Instant;

/// Offset applied along the normal when spawning secondary rays.
const SURFACE_EPSILON: f32 = 1e-3;

const SKY_FROM: Vec3 = Vec3(0.5, 0.7, 1.0);
const SKY_TO: Vec3 = Vec3(0.8, 0.8, 1.0);

/// Nearest valid intersection along a ray.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    pub t: f32,
    pub point: Vec3,
    pub sphere: &'a Sphere,
}

/// Color of a ray that escapes the scene, from its vertical direction.
pub fn background(ray: &Ray) -> Vec3 {
    lerp(SKY_FROM, SKY_TO, 0.5 - ray.direction.1)
}

/// Move `point` off the surface, to the side that `direction` leaves through.
fn offset_origin(point: Vec3, n: Vec3, direction: Vec3) -> Vec3 {
    if direction.dot(n) < 0.0 {
        point.sub(n.scale(SURFACE_EPSILON))
    } else {
        point.add(n.scale(SURFACE_EPSILON))
    }
}

/// Mirror ray leaving `hit`. `v` points from the surface toward the eye.
/// Scattering 1 reflects exactly; lower values jitter the direction.
fn reflected_ray(hit: Vec3, n: Vec3, v: Vec3, scattering: f32, rng: &mut impl Rng) -> Ray {
    let r = reflect(v, n);
    let origin = offset_origin(hit, n, r);
    let p = random_unit_cube(rng).scale(1.0 - scattering);
    let dir = if r.dot(n) < 0.0 { r.add(r.sub(p)) } else { r.add(r.add(p)) };
    Ray::new(origin, dir)
}

/// Read-only view of a scene from one camera. Cheap to build per frame.
pub struct Tracer<'a> {
    spheres: &'a [Sphere],
    lights: &'a [Light],
    camera: &'a Camera,
}

impl<'a> Tracer<'a> {
    pub fn new(spheres: &'a [Sphere], lights: &'a [Light], camera: &'a Camera) -> Self {
        Self { spheres, lights, camera }
    }

    pub fn for_scene(scene: &'a Scene) -> Self {
        Self::new(&scene.spheres, &scene.lights, &scene.camera)
    }

    /// Closest sphere along `ray`. Equal distances go to the sphere listed
    /// first; anything at or past the render distance counts as a miss.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit<'a>> {
        self.spheres
            .iter()
            .filter_map(|s| s.intersect(ray).map(|t| (t, s)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .filter(|(t, _)| *t < self.camera.render_distance)
            .map(|(t, sphere)| Hit { t, point: ray.at(t), sphere })
    }

    /// Color seen along `ray`. `depth` counts mirror bounces so far and is 0
    /// for camera rays.
    pub fn shade(&self, ray: &Ray, depth: u32, rng: &mut impl Rng) -> Vec3 {
        let Some(Hit { point: hit, sphere, .. }) = self.nearest_hit(ray) else {
            return background(ray);
        };
        let mat = sphere.material;
        let n = sphere.normal_at(hit);
        let v = self.camera.position.sub(hit).normalize();

        let reflect_color = if mat.is_reflective() && depth < self.camera.max_reflection_depth {
            let bounce = reflected_ray(hit, n, v, mat.scattering_constant, rng);
            self.shade(&bounce, depth + 1, rng)
        } else {
            Vec3::ZERO
        };

        // Both accumulators start from the ambient bias: a value of 1 for
        // either term contributes nothing.
        let bias = (mat.ambient_reflection - 1.0) + (self.camera.scene_lighting - 1.0);
        let mut diffuse = bias;
        let mut specular = bias;

        for light in self.lights {
            let to_light = light.position.sub(hit);
            let light_distance = to_light.norm();
            let l = to_light.normalize();

            let shadow_ray = Ray::new(offset_origin(hit, n, l), l);
            if self.nearest_hit(&shadow_ray).is_some_and(|h| h.t < light_distance) {
                continue;
            }

            diffuse += mat.diffuse_reflection * light.diffuse_component * l.dot(n).max(0.0);
            let r = reflect(l, n);
            specular += mat.specular_reflection
                * light.specular_component
                * r.dot(v).max(0.0).powf(mat.specular_exponent);
        }

        mat.albedo.scale(diffuse + specular).add(reflect_color).clamp01()
    }
}

/// Camera ray through pixel `(x, y)` of a `width × height` grid.
pub fn primary_ray(camera: &Camera, x: u32, y: u32, width: u32, height: u32) -> Ray {
    let (w, h) = (width as f32, height as f32);
    let half = (camera.fov * 0.5).tan();
    let aspect = w / h;
    let u =  (2.0 * x as f32 / w - 1.0) * half * aspect;
    let v = -(2.0 * y as f32 / h - 1.0) * half;
    Ray::new(camera.position, Vec3(u, v, -1.0 / camera.focal_length))
}

/// Per-row generator. Rows never share state, so the image does not depend
/// on how rayon schedules them.
fn row_rng(seed: u64, y: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ (y as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Trace every pixel of a `width × height` grid, rows in parallel.
pub fn render_scene(
    scene: &Scene,
    camera: &Camera,
    width: u32,
    height: u32,
    bar: Option<&ProgressBar>,
) -> PixelBuffer {
    let tracer = Tracer::new(&scene.spheres, &scene.lights, camera);
    let seed = scene.settings.seed;

    (0..height)
        .into_par_iter()
        .map(|y| {
            let mut rng = row_rng(seed, y);
            let row: Vec<Vec3> = (0..width)
                .map(|x| tracer.shade(&primary_ray(camera, x, y, width, height), 0, &mut rng))
                .collect();
            if let Some(b) = bar {
                b.inc(1);
            }
            row
        })
        .collect()
}

pub fn progress_bar(len: u32, label: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{msg:>14} {bar:40.cyan/blue} {pos}/{len} rows | {elapsed_precise} | ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(label);
    pb
}

/// Render one frame: trace at the oversampled size, average down to the
/// display size and expand pixelated output back up.
///
/// Settings and the frame's camera are checked again here since both can be
/// changed after the scene was built.
pub fn render(scene: &Scene, state: &RenderState, show_progress: bool) -> Result<ColorBuffer, SceneError> {
    let settings = scene.settings;
    settings.validate()?;
    state.camera.validate()?;
    let (w, h) = settings.oversampled_size()?;
    info!(
        "Rendering {}x{} ({}x{} traced, ssaa {}, pixel spacing {})",
        settings.width, settings.height, w, h, settings.ssaa, settings.pixel_spacing
    );
    debug!("camera: {:?}", state.camera);

    let start = Instant::now();
    let bar = show_progress.then(|| progress_bar(h, "Rendering"));
    let pixels = render_scene(scene, &state.camera, w, h, bar.as_ref());
    if let Some(b) = bar {
        b.finish();
    }
    info!("Traced {} rays in {:.2?}", w as u64 * h as u64, start.elapsed());

    let bar = show_progress.then(|| progress_bar(h / settings.ssaa, "Anti Aliasing"));
    let image = downsample(&pixels, settings.ssaa, bar.as_ref());
    if let Some(b) = bar {
        b.finish();
    }

    Ok(pixelate(&image, settings.pixel_spacing))
}
