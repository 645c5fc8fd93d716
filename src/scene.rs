use crate::{
    algebra::{vec3_from_array, Vec3},
    camera::Camera,
    error::SceneError,
    light::Light,
    material::Material,
    sphere::Sphere,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Output resolution and sampling controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    /// Displayed resolution.
    pub width: u32,
    pub height: u32,
    /// Supersampling factor: each displayed pixel averages `ssaa × ssaa` rays.
    pub ssaa: u32,
    /// Pixelation: each traced pixel covers `pixel_spacing × pixel_spacing`
    /// displayed pixels. 1 disables it.
    pub pixel_spacing: u32,
    /// Seed for the blurred-mirror perturbation.
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self { width: 640, height: 360, ssaa: 3, pixel_spacing: 1, seed: 0 }
    }
}

impl RenderSettings {
    /// Dimensions of the buffer that actually gets traced.
    pub fn oversampled_size(&self) -> Result<(u32, u32), SceneError> {
        let traced = |side: u32| {
            self.ssaa
                .checked_mul(side)
                .and_then(|n| n.checked_div(self.pixel_spacing))
        };
        match (traced(self.width), traced(self.height)) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(SceneError::InvalidSettings(format!(
                "{}x{} at ssaa {} overflows the traced buffer",
                self.width, self.height, self.ssaa
            ))),
        }
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidSettings(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.ssaa == 0 {
            return Err(SceneError::InvalidSettings("ssaa factor must be at least 1".into()));
        }
        if self.pixel_spacing == 0 {
            return Err(SceneError::InvalidSettings("pixel spacing must be at least 1".into()));
        }
        let (w, h) = self.oversampled_size()?;
        if w / self.ssaa == 0 || h / self.ssaa == 0 {
            return Err(SceneError::InvalidSettings(format!(
                "pixel spacing {} leaves nothing to render at {}x{}",
                self.pixel_spacing, self.width, self.height
            )));
        }
        // Both the traced buffer and the displayed image are indexed as
        // `y * width + x`, so their pixel counts must fit in u32.
        let fits = |w: u32, h: u32| w.checked_mul(h).is_some();
        if !fits(w, h) || !fits(self.width, self.height) {
            return Err(SceneError::InvalidSettings(format!(
                "{}x{} at ssaa {} has too many pixels",
                self.width, self.height, self.ssaa
            )));
        }
        Ok(())
    }
}

/// Everything a render pass reads. Immutable once built.
#[derive(Clone, Debug)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Light>,
    pub camera: Camera,
    pub settings: RenderSettings,
}

impl Scene {
    pub fn new(
        spheres: Vec<Sphere>,
        lights: Vec<Light>,
        camera: Camera,
        settings: RenderSettings,
    ) -> Result<Self, SceneError> {
        camera.validate()?;
        settings.validate()?;
        for light in &lights {
            light.validate()?;
        }
        // Spheres are validated by `Sphere::new`, but the fields are public.
        if let Some(bad) = spheres.iter().find(|s| !(s.radius.is_finite() && s.radius > 0.0)) {
            return Err(SceneError::InvalidRadius(bad.radius));
        }
        Ok(Self { spheres, lights, camera, settings })
    }

    /// Three lights over a cluster of matte and mirrored spheres.
    pub fn demo() -> Self {
        let lmb = Material::light_metallic_brown();
        let dmb = Material::dark_matt_brown();

        let lights = vec![
            Light::new(Vec3(-20.0, 20.0, 20.0), 1.5, 1.5),
            Light::new(Vec3(30.0, 20.0, 30.0), 1.7, 1.7),
            Light::new(Vec3(30.0, 50.0, -25.0), 1.3, 1.3),
        ];

        let spheres = [
            (Vec3(-3.0, 0.0, -16.0), 2.0, lmb),
            (Vec3(-9.0, 6.0, -18.0), 5.0, lmb),
            (Vec3(-1.0, -1.5, -12.0), 2.0, dmb),
            (Vec3(1.5, -0.5, -18.0), 3.0, dmb),
            (Vec3(-7.0, -7.0, -14.0), 4.5, dmb),
            (Vec3(7.0, 5.0, -18.0), 4.0, Material::mirror()),
            (Vec3(9.0, -7.5, -18.0), 6.0, Material::scratched_mirror()),
        ]
        .into_iter()
        .map(|(center, radius, material)| Sphere { center, radius, material })
        .collect();

        Self {
            spheres,
            lights,
            camera: Camera::default(),
            settings: RenderSettings::default(),
        }
    }
}

// ── JSON scene file ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CameraJson {
    #[serde(default = "origin", deserialize_with = "vec3_from_array")]
    pos: Vec3,
    #[serde(default = "default_focal_length")]
    focal_length: f32,
    /// Degrees.
    #[serde(default = "default_fov")]
    fov: f32,
    #[serde(default = "default_render_distance")]
    render_distance: f32,
    #[serde(default = "one")]
    scene_lighting: f32,
    #[serde(default = "default_depth")]
    max_reflection_depth: u32,
}

fn origin() -> Vec3 { Vec3::ZERO }
fn one() -> f32 { 1.0 }
fn default_focal_length() -> f32 { Camera::default().focal_length }
fn default_fov() -> f32 { Camera::default().fov.to_degrees() }
fn default_render_distance() -> f32 { Camera::default().render_distance }
fn default_depth() -> u32 { Camera::default().max_reflection_depth }

#[derive(Deserialize)]
struct RenderJson {
    width: u32,
    height: u32,
    #[serde(default = "default_ssaa")]
    ssaa: u32,
    #[serde(default = "default_spacing")]
    pixel_spacing: u32,
    #[serde(default)]
    seed: u64,
}

fn default_ssaa() -> u32 { RenderSettings::default().ssaa }
fn default_spacing() -> u32 { 1 }

#[derive(Deserialize)]
struct MaterialJson {
    rgb: [f32; 3],
    #[serde(default = "one")]
    ambient: f32,
    diffuse: f32,
    #[serde(default)]
    specular: f32,
    #[serde(default = "one")]
    specular_exponent: f32,
    #[serde(default)]
    scattering: f32,
}

#[derive(Deserialize)]
struct SphereJson {
    #[serde(default)]
    name: String,
    #[serde(deserialize_with = "vec3_from_array")]
    center: Vec3,
    radius: f32,
    mat: String,
}

#[derive(Deserialize)]
struct LightJson {
    #[serde(deserialize_with = "vec3_from_array")]
    pos: Vec3,
    diffuse: f32,
    specular: f32,
}

#[derive(Deserialize)]
struct SceneFile {
    camera: CameraJson,
    render: RenderJson,
    materials: HashMap<String, MaterialJson>,
    spheres: Vec<SphereJson>,
    lights: Vec<LightJson>,
}

/// Parse a scene from JSON text.
pub fn parse(data: &str) -> Result<Scene, SceneError> {
    let file: SceneFile = serde_json::from_str(data)?;

    // 1. Build the material library
    let materials: HashMap<String, Material> = file
        .materials
        .into_iter()
        .map(|(name, m)| {
            let mat = Material {
                albedo: m.rgb.into(),
                ambient_reflection: m.ambient,
                diffuse_reflection: m.diffuse,
                specular_reflection: m.specular,
                specular_exponent: m.specular_exponent,
                scattering_constant: m.scattering,
            };
            (name, mat)
        })
        .collect();

    // 2. Spheres look their material up by name
    let spheres = file
        .spheres
        .into_iter()
        .map(|s| {
            let material = *materials.get(&s.mat).ok_or_else(|| SceneError::UnknownMaterial {
                sphere: s.name.clone(),
                material: s.mat.clone(),
            })?;
            Sphere::new(s.center, s.radius, material)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let lights = file
        .lights
        .iter()
        .map(|l| Light::new(l.pos, l.diffuse, l.specular))
        .collect();

    let c = file.camera;
    let camera = Camera::new(
        c.pos,
        c.focal_length,
        c.fov.to_radians(),
        c.render_distance,
        c.scene_lighting,
        c.max_reflection_depth,
    )?;

    let r = file.render;
    let settings = RenderSettings {
        width: r.width,
        height: r.height,
        ssaa: r.ssaa,
        pixel_spacing: r.pixel_spacing,
        seed: r.seed,
    };

    Scene::new(spheres, lights, camera, settings)
}

/// Load a scene from a JSON file on disk.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let data = std::fs::read_to_string(path)?;
    parse(&data)
}
