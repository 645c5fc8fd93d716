use crate::algebra::Vec3;

/// Phong surface description.
///
/// `ambient_reflection` is centred on 1: values above brighten the surface,
/// values below darken it. `scattering_constant` blends between a plain
/// Phong surface (0) and a perfect mirror (1); anything in between is a
/// mirror blurred by random perturbation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub albedo: Vec3,
    pub ambient_reflection: f32,
    pub diffuse_reflection: f32,
    pub specular_reflection: f32,
    pub specular_exponent: f32,
    pub scattering_constant: f32,
}

impl Material {
    pub fn is_reflective(&self) -> bool {
        self.scattering_constant != 0.0
    }

    pub fn mirror() -> Self {
        Self {
            albedo: Vec3(1.0, 1.0, 1.0),
            ambient_reflection: 1.0,
            diffuse_reflection: 0.01,
            specular_reflection: 10.0,
            specular_exponent: 1425.0,
            scattering_constant: 1.0,
        }
    }

    pub fn scratched_mirror() -> Self {
        Self { scattering_constant: 0.3, ..Self::mirror() }
    }

    pub fn light_metallic_brown() -> Self {
        Self {
            albedo: Vec3(0.6, 0.6, 0.5),
            ambient_reflection: 1.0,
            diffuse_reflection: 0.55,
            specular_reflection: 0.2,
            specular_exponent: 50.0,
            scattering_constant: 0.0,
        }
    }

    pub fn dark_matt_brown() -> Self {
        Self {
            albedo: Vec3(0.3, 0.1, 0.1),
            ambient_reflection: 1.0,
            diffuse_reflection: 0.9,
            specular_reflection: 0.1,
            specular_exponent: 10.0,
            scattering_constant: 0.0,
        }
    }
}

impl Default for Material {
    /// Matte white, lit only by diffuse light.
    fn default() -> Self {
        Self {
            albedo: Vec3(1.0, 1.0, 1.0),
            ambient_reflection: 1.0,
            diffuse_reflection: 1.0,
            specular_reflection: 0.0,
            specular_exponent: 1.0,
            scattering_constant: 0.0,
        }
    }
}
