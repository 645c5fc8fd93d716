//! src/sphere.rs
//! -------------
//! The only primitive: a sphere carrying its own material.

use crate::{algebra::Vec3, error::SceneError, material::Material, ray::Ray};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center   : Vec3,
    pub radius   : f32,
    pub material : Material,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Material) -> Result<Self, SceneError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Self { center, radius, material })
    }

    /// Geometric ray/sphere test. Returns the distance to the *near* root
    /// only: when the near root lies behind the origin (origin inside the
    /// sphere, or sphere behind the ray) the ray is reported as a miss even
    /// though the far root may be ahead of it.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let oc   = self.center.sub(ray.origin);
        let tca  = oc.dot(ray.direction);
        let d2   = oc.dot(oc) - tca * tca;
        let r2   = self.radius * self.radius;
        if d2 > r2 { return None; }

        let thc = (r2 - d2).sqrt();
        let t0  = tca - thc;
        (t0 >= 0.0).then_some(t0)
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        point.sub(self.center).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn unit_sphere_at(center: Vec3) -> Sphere {
        Sphere::new(center, 1.0, Material::default()).unwrap()
    }

    #[test]
    fn test_rejects_bad_radius() {
        for r in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let result = Sphere::new(Vec3::ZERO, r, Material::default());
            assert!(matches!(result, Err(SceneError::InvalidRadius(_))));
        }
    }

    #[test]
    fn test_head_on_hit() {
        let s = unit_sphere_at(Vec3(0.0, 0.0, -5.0));
        let ray = Ray::new(Vec3::ZERO, Vec3(0.0, 0.0, -1.0));
        let t = s.intersect(&ray).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        let n = s.normal_at(ray.at(t));
        assert!((n - Vec3(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_miss_beside_sphere() {
        let s = unit_sphere_at(Vec3(0.0, 0.0, -5.0));
        let ray = Ray::new(Vec3(2.0, 0.0, 0.0), Vec3(0.0, 0.0, -1.0));
        assert_eq!(s.intersect(&ray), None);
    }

    #[test]
    fn test_sphere_behind_ray_misses() {
        let s = unit_sphere_at(Vec3(0.0, 0.0, 5.0));
        let ray = Ray::new(Vec3::ZERO, Vec3(0.0, 0.0, -1.0));
        assert_eq!(s.intersect(&ray), None);
    }

    #[test]
    fn test_origin_inside_sphere_misses() {
        // The far root (t = 0.5 + ...) is ahead of the ray, but only the
        // near root counts.
        let s = unit_sphere_at(Vec3(0.0, 0.0, -0.5));
        let ray = Ray::new(Vec3::ZERO, Vec3(0.0, 0.0, -1.0));
        assert_eq!(s.intersect(&ray), None);
    }

    #[test]
    fn test_hit_distance_lies_on_surface() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = 0;
        for _ in 0..2000 {
            let center = Vec3(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-12.0..-4.0),
            );
            let radius = rng.gen_range(0.1..2.5);
            let s = Sphere::new(center, radius, Material::default()).unwrap();
            let dir = Vec3(
                rng.gen_range(-0.5..0.5),
                rng.gen_range(-0.5..0.5),
                -1.0,
            );
            let ray = Ray::new(Vec3::ZERO, dir);
            if let Some(t) = s.intersect(&ray) {
                hits += 1;
                let dist = (ray.at(t) - center).norm();
                assert!((dist - radius).abs() < 1e-3 * radius.max(1.0), "t={t} dist={dist} r={radius}");
            }
        }
        assert!(hits > 0);
    }
}
