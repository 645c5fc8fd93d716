use rand::Rng;
use serde::Deserialize;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Point, direction or linear (pre-gamma) color, depending on context.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3(pub f32, pub f32, pub f32);

impl Vec3 {
    pub const ZERO: Vec3 = Vec3(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3(1.0, 1.0, 1.0);

    pub fn add(self, v: Self) -> Self { Self(self.0+v.0, self.1+v.1, self.2+v.2) }
    pub fn sub(self, v: Self) -> Self { Self(self.0-v.0, self.1-v.1, self.2-v.2) }
    pub fn scale(self, f: f32) -> Self { Self(self.0*f, self.1*f, self.2*f) }
    pub fn div(self, f: f32) -> Self { Self(self.0/f, self.1/f, self.2/f) }
    /// Component-wise product, for tinting colors.
    pub fn mul(self, v: Self) -> Self { Self(self.0*v.0, self.1*v.1, self.2*v.2) }
    pub fn dot(self, v: Self) -> f32 { self.0*v.0 + self.1*v.1 + self.2*v.2 }
    pub fn norm(self) -> f32 { self.dot(self).sqrt() }
    pub fn neg(self) -> Self { Self(-self.0,-self.1,-self.2) }

    /// Unit vector in the same direction. Never called on the zero vector.
    pub fn normalize(self) -> Self {
        let n = self.norm();
        debug_assert!(n > 0.0, "normalize called on a zero-length vector");
        self.scale(1.0/n)
    }

    pub fn min_scalar(self, f: f32) -> Self { Self(self.0.min(f), self.1.min(f), self.2.min(f)) }
    pub fn max_scalar(self, f: f32) -> Self { Self(self.0.max(f), self.1.max(f), self.2.max(f)) }

    /// Clamp every component into [0, 1].
    pub fn clamp01(self) -> Self { self.max_scalar(0.0).min_scalar(1.0) }

    pub fn map(self, f: impl Fn(f32) -> f32) -> Self { Self(f(self.0), f(self.1), f(self.2)) }
    pub fn is_finite(self) -> bool { self.0.is_finite() && self.1.is_finite() && self.2.is_finite() }
}

/// `(1 - t)·a + t·b`. `t` is not clamped.
pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a.scale(1.0 - t).add(b.scale(t))
}

/// Mirror `l` about the normal `n`: `normalize(2·(l·n)·n − l)`.
///
/// Both vectors point away from the surface, so the result also does.
pub fn reflect(l: Vec3, n: Vec3) -> Vec3 {
    n.scale(2.0 * l.dot(n)).sub(l).normalize()
}

/// Each component uniform in `[0, 1)`.
pub fn random_unit_cube(rng: &mut impl Rng) -> Vec3 {
    Vec3(rng.r#gen::<f32>(), rng.r#gen::<f32>(), rng.r#gen::<f32>())
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, v: Vec3) -> Vec3 { Vec3::add(self, v) }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, v: Vec3) -> Vec3 { Vec3::sub(self, v) }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    fn mul(self, f: f32) -> Vec3 { self.scale(f) }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 { v.scale(self) }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;
    fn div(self, f: f32) -> Vec3 { Vec3::div(self, f) }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 { Vec3::neg(self) }
}

impl From<[f32; 3]> for Vec3 {
    fn from(a: [f32; 3]) -> Self { Vec3(a[0], a[1], a[2]) }
}

/* Custom helper so Serde turns a JSON array into Vec3 */
pub fn vec3_from_array<'de, D>(d: D) -> Result<Vec3, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let arr = <[f32; 3]>::deserialize(d)?;
    Ok(arr.into())
}
