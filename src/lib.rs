//! Whitted-style ray tracer over spheres and point lights.
//!
//! A [`scene::Scene`] is traced at a supersampled resolution by
//! [`renderer::render`], box-filtered down to display size and returned as
//! 8-bit RGBA, ready for [`export::save`] or a display surface.

pub mod algebra;
pub mod camera;
pub mod error;
pub mod export;
pub mod light;
pub mod material;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod sphere;
pub mod tonemap;

pub use algebra::Vec3;
pub use camera::{Camera, Movement, RenderState};
pub use error::{ExportError, SceneError};
pub use light::Light;
pub use material::Material;
pub use renderer::{render, Tracer};
pub use scene::{RenderSettings, Scene};
pub use sphere::Sphere;
pub use tonemap::ColorBuffer;
