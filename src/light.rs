use crate::{algebra::Vec3, error::SceneError};

/// Point light. The two components scale the material's diffuse and
/// specular terms for every surface this light reaches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub diffuse_component: f32,
    pub specular_component: f32,
}

impl Light {
    pub fn new(position: Vec3, diffuse_component: f32, specular_component: f32) -> Self {
        Self { position, diffuse_component, specular_component }
    }

    /// Position must be finite and both components finite and non-negative.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !self.position.is_finite() {
            return Err(SceneError::InvalidLight(format!(
                "position must be finite, got {:?}",
                self.position
            )));
        }
        for (name, value) in [("diffuse", self.diffuse_component), ("specular", self.specular_component)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SceneError::InvalidLight(format!(
                    "{name} component must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
