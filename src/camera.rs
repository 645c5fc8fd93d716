use crate::{algebra::Vec3, error::SceneError};
use std::f32::consts::PI;

/// Distance the camera travels per movement step.
pub const MOVE_STEP: f32 = 0.1;

/// Pinhole camera looking down -z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Larger values narrow the view.
    pub focal_length: f32,
    /// Full field of view, radians.
    pub fov: f32,
    /// Hits further away than this are treated as background.
    pub render_distance: f32,
    /// Global lighting bias, centred on 1 like `Material::ambient_reflection`.
    pub scene_lighting: f32,
    pub max_reflection_depth: u32,
}

impl Camera {
    pub fn new(
        position: Vec3,
        focal_length: f32,
        fov: f32,
        render_distance: f32,
        scene_lighting: f32,
        max_reflection_depth: u32,
    ) -> Result<Self, SceneError> {
        let camera = Self {
            position,
            focal_length,
            fov,
            render_distance,
            scene_lighting,
            max_reflection_depth,
        };
        camera.validate()?;
        Ok(camera)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if !self.position.is_finite() {
            return Err(SceneError::InvalidCamera(format!(
                "position must be finite, got {:?}",
                self.position
            )));
        }
        if !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return Err(SceneError::InvalidCamera(format!(
                "focal length must be positive, got {}",
                self.focal_length
            )));
        }
        if !(self.fov > 0.0 && self.fov < PI) {
            return Err(SceneError::InvalidCamera(format!(
                "field of view must lie in (0, pi), got {}",
                self.fov
            )));
        }
        if !(self.render_distance > 0.0) {
            return Err(SceneError::InvalidCamera(format!(
                "render distance must be positive, got {}",
                self.render_distance
            )));
        }
        if !self.scene_lighting.is_finite() {
            return Err(SceneError::InvalidCamera(format!(
                "scene lighting must be finite, got {}",
                self.scene_lighting
            )));
        }
        Ok(())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            focal_length: 0.6,
            fov: PI / 2.0,
            render_distance: 1000.0,
            scene_lighting: 1.0,
            max_reflection_depth: 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Forward,
    Back,
    Up,
    Down,
}

impl Movement {
    fn offset(self) -> Vec3 {
        match self {
            Movement::Left    => Vec3(-MOVE_STEP, 0.0, 0.0),
            Movement::Right   => Vec3(MOVE_STEP, 0.0, 0.0),
            Movement::Forward => Vec3(0.0, 0.0, -MOVE_STEP),
            Movement::Back    => Vec3(0.0, 0.0, MOVE_STEP),
            Movement::Up      => Vec3(0.0, MOVE_STEP, 0.0),
            Movement::Down    => Vec3(0.0, -MOVE_STEP, 0.0),
        }
    }
}

/// Per-frame state owned by whoever drives rendering. A new frame is
/// rendered from a snapshot of this value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    pub camera: Camera,
}

impl RenderState {
    pub fn new(camera: Camera) -> Self {
        Self { camera }
    }

    pub fn nudge(&mut self, movement: Movement) {
        self.camera.position = self.camera.position + movement.offset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_is_valid() {
        assert!(Camera::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_fov() {
        for fov in [0.0, -1.0, PI, 4.0] {
            let result = Camera::new(Vec3::ZERO, 1.0, fov, 100.0, 1.0, 2);
            assert!(matches!(result, Err(SceneError::InvalidCamera(_))), "fov {fov}");
        }
    }

    #[test]
    fn test_rejects_non_positive_focal_length() {
        let result = Camera::new(Vec3::ZERO, 0.0, PI / 2.0, 100.0, 1.0, 2);
        assert!(matches!(result, Err(SceneError::InvalidCamera(_))));
    }

    #[test]
    fn test_rejects_non_finite_position_and_lighting() {
        let result = Camera::new(Vec3::ZERO, 1.0, PI / 2.0, 100.0, f32::NAN, 2);
        assert!(matches!(result, Err(SceneError::InvalidCamera(_))));
        let result = Camera::new(Vec3::ZERO, 1.0, PI / 2.0, 100.0, f32::INFINITY, 2);
        assert!(matches!(result, Err(SceneError::InvalidCamera(_))));
        let result = Camera::new(Vec3(f32::INFINITY, 0.0, 0.0), 1.0, PI / 2.0, 100.0, 1.0, 2);
        assert!(matches!(result, Err(SceneError::InvalidCamera(_))));
    }

    #[test]
    fn test_nudge_moves_camera() {
        let mut state = RenderState::new(Camera::default());
        state.nudge(Movement::Forward);
        state.nudge(Movement::Forward);
        state.nudge(Movement::Up);
        state.nudge(Movement::Left);
        let p = state.camera.position;
        assert!((p - Vec3(-0.1, 0.1, -0.2)).norm() < 1e-6);

        state.nudge(Movement::Right);
        state.nudge(Movement::Down);
        state.nudge(Movement::Back);
        state.nudge(Movement::Back);
        assert!(state.camera.position.norm() < 1e-6);
    }
}
