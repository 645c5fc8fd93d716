use std::path::PathBuf;

/// Problems with a scene definition. All of them are caught before
/// rendering starts.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("sphere radius must be finite and positive, got {0}")]
    InvalidRadius(f32),

    #[error("invalid camera: {0}")]
    InvalidCamera(String),

    #[error("invalid light: {0}")]
    InvalidLight(String),

    #[error("invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("sphere '{sphere}' references unknown material '{material}'")]
    UnknownMaterial { sphere: String, material: String },

    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("refusing to overwrite existing file {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}
