use wavescape_water::WaterError;

/// Errors from scene description loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scene describes no models")]
    NoModels,
    #[error("skybox face {index} has an empty path")]
    BadSkybox { index: usize },
    #[error("model {index} has an empty path")]
    EmptyModelPath { index: usize },
    #[error("chaos scene needs at least one instance texture")]
    MissingTextures,
    #[error("`{key}` is out of range: {value}")]
    InvalidParameter { key: &'static str, value: f32 },
    #[error("unknown chaos parameter `{0}`")]
    UnknownParameter(String),
    #[error(transparent)]
    Grid(#[from] WaterError),
}
