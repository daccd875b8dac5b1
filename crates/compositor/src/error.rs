use wavescape_render::{RenderError, TargetId};

#[derive(Debug, thiserror::Error)]
pub enum CompositorError {
    /// The compositor was created before its scene finished loading.
    #[error("scene is not initialised; create the scene before the water compositor")]
    SceneNotReady,
    #[error("render target {0:?} has no sampleable depth texture")]
    MissingDepthTexture(TargetId),
    #[error(transparent)]
    Render(#[from] RenderError),
}
