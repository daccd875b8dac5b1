use glam::Mat4;
use wavescape_common::Transform;

use crate::surface::ModelId;

/// One placed model of a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelInstance {
    pub model: ModelId,
    pub transform: Transform,
}

/// Read-only view of a scene that other programs render from.
///
/// This is the only capability the water compositor gets from the scene it
/// reflects: the placed models and the projection in use this frame. The
/// skybox is drawn through [`crate::DrawSurface::draw_skybox`].
pub trait SceneProvider {
    /// True once the scene's models are loaded.
    fn is_ready(&self) -> bool;
    fn instances(&self) -> &[ModelInstance];
    fn projection(&self) -> Mat4;
}
