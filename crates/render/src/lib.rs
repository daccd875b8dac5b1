//! Rendering Adapter: renderer-agnostic interface.
//!
//! Scenes talk to the GPU through [`DrawSurface`] (bind shader, set named
//! uniforms, issue draws), [`RenderTargetAllocator`] and [`MeshBuffer`].
//! Windowing, shader compilation, model and skybox drawing live behind these
//! traits and are owned by the embedding engine.
//!
//! # Invariants
//! - Uniform names are a binding contract with externally authored shaders.
//! - Commands are issued from a single thread, in call order.
//!
//! # Workaround
//! [`RecordingSurface`] records every command instead of executing it. It backs
//! the headless CLI and the tests; swap in a GPU implementation without
//! changing consumers.

mod mesh;
mod recording;
mod scene;
mod surface;
mod target;

pub use mesh::{BufferUsage, MemoryMeshBuffer, MeshBuffer};
pub use recording::{DrawCommand, RecordingSurface};
pub use scene::{ModelInstance, SceneProvider};
pub use surface::{DrawSurface, Framebuffer, MeshId, ModelId, ShaderId, TextureId, UniformValue};
pub use target::{
    DepthAttachment, RenderError, RenderTarget, RenderTargetAllocator, TargetDescriptor, TargetId,
};

pub fn crate_info() -> &'static str {
    "wavescape-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
