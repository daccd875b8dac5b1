//! Water compositing over a host scene.
//!
//! Each frame renders the scene twice off-screen (once from a camera mirrored
//! across the water plane, once from the real camera) and then draws the
//! water mesh to the default framebuffer, sampling both passes.
//!
//! # Invariants
//! - Passes run in the order reflection, refraction, composite. Each
//!   off-screen pass ends with a [`DrawSurface::submit`](wavescape_render::DrawSurface::submit).
//! - Render targets are sized once at construction and never resized.
//! - The compositor reads the water mesh handle only; the lattice stays with
//!   the simulator.

mod compositor;
mod error;
mod mirror;
pub mod uniforms;

pub use compositor::{CompositorShaders, WaterCompositor};
pub use error::CompositorError;
pub use mirror::mirror_camera;

pub fn crate_info() -> &'static str {
    "wavescape-compositor v0.1.0"
}
