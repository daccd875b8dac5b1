//! wgpu implementations of the rendering adapter traits.
//!
//! Provides a headless device, a mesh buffer that streams the water lattice
//! into a vertex buffer, and the off-screen render targets used by the water
//! compositor.
//!
//! # Invariants
//! - Vertex uploads replace the whole buffer; there are no partial writes.
//! - Render targets are created at a fixed size and never resized.
//! - All GPU calls happen on the thread that owns the [`GpuContext`].

mod context;
mod mesh;
mod target;

pub use context::{GpuContext, GpuError};
pub use mesh::{WgpuMeshBuffer, vertex_buffer_size};
pub use target::{COLOR_FORMAT, WgpuTargetAllocator, depth_format, depth_usage};

pub fn crate_info() -> &'static str {
    "wavescape-render-wgpu v0.1.0"
}
