//! Frustum culling: six clip planes from the view-projection matrix, tested
//! against bounding spheres of static instances.
//!
//! # Invariants
//! - Planes are rebuilt once per frame before the first visibility query.
//! - Plane normals have unit length, or are zero for a degenerate plane.
//! - Debug mode inverts every answer and nothing else.

mod culler;
mod frustum;

pub use culler::{CullStats, FrustumCuller};
pub use frustum::{Frustum, FrustumPlane, Plane};

pub fn crate_info() -> &'static str {
    "wavescape-cull v0.1.0"
}
