//! Heightfield water: a square lattice of height samples relaxed towards the
//! average of its neighbours, kicked by random perturbations, and mirrored
//! into a streaming GPU vertex buffer.
//!
//! # Invariants
//! - Lattice side N satisfies `2 <= N` and `N*N - 1 <= u16::MAX`, so every
//!   triangle index fits the 16-bit index buffer.
//! - The simulator is the only writer of both lattices and of its buffer.
//! - The index buffer is uploaded once; vertex uploads are full replaces.

mod error;
mod grid;
mod params;
mod simulator;

pub use error::WaterError;
pub use grid::{Perturbation, WaterGrid, build_indices};
pub use params::{GridConfig, Tunable, WaterParams};
pub use simulator::{TickReport, WaterMesh, WaterSimulator};

pub fn crate_info() -> &'static str {
    "wavescape-water v0.1.0"
}
