//! Shared types used by every wavescape crate.
//!
//! # Invariants
//! - A `Camera` is a plain value; scenes never hold a process-wide camera.
//! - Clocks are advanced by the frame driver only.

mod camera;
mod clock;
mod types;

pub use camera::Camera;
pub use clock::{Clock, FrameClock};
pub use types::Transform;

pub fn crate_info() -> &'static str {
    "wavescape-common v0.1.0"
}
