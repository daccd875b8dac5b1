//! Scenes rendered around the water: a JSON-described set of placed models,
//! and a procedurally generated "chaos" scene drawn through the frustum culler.
//!
//! Scenes hand out model and texture handles only; loading the files behind
//! those handles belongs to the embedding engine.

mod chaos;
mod description;
mod error;
mod registry;
mod static_scene;

pub use chaos::{ChaosParams, ChaosResources, ChaosScene, GeometryInstance, SurfaceParams, TopParams};
pub use description::{DEFAULT_SKYBOX, ModelPlacement, SceneDescription};
pub use error::SceneError;
pub use registry::ModelRegistry;
pub use static_scene::StaticScene;

pub fn crate_info() -> &'static str {
    "wavescape-scene v0.1.0"
}
