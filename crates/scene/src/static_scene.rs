use glam::Mat4;
use tracing::info;
use wavescape_common::Camera;
use wavescape_render::{DrawSurface, ModelInstance, SceneProvider, ShaderId};

use crate::description::SceneDescription;
use crate::registry::ModelRegistry;

/// Near and far planes of the static scene's projection.
const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

/// Placed models from a [`SceneDescription`], drawn with one model shader.
///
/// This is the scene the water compositor reflects and refracts.
#[derive(Debug, Clone)]
pub struct StaticScene {
    registry: ModelRegistry,
    instances: Vec<ModelInstance>,
    skybox: [String; 6],
    projection: Mat4,
    ready: bool,
}

impl StaticScene {
    pub fn new(description: &SceneDescription) -> Self {
        let mut registry = ModelRegistry::new();
        let instances: Vec<ModelInstance> = description
            .models
            .iter()
            .map(|placement| ModelInstance {
                model: registry.register(&placement.model),
                transform: placement.transform(),
            })
            .collect();
        info!(
            instances = instances.len(),
            models = registry.len(),
            "static scene initialised"
        );
        Self {
            registry,
            instances,
            skybox: description.skybox.clone(),
            projection: Mat4::IDENTITY,
            ready: true,
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn skybox(&self) -> &[String; 6] {
        &self.skybox
    }

    /// Recompute the projection from the camera zoom; call once per frame
    /// before anything reads [`SceneProvider::projection`].
    pub fn update_projection(&mut self, camera: &Camera, aspect: f32) {
        self.projection = camera.projection_matrix(aspect, NEAR, FAR);
    }

    /// Draw every model with `shader`, then the skybox.
    pub fn draw(&self, surface: &mut dyn DrawSurface, camera: &Camera, shader: ShaderId) {
        let view = camera.view_matrix();
        surface.bind_shader(shader);
        surface.set_uniform("projection", self.projection.into());
        surface.set_uniform("view", view.into());
        for instance in &self.instances {
            surface.set_uniform("model", instance.transform.model_matrix().into());
            surface.draw_model(instance.model);
        }
        surface.draw_skybox(view, self.projection);
    }

    pub fn destroy(&mut self) {
        self.instances.clear();
        self.ready = false;
    }
}

impl SceneProvider for StaticScene {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn instances(&self) -> &[ModelInstance] {
        &self.instances
    }

    fn projection(&self) -> Mat4 {
        self.projection
    }
}
