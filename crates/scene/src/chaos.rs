use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::info;
use wavescape_common::{Camera, Clock};
use wavescape_cull::{CullStats, FrustumCuller};
use wavescape_render::{DrawSurface, Framebuffer, MeshBuffer, MeshId, ModelId, ShaderId, TextureId};
use wavescape_water::{GridConfig, Tunable, WaterGrid};

use crate::error::SceneError;

const NEAR: f32 = 0.1;

/// Wave parameters of the floor and wall surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceParams {
    pub speed: f32,
    pub amount: f32,
    pub height: f32,
    pub color: Vec3,
}

/// Swirl parameters of the top surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopParams {
    pub center: Vec2,
    pub angle: f32,
    pub height: f32,
    pub speed: f32,
    pub color: Vec3,
}

const SURFACE_COLOR: Vec3 = Vec3::new(0.62, 0.37, 0.62);

/// Chaos scene configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaosParams {
    /// Samples per side of the animated surface grid.
    pub grid_size: usize,
    pub far: f32,
    /// Instances per axis; the scene holds `dimension^3` instances.
    pub dimension: usize,
    /// Distance between neighbouring instance anchors.
    pub spacing: f32,
    /// Edge length of each instance cube.
    pub instance_scale: f32,
    /// Where the camera is pinned while `free_camera` is off.
    pub camera_position: Vec3,
    pub free_camera: bool,
    /// Draw only what the culler would normally reject.
    pub invert_culling: bool,
    pub floor: SurfaceParams,
    pub wall: SurfaceParams,
    pub top: TopParams,
}

impl Default for ChaosParams {
    fn default() -> Self {
        let grid_size = 250;
        let half = (grid_size / 2) as f32;
        Self {
            grid_size,
            far: 10_000.0,
            dimension: 16,
            spacing: 20.0,
            instance_scale: 6.0,
            camera_position: Vec3::new(0.0, half, 0.0),
            free_camera: false,
            invert_culling: false,
            floor: SurfaceParams {
                speed: 7.0,
                amount: 10.0,
                height: 0.4,
                color: SURFACE_COLOR,
            },
            wall: SurfaceParams {
                speed: 2.905,
                amount: 21.351,
                height: 0.6,
                color: SURFACE_COLOR,
            },
            top: TopParams {
                center: Vec2::splat(half),
                angle: 0.5,
                height: 5.0,
                speed: 2.0,
                color: SURFACE_COLOR,
            },
        }
    }
}

impl ChaosParams {
    /// Upper bound on `dimension^3`; 64 instances per axis.
    pub const MAX_INSTANCES: usize = 64 * 64 * 64;

    pub fn validate(&self) -> Result<(), SceneError> {
        GridConfig {
            size: self.grid_size,
            seed: None,
        }
        .validate()?;
        let count = self
            .dimension
            .checked_mul(self.dimension)
            .and_then(|square| square.checked_mul(self.dimension));
        if !count.is_some_and(|count| (1..=Self::MAX_INSTANCES).contains(&count)) {
            return Err(SceneError::InvalidParameter {
                key: "dimension",
                value: self.dimension as f32,
            });
        }
        for (key, value, min) in [
            ("far", self.far, NEAR),
            ("spacing", self.spacing, 0.0),
            ("instance_scale", self.instance_scale, 0.0),
        ] {
            if !value.is_finite() || value <= min {
                return Err(SceneError::InvalidParameter { key, value });
            }
        }
        Ok(())
    }

    /// Bounding-sphere radius of one instance cube.
    pub fn instance_radius(&self) -> f32 {
        self.instance_scale * 3f32.sqrt() / 2.0
    }

    /// Surface parameters with their UI metadata and a mutable binding.
    pub fn tunables_mut(&mut self) -> [(Tunable, &mut f32); 9] {
        [
            (
                Tunable::new("floor_speed", "floor speed", 0.0..=20.0),
                &mut self.floor.speed,
            ),
            (
                Tunable::new("floor_amount", "floor amount", 0.0..=100.0),
                &mut self.floor.amount,
            ),
            (
                Tunable::new("floor_height", "floor height", -10.0..=10.0),
                &mut self.floor.height,
            ),
            (
                Tunable::new("wall_speed", "wall speed", 0.0..=10.0),
                &mut self.wall.speed,
            ),
            (
                Tunable::new("wall_amount", "wall amount", 0.0..=40.0),
                &mut self.wall.amount,
            ),
            (
                Tunable::new("wall_height", "wall height", 0.0..=15.0),
                &mut self.wall.height,
            ),
            (
                Tunable::new("top_angle", "top angle", 0.0..=TAU),
                &mut self.top.angle,
            ),
            (
                Tunable::new("top_speed", "top speed", 0.0..=15.0),
                &mut self.top.speed,
            ),
            (
                Tunable::new("top_height", "top height", 0.0..=20.0),
                &mut self.top.height,
            ),
        ]
    }

    pub fn set(&mut self, key: &str, value: f32) -> Result<(), SceneError> {
        let (_, slot) = self
            .tunables_mut()
            .into_iter()
            .find(|(t, _)| t.key == key)
            .ok_or_else(|| SceneError::UnknownParameter(key.to_owned()))?;
        *slot = value;
        Ok(())
    }

    /// Corner the surfaces are laid out from.
    fn surface_origin(&self) -> Vec3 {
        let half = (self.grid_size / 2) as f32;
        Vec3::new(-half, 0.0, -half)
    }
}

/// Engine-owned handles the chaos scene draws with.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaosResources {
    pub instance_model: ModelId,
    pub instance_shader: ShaderId,
    /// Assigned to instances round-robin.
    pub instance_textures: Vec<TextureId>,
    pub floor_shader: ShaderId,
    pub top_shader: ShaderId,
}

/// A static building block of the chaos scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryInstance {
    pub transform: Mat4,
    /// World-space centre of the bounding sphere.
    pub anchor: Vec3,
    pub radius: f32,
    pub texture: TextureId,
    pub shader: ShaderId,
}

/// Thousands of static instances drawn through the frustum culler, framed
/// by three animated grid surfaces.
#[derive(Debug)]
pub struct ChaosScene {
    params: ChaosParams,
    resources: ChaosResources,
    instances: Vec<GeometryInstance>,
    grid_mesh: MeshId,
    culler: FrustumCuller,
}

impl ChaosScene {
    /// Generate the instance lattice and upload the flat surface grid.
    pub fn new(
        params: ChaosParams,
        resources: ChaosResources,
        grid: &mut dyn MeshBuffer,
    ) -> Result<Self, SceneError> {
        params.validate()?;
        if resources.instance_textures.is_empty() {
            return Err(SceneError::MissingTextures);
        }

        let flat = WaterGrid::flat(
            &GridConfig {
                size: params.grid_size,
                seed: None,
            },
            0.0,
        )?;
        grid.upload_indices(flat.indices());
        grid.replace_vertices(flat.current());

        let instances = generate_instances(&params, &resources);
        info!(
            instances = instances.len(),
            grid_size = params.grid_size,
            "chaos scene initialised"
        );
        Ok(Self {
            params,
            resources,
            instances,
            grid_mesh: grid.mesh_id(),
            culler: FrustumCuller::new(),
        })
    }

    pub fn params(&self) -> &ChaosParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ChaosParams {
        &mut self.params
    }

    pub fn instances(&self) -> &[GeometryInstance] {
        &self.instances
    }

    /// Draw one frame and return how many instances survived culling.
    ///
    /// Unless `free_camera` is set the camera is pinned to
    /// `camera_position` first. The culler is rebuilt from this frame's
    /// matrices before any instance is tested.
    pub fn draw(
        &mut self,
        surface: &mut dyn DrawSurface,
        camera: &mut Camera,
        clock: &dyn Clock,
        aspect: f32,
    ) -> CullStats {
        if !self.params.free_camera {
            camera.position = self.params.camera_position;
        }
        let projection = camera.projection_matrix(aspect, NEAR, self.params.far);
        let view = camera.view_matrix();

        self.culler.debug_mode = self.params.invert_culling;
        self.culler.rebuild(view, projection);

        surface.bind_framebuffer(Framebuffer::Default);
        let mut bound = None;
        for instance in &self.instances {
            if !self.culler.check_visible(instance.anchor, instance.radius) {
                continue;
            }
            if bound != Some(instance.shader) {
                surface.bind_shader(instance.shader);
                surface.set_uniform("projection", projection.into());
                surface.set_uniform("view", view.into());
                bound = Some(instance.shader);
            }
            surface.set_uniform("model", instance.transform.into());
            surface.bind_texture(0, instance.texture);
            surface.draw_model(self.resources.instance_model);
        }

        self.draw_surfaces(surface, camera, clock.time_since_init(), view, projection);
        self.culler.stats()
    }

    fn draw_surfaces(
        &self,
        surface: &mut dyn DrawSurface,
        camera: &Camera,
        time: f32,
        view: Mat4,
        projection: Mat4,
    ) {
        let g = self.params.grid_size as f32;
        let origin = self.params.surface_origin();

        let floor_model = surface_model(
            origin + Vec3::new(g, g, -g * 1.25),
            Mat4::from_rotation_z(FRAC_PI_4),
        );
        let wall_model = surface_model(
            origin + Vec3::new(-g * 0.72, g, -g * 0.57),
            Mat4::from_rotation_z(-FRAC_PI_4),
        );
        for (model, params) in [
            (floor_model, &self.params.floor),
            (wall_model, &self.params.wall),
        ] {
            surface.bind_shader(self.resources.floor_shader);
            surface.set_uniform("model", model.into());
            surface.set_uniform("projection", projection.into());
            surface.set_uniform("view", view.into());
            surface.set_uniform("vertexColor", params.color.into());
            surface.set_uniform("speed", params.speed.into());
            surface.set_uniform("amount", params.amount.into());
            surface.set_uniform("height", params.height.into());
            surface.set_uniform("timeSinceStart", time.into());
            surface.draw_grid(self.grid_mesh);
        }

        let top = &self.params.top;
        let top_model = surface_model(origin + Vec3::new(0.0, g, -g * 1.25), Mat4::IDENTITY);
        surface.bind_shader(self.resources.top_shader);
        surface.set_uniform("model", top_model.into());
        surface.set_uniform("projection", projection.into());
        surface.set_uniform("view", view.into());
        surface.set_uniform("viewPos", camera.position.into());
        surface.set_uniform("vertexColor", top.color.into());
        surface.set_uniform("center", top.center.into());
        surface.set_uniform("angle", top.angle.into());
        surface.set_uniform("speed", top.speed.into());
        surface.set_uniform("height", top.height.into());
        surface.set_uniform("timeSinceStart", time.into());
        surface.draw_grid(self.grid_mesh);
    }

    pub fn destroy(&mut self) {
        info!(instances = self.instances.len(), "chaos scene destroyed");
        self.instances.clear();
    }
}

/// Stand a grid upright at `position`: rotate 90 degrees about X, then apply `turn`.
fn surface_model(position: Vec3, turn: Mat4) -> Mat4 {
    Mat4::from_translation(position) * Mat4::from_rotation_x(FRAC_PI_2) * turn
}

/// Cubic lattice of `dimension^3` instances centred on the pinned camera.
fn generate_instances(params: &ChaosParams, resources: &ChaosResources) -> Vec<GeometryInstance> {
    let d = params.dimension;
    let extent = (d - 1) as f32 * params.spacing;
    let start = params.camera_position - Vec3::splat(extent / 2.0);
    let radius = params.instance_radius();
    let textures = &resources.instance_textures;

    let mut instances = Vec::with_capacity(d * d * d);
    for x in 0..d {
        for y in 0..d {
            for z in 0..d {
                let anchor = start + Vec3::new(x as f32, y as f32, z as f32) * params.spacing;
                instances.push(GeometryInstance {
                    transform: Mat4::from_translation(anchor)
                        * Mat4::from_scale(Vec3::splat(params.instance_scale)),
                    anchor,
                    radius,
                    texture: textures[instances.len() % textures.len()],
                    shader: resources.instance_shader,
                });
            }
        }
    }
    instances
}
