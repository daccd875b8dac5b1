use glam::{Mat4, Vec3};
use tracing::{debug, info};
use wavescape_common::{Camera, Clock};
use wavescape_render::{
    DepthAttachment, DrawSurface, Framebuffer, RenderTarget, RenderTargetAllocator, SceneProvider,
    ShaderId, TargetDescriptor, TextureId,
};
use wavescape_water::{WaterMesh, WaterParams};

use crate::error::CompositorError;
use crate::mirror::mirror_camera;
use crate::uniforms as u;

const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
const WATER_MODEL_SCALE: f32 = 0.5;

/// Shader programs used by the three passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositorShaders {
    /// Scene models as seen from the mirrored camera.
    pub reflection: ShaderId,
    /// Scene models as seen from the real camera.
    pub refraction: ShaderId,
    /// Water surface sampling both off-screen passes.
    pub blending: ShaderId,
}

/// Renders the water surface over a scene through two off-screen passes.
#[derive(Debug)]
pub struct WaterCompositor {
    shaders: CompositorShaders,
    reflection: RenderTarget,
    refraction: RenderTarget,
    refraction_depth: TextureId,
}

impl WaterCompositor {
    /// Allocate the reflection and refraction targets at `viewport` size.
    ///
    /// The scene must already be initialised.
    pub fn new(
        scene: &dyn SceneProvider,
        allocator: &mut dyn RenderTargetAllocator,
        shaders: CompositorShaders,
        viewport: (u32, u32),
    ) -> Result<Self, CompositorError> {
        if !scene.is_ready() {
            return Err(CompositorError::SceneNotReady);
        }
        let (width, height) = viewport;
        let reflection = allocator.create_target(&TargetDescriptor {
            label: "water reflection",
            width,
            height,
            depth: DepthAttachment::DepthStencilRenderbuffer,
        })?;
        let refraction = match allocator.create_target(&TargetDescriptor {
            label: "water refraction",
            width,
            height,
            depth: DepthAttachment::SampledDepthWithStencil,
        }) {
            Ok(target) => target,
            Err(err) => {
                allocator.release_target(reflection.id)?;
                return Err(err.into());
            }
        };
        let Some(refraction_depth) = refraction.depth else {
            allocator.release_target(reflection.id)?;
            allocator.release_target(refraction.id)?;
            return Err(CompositorError::MissingDepthTexture(refraction.id));
        };
        info!(width, height, "water compositor targets allocated");
        Ok(Self {
            shaders,
            reflection,
            refraction,
            refraction_depth,
        })
    }

    pub fn reflection_target(&self) -> &RenderTarget {
        &self.reflection
    }

    pub fn refraction_target(&self) -> &RenderTarget {
        &self.refraction
    }

    /// Render one frame: reflection pass, refraction pass, then the composite
    /// into the default framebuffer.
    pub fn draw(
        &self,
        surface: &mut dyn DrawSurface,
        scene: &dyn SceneProvider,
        camera: &Camera,
        clock: &dyn Clock,
        params: &WaterParams,
        water: WaterMesh,
    ) -> Result<(), CompositorError> {
        if !scene.is_ready() {
            return Err(CompositorError::SceneNotReady);
        }
        let projection = scene.projection();
        let time = clock.time_since_init();

        let underwater = mirror_camera(camera, params.height);
        self.scene_pass(
            surface,
            scene,
            Framebuffer::Offscreen(self.reflection.id),
            self.shaders.reflection,
            underwater.view_matrix(),
            projection,
            params,
            time,
        );
        surface.submit();
        debug!("reflection pass submitted");

        self.scene_pass(
            surface,
            scene,
            Framebuffer::Offscreen(self.refraction.id),
            self.shaders.refraction,
            camera.view_matrix(),
            projection,
            params,
            time,
        );
        surface.submit();
        debug!("refraction pass submitted");

        self.composite(surface, camera, projection, params, time, water);
        Ok(())
    }

    /// Release both render targets.
    pub fn destroy(self, allocator: &mut dyn RenderTargetAllocator) -> Result<(), CompositorError> {
        allocator.release_target(self.reflection.id)?;
        allocator.release_target(self.refraction.id)?;
        info!("water compositor targets released");
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn scene_pass(
        &self,
        surface: &mut dyn DrawSurface,
        scene: &dyn SceneProvider,
        framebuffer: Framebuffer,
        shader: ShaderId,
        view: Mat4,
        projection: Mat4,
        params: &WaterParams,
        time: f32,
    ) {
        surface.bind_framebuffer(framebuffer);
        surface.clear(CLEAR_COLOR);

        surface.bind_shader(shader);
        surface.set_uniform(u::WATER_HEIGHT, params.height.into());
        surface.set_uniform(u::PROJECTION, projection.into());
        surface.set_uniform(u::VIEW, view.into());
        surface.set_uniform(u::SPEED, params.speed.into());
        surface.set_uniform(u::AMOUNT, params.amount.into());
        surface.set_uniform(u::HEIGHT, params.height.into());
        surface.set_uniform(u::TIME_SINCE_START, time.into());
        for instance in scene.instances() {
            surface.set_uniform(u::MODEL, instance.transform.model_matrix().into());
            surface.draw_model(instance.model);
        }

        surface.draw_skybox(view, projection);
    }

    fn composite(
        &self,
        surface: &mut dyn DrawSurface,
        camera: &Camera,
        projection: Mat4,
        params: &WaterParams,
        time: f32,
        water: WaterMesh,
    ) {
        surface.bind_framebuffer(Framebuffer::Default);
        surface.bind_shader(self.shaders.blending);

        let model = Mat4::from_translation(Vec3::new(0.0, params.height, 0.0))
            * Mat4::from_scale(Vec3::splat(WATER_MODEL_SCALE));
        surface.set_uniform(u::MODEL, model.into());
        surface.set_uniform(u::PROJECTION, projection.into());
        surface.set_uniform(u::VIEW, camera.view_matrix().into());
        surface.set_uniform(u::VIEW_POS, camera.position.into());
        surface.set_uniform(u::REFRACTION_STRENGTH, params.refraction_strength.into());
        surface.set_uniform(u::REFRACTION_RATIO, params.refraction_ratio.into());
        surface.set_uniform(u::WAVE_STRENGTH, params.speed.into());
        surface.set_uniform(u::SPEED, params.speed.into());
        surface.set_uniform(u::AMOUNT, params.amount.into());
        surface.set_uniform(u::HEIGHT, params.height.into());
        surface.set_uniform(u::TIME_SINCE_START, time.into());
        surface.set_uniform(u::REFLECTION_MAP, (u::REFLECTION_UNIT as i32).into());
        surface.set_uniform(u::REFRACTION_MAP, (u::REFRACTION_UNIT as i32).into());
        surface.set_uniform(u::DEPTH_MAP, (u::DEPTH_UNIT as i32).into());

        surface.bind_texture(u::REFLECTION_UNIT, self.reflection.color);
        surface.bind_texture(u::REFRACTION_UNIT, self.refraction.color);
        surface.bind_texture(u::DEPTH_UNIT, self.refraction_depth);

        surface.draw_indexed(water.mesh, water.index_count);
    }
}
