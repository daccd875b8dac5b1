use std::collections::BTreeMap;
use std::fmt;

use glam::Mat4;

use crate::surface::{
    DrawSurface, Framebuffer, MeshId, ModelId, ShaderId, TextureId, UniformValue,
};
use crate::target::{
    DepthAttachment, RenderError, RenderTarget, RenderTargetAllocator, TargetDescriptor, TargetId,
};

/// A single recorded surface command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BindFramebuffer(Framebuffer),
    Clear([f32; 4]),
    BindShader(ShaderId),
    SetUniform { name: String, value: UniformValue },
    BindTexture { unit: u32, texture: TextureId },
    DrawModel(ModelId),
    DrawGrid(MeshId),
    DrawIndexed { mesh: MeshId, index_count: u32 },
    DrawSkybox { view: Mat4, projection: Mat4 },
    Submit,
}

impl DrawCommand {
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Self::DrawModel(_)
                | Self::DrawGrid(_)
                | Self::DrawIndexed { .. }
                | Self::DrawSkybox { .. }
        )
    }
}

/// Debug surface: records commands instead of executing them.
///
/// Also acts as a render target allocator handing out sequential ids, so a
/// whole program can run headless. Useful for CLI output, logging, and
/// testing pass ordering.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    targets: BTreeMap<TargetId, RenderTarget>,
    next_id: u32,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain and return the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    /// The most recent value assigned to a uniform, regardless of shader.
    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::SetUniform { name: n, value } if n == name => Some(*value),
            _ => None,
        })
    }

    /// Live render targets, ordered by id.
    pub fn targets(&self) -> impl Iterator<Item = &RenderTarget> {
        self.targets.values()
    }

    fn next_handle(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl DrawSurface for RecordingSurface {
    fn bind_framebuffer(&mut self, framebuffer: Framebuffer) {
        self.commands.push(DrawCommand::BindFramebuffer(framebuffer));
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn bind_shader(&mut self, shader: ShaderId) {
        self.commands.push(DrawCommand::BindShader(shader));
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.commands.push(DrawCommand::SetUniform {
            name: name.to_owned(),
            value,
        });
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureId) {
        self.commands.push(DrawCommand::BindTexture { unit, texture });
    }

    fn draw_model(&mut self, model: ModelId) {
        self.commands.push(DrawCommand::DrawModel(model));
    }

    fn draw_grid(&mut self, grid: MeshId) {
        self.commands.push(DrawCommand::DrawGrid(grid));
    }

    fn draw_indexed(&mut self, mesh: MeshId, index_count: u32) {
        self.commands.push(DrawCommand::DrawIndexed { mesh, index_count });
    }

    fn draw_skybox(&mut self, view: Mat4, projection: Mat4) {
        self.commands.push(DrawCommand::DrawSkybox { view, projection });
    }

    fn submit(&mut self) {
        self.commands.push(DrawCommand::Submit);
    }
}

impl RenderTargetAllocator for RecordingSurface {
    fn create_target(&mut self, desc: &TargetDescriptor) -> Result<RenderTarget, RenderError> {
        desc.validate()?;
        let id = TargetId(self.next_handle());
        let color = TextureId(self.next_handle());
        let depth = match desc.depth {
            DepthAttachment::DepthStencilRenderbuffer => None,
            DepthAttachment::SampledDepthWithStencil => Some(TextureId(self.next_handle())),
        };
        let target = RenderTarget {
            id,
            color,
            depth,
            width: desc.width,
            height: desc.height,
        };
        tracing::debug!(label = desc.label, ?id, "recorded render target allocation");
        self.targets.insert(id, target);
        Ok(target)
    }

    fn release_target(&mut self, id: TargetId) -> Result<(), RenderError> {
        self.targets
            .remove(&id)
            .map(|_| ())
            .ok_or(RenderError::UnknownTarget(id))
    }
}

impl fmt::Display for RecordingSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Frame ({} commands, {} draws) ===",
            self.commands.len(),
            self.draw_count()
        )?;
        for command in &self.commands {
            match command {
                DrawCommand::SetUniform { name, value } => match value {
                    UniformValue::Float(v) => writeln!(f, "  uniform {name} = {v:.3}")?,
                    UniformValue::Int(v) => writeln!(f, "  uniform {name} = {v}")?,
                    UniformValue::Vec2(v) => {
                        writeln!(f, "  uniform {name} = ({:.2}, {:.2})", v.x, v.y)?
                    }
                    UniformValue::Vec3(v) => {
                        writeln!(f, "  uniform {name} = ({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)?
                    }
                    UniformValue::Mat4(_) => writeln!(f, "  uniform {name} = mat4")?,
                },
                DrawCommand::DrawSkybox { .. } => writeln!(f, "  draw skybox")?,
                other => writeln!(f, "  {other:?}")?,
            }
        }
        Ok(())
    }
}
