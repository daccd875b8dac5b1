use glam::{Mat4, Vec2, Vec3};

use crate::target::TargetId;

/// Handle to a compiled shader program owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderId(pub u32);

/// Handle to a texture (plain texture or a render target attachment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Handle to a loaded model drawn by the engine's model utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub u32);

/// Handle to a GPU vertex/index buffer pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

/// Value assigned to a named shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2(Vec2),
    Vec3(Vec3),
    Mat4(Mat4),
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<Vec2> for UniformValue {
    fn from(v: Vec2) -> Self {
        Self::Vec2(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        Self::Mat4(v)
    }
}

/// Framebuffer a draw is directed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framebuffer {
    /// The window's back buffer.
    Default,
    Offscreen(TargetId),
}

/// Draw-call surface provided by the engine.
///
/// Implementations execute (or record) commands in call order. `submit`
/// marks a pass boundary: every command issued before it is handed to the
/// GPU before any command issued after it.
pub trait DrawSurface {
    fn bind_framebuffer(&mut self, framebuffer: Framebuffer);
    fn clear(&mut self, color: [f32; 4]);
    fn bind_shader(&mut self, shader: ShaderId);
    fn set_uniform(&mut self, name: &str, value: UniformValue);
    fn bind_texture(&mut self, unit: u32, texture: TextureId);
    /// Draw a loaded model with the bound shader.
    fn draw_model(&mut self, model: ModelId);
    /// Draw the engine's shared tessellated grid with the bound shader.
    fn draw_grid(&mut self, grid: MeshId);
    /// Indexed triangle-list draw of a mesh buffer.
    fn draw_indexed(&mut self, mesh: MeshId, index_count: u32);
    /// Draw the skybox with its own shader.
    fn draw_skybox(&mut self, view: Mat4, projection: Mat4);
    fn submit(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_value_conversions() {
        assert_eq!(UniformValue::from(1.5_f32), UniformValue::Float(1.5));
        assert_eq!(UniformValue::from(3_i32), UniformValue::Int(3));
        assert_eq!(
            UniformValue::from(Vec3::ONE),
            UniformValue::Vec3(Vec3::new(1.0, 1.0, 1.0))
        );
        assert!(matches!(
            UniformValue::from(Mat4::IDENTITY),
            UniformValue::Mat4(_)
        ));
    }
}
