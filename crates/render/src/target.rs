use crate::surface::TextureId;

/// Handle to an off-screen framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

/// Depth attachment flavour of a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthAttachment {
    /// Combined depth/stencil storage that can only be rendered to.
    DepthStencilRenderbuffer,
    /// Depth texture that later passes can sample, plus a separate stencil.
    SampledDepthWithStencil,
}

/// Allocation request for an off-screen colour + depth target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDescriptor {
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
    pub depth: DepthAttachment,
}

/// An allocated off-screen target.
///
/// Sized once at allocation; there is no resize path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTarget {
    pub id: TargetId,
    pub color: TextureId,
    /// Present only for [`DepthAttachment::SampledDepthWithStencil`].
    pub depth: Option<TextureId>,
    pub width: u32,
    pub height: u32,
}

/// Errors from render resource operations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render target `{label}` has zero size ({width}x{height})")]
    ZeroSizedTarget {
        label: &'static str,
        width: u32,
        height: u32,
    },
    #[error("render target {0:?} is not allocated")]
    UnknownTarget(TargetId),
    #[error("backend error: {0}")]
    Backend(String),
}

impl TargetDescriptor {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::ZeroSizedTarget {
                label: self.label,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Creates and releases off-screen render targets.
pub trait RenderTargetAllocator {
    fn create_target(&mut self, desc: &TargetDescriptor) -> Result<RenderTarget, RenderError>;
    fn release_target(&mut self, id: TargetId) -> Result<(), RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_descriptor_rejected() {
        let desc = TargetDescriptor {
            label: "reflection",
            width: 0,
            height: 720,
            depth: DepthAttachment::DepthStencilRenderbuffer,
        };
        let err = desc.validate().unwrap_err();
        assert!(err.to_string().contains("reflection"));
    }
}
