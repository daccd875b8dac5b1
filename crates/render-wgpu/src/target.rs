use std::collections::BTreeMap;

use wavescape_render::{
    DepthAttachment, RenderError, RenderTarget, RenderTargetAllocator, TargetDescriptor, TargetId,
    TextureId,
};

use crate::context::GpuContext;

/// Colour attachment format of every off-screen target.
pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Depth format for an attachment kind. Both kinds carry a stencil aspect.
pub fn depth_format(_depth: DepthAttachment) -> wgpu::TextureFormat {
    wgpu::TextureFormat::Depth24PlusStencil8
}

/// Usage flags for a depth attachment kind.
pub fn depth_usage(depth: DepthAttachment) -> wgpu::TextureUsages {
    match depth {
        DepthAttachment::DepthStencilRenderbuffer => wgpu::TextureUsages::RENDER_ATTACHMENT,
        DepthAttachment::SampledDepthWithStencil => {
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING
        }
    }
}

struct AllocatedTarget {
    _color: wgpu::Texture,
    _depth: wgpu::Texture,
    color_id: TextureId,
    depth_id: Option<TextureId>,
    depth_view: wgpu::TextureView,
}

/// Creates off-screen targets as wgpu textures and hands out their views.
pub struct WgpuTargetAllocator {
    ctx: GpuContext,
    targets: BTreeMap<TargetId, AllocatedTarget>,
    views: BTreeMap<TextureId, wgpu::TextureView>,
    next_id: u32,
}

impl WgpuTargetAllocator {
    pub fn new(ctx: &GpuContext) -> Self {
        Self {
            ctx: ctx.clone(),
            targets: BTreeMap::new(),
            views: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Sampleable view of a colour attachment or a sampled depth attachment.
    pub fn view(&self, texture: TextureId) -> Option<&wgpu::TextureView> {
        self.views.get(&texture)
    }

    /// Depth/stencil attachment view of a target, for render pass setup.
    pub fn depth_stencil_view(&self, target: TargetId) -> Option<&wgpu::TextureView> {
        self.targets.get(&target).map(|t| &t.depth_view)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn next_handle(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn create_texture(
        &self,
        label: &str,
        desc: &TargetDescriptor,
        format: wgpu::TextureFormat,
        usage: wgpu::TextureUsages,
    ) -> wgpu::Texture {
        self.ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: desc.width,
                height: desc.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
            view_formats: &[],
        })
    }
}

impl RenderTargetAllocator for WgpuTargetAllocator {
    fn create_target(&mut self, desc: &TargetDescriptor) -> Result<RenderTarget, RenderError> {
        desc.validate()?;
        let limit = self.ctx.device.limits().max_texture_dimension_2d;
        if desc.width > limit || desc.height > limit {
            return Err(RenderError::Backend(format!(
                "{} target {}x{} exceeds the device limit of {limit}",
                desc.label, desc.width, desc.height
            )));
        }

        let color = self.create_texture(
            &format!("{}_color", desc.label),
            desc,
            COLOR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let depth = self.create_texture(
            &format!("{}_depth", desc.label),
            desc,
            depth_format(desc.depth),
            depth_usage(desc.depth),
        );

        let id = TargetId(self.next_handle());
        let color_id = TextureId(self.next_handle());
        self.views
            .insert(color_id, color.create_view(&Default::default()));

        let depth_id = match desc.depth {
            DepthAttachment::DepthStencilRenderbuffer => None,
            DepthAttachment::SampledDepthWithStencil => {
                let depth_id = TextureId(self.next_handle());
                let sampled = depth.create_view(&wgpu::TextureViewDescriptor {
                    aspect: wgpu::TextureAspect::DepthOnly,
                    ..Default::default()
                });
                self.views.insert(depth_id, sampled);
                Some(depth_id)
            }
        };

        let target = RenderTarget {
            id,
            color: color_id,
            depth: depth_id,
            width: desc.width,
            height: desc.height,
        };
        tracing::debug!(
            label = desc.label,
            ?id,
            width = desc.width,
            height = desc.height,
            "render target created"
        );
        self.targets.insert(
            id,
            AllocatedTarget {
                depth_view: depth.create_view(&Default::default()),
                _color: color,
                _depth: depth,
                color_id,
                depth_id,
            },
        );
        Ok(target)
    }

    fn release_target(&mut self, id: TargetId) -> Result<(), RenderError> {
        let target = self
            .targets
            .remove(&id)
            .ok_or(RenderError::UnknownTarget(id))?;
        self.views.remove(&target.color_id);
        if let Some(depth_id) = target.depth_id {
            self.views.remove(&depth_id);
        }
        Ok(())
    }
}
