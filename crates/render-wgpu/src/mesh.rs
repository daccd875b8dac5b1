use std::sync::mpsc;

use glam::Vec3;
use wavescape_render::{MeshBuffer, MeshId};
use wgpu::util::DeviceExt;

use crate::context::{GpuContext, GpuError};

/// Bytes needed to hold `vertex_count` tightly packed positions.
pub fn vertex_buffer_size(vertex_count: usize) -> u64 {
    (vertex_count * std::mem::size_of::<Vec3>()) as u64
}

/// Vertex/index buffer pair for a lattice mesh.
///
/// The vertex buffer is rewritten in full on every upload; the index buffer
/// is created once.
pub struct WgpuMeshBuffer {
    id: MeshId,
    ctx: GpuContext,
    vertex_buffer: wgpu::Buffer,
    vertex_count: usize,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl WgpuMeshBuffer {
    /// Allocate a vertex buffer for `vertex_capacity` positions.
    pub fn new(ctx: &GpuContext, id: MeshId, vertex_capacity: usize) -> Self {
        Self {
            id,
            vertex_buffer: create_vertex_buffer(ctx, vertex_capacity),
            ctx: ctx.clone(),
            vertex_count: 0,
            index_buffer: None,
            index_count: 0,
        }
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> Option<&wgpu::Buffer> {
        self.index_buffer.as_ref()
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Copy the vertex buffer back to the CPU.
    ///
    /// Blocks until the GPU has finished every submitted upload.
    pub fn read_vertices(&self) -> Result<Vec<Vec3>, GpuError> {
        let size = vertex_buffer_size(self.vertex_count);
        if size == 0 {
            return Ok(Vec::new());
        }
        let device = &self.ctx.device;
        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("water_readback"),
            size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("water_readback_encoder"),
        });
        encoder.copy_buffer_to_buffer(&self.vertex_buffer, 0, &staging, 0, size);
        self.ctx.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        device.poll(wgpu::Maintain::Wait);
        receiver.recv().map_err(|_| GpuError::MapCallbackDropped)??;

        let vertices = {
            let data = slice.get_mapped_range();
            bytemuck::cast_slice::<u8, Vec3>(&data).to_vec()
        };
        staging.unmap();
        Ok(vertices)
    }
}

impl MeshBuffer for WgpuMeshBuffer {
    fn mesh_id(&self) -> MeshId {
        self.id
    }

    fn upload_indices(&mut self, indices: &[u16]) {
        self.index_buffer = Some(self.ctx.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("water_index_buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));
        self.index_count = indices.len() as u32;
    }

    fn replace_vertices(&mut self, vertices: &[Vec3]) {
        if vertex_buffer_size(vertices.len()) > self.vertex_buffer.size() {
            tracing::debug!(
                vertices = vertices.len(),
                "growing water vertex buffer"
            );
            self.vertex_buffer = create_vertex_buffer(&self.ctx, vertices.len());
        }
        self.ctx
            .queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        self.vertex_count = vertices.len();
    }
}

fn create_vertex_buffer(ctx: &GpuContext, vertex_capacity: usize) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("water_vertex_buffer"),
        size: vertex_buffer_size(vertex_capacity.max(1)),
        usage: wgpu::BufferUsages::VERTEX
            | wgpu::BufferUsages::COPY_DST
            | wgpu::BufferUsages::COPY_SRC,
        mapped_at_creation: false,
    })
}
