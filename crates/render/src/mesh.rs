use glam::Vec3;

use crate::surface::MeshId;

/// Update-frequency hint for a GPU buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Written once, drawn many times.
    Static,
    /// Fully rewritten on most frames.
    Stream,
}

/// GPU-resident position buffer with a fixed triangle index list.
///
/// `replace_vertices` is a full replace of the buffer contents; there is no
/// partial update.
pub trait MeshBuffer {
    fn mesh_id(&self) -> MeshId;
    fn upload_indices(&mut self, indices: &[u16]);
    fn replace_vertices(&mut self, vertices: &[Vec3]);
}

/// In-memory mesh buffer that keeps a verbatim copy of every upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryMeshBuffer {
    id: MeshId,
    vertices: Vec<Vec3>,
    indices: Vec<u16>,
    vertex_usage: BufferUsage,
    index_usage: BufferUsage,
    vertex_uploads: u64,
}

impl MemoryMeshBuffer {
    pub fn new(id: MeshId) -> Self {
        Self {
            id,
            vertices: Vec::new(),
            indices: Vec::new(),
            vertex_usage: BufferUsage::Stream,
            index_usage: BufferUsage::Static,
            vertex_uploads: 0,
        }
    }

    /// Read back the last uploaded vertices.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Size of the vertex store in bytes.
    pub fn vertex_bytes(&self) -> usize {
        std::mem::size_of_val(self.vertices.as_slice())
    }

    pub fn vertex_usage(&self) -> BufferUsage {
        self.vertex_usage
    }

    pub fn index_usage(&self) -> BufferUsage {
        self.index_usage
    }

    /// Number of `replace_vertices` calls so far.
    pub fn vertex_uploads(&self) -> u64 {
        self.vertex_uploads
    }
}

impl MeshBuffer for MemoryMeshBuffer {
    fn mesh_id(&self) -> MeshId {
        self.id
    }

    fn upload_indices(&mut self, indices: &[u16]) {
        self.indices = indices.to_vec();
    }

    fn replace_vertices(&mut self, vertices: &[Vec3]) {
        self.vertices.clear();
        self.vertices.extend_from_slice(vertices);
        self.vertex_uploads += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_is_full_and_counted() {
        let mut buffer = MemoryMeshBuffer::new(MeshId(1));
        buffer.replace_vertices(&[Vec3::ONE; 4]);
        buffer.replace_vertices(&[Vec3::ZERO; 2]);
        assert_eq!(buffer.vertices(), &[Vec3::ZERO; 2]);
        assert_eq!(buffer.vertex_uploads(), 2);
        assert_eq!(buffer.vertex_bytes(), 24);
        assert_eq!(buffer.vertex_usage(), BufferUsage::Stream);
    }
}
