//! CPU-side mesh representation used by loaders.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Normal used when a face vertex carries no (valid) `vn` reference.
pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];
/// Texture coordinate used when a face vertex carries no (valid) `vt` reference.
pub const DEFAULT_UV: [f32; 2] = [0.0, 0.0];

/// Vertex with position/normal/uv. Values are in object space.
///
/// Layout is fixed (`repr(C)`, 32 bytes) so the buffer can be uploaded verbatim.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// Vertex at `position` with the default normal and uv.
    pub fn from_position(position: [f32; 3]) -> Self {
        Self::new(position, DEFAULT_NORMAL, DEFAULT_UV)
    }
}

/// Indexed triangle mesh with tightly-packed vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer as raw bytes, ready for a GPU upload.
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes (`u32`, native endian).
    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Axis-aligned bounds of all vertex positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}
