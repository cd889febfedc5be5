//! Mesh construction types
//!
//! Shared types for tube-mesh generation.

use glam::Vec3;

/// Trait for mesh construction - enables generic geometry generation
///
/// Generation functions write through this trait so callers can target
/// either the full [`Mesh`] buffers or lighter-weight sinks (e.g. counters
/// in tests).
pub trait MeshBuilder: Default {
    /// Add a vertex with position and normal, returning its index
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32;

    /// Add a triangle using three vertex indices
    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32);
}

/// Trait extension for UV-mapped meshes
pub trait MeshBuilderUV: MeshBuilder {
    /// Add a vertex with position, UV coordinates, and normal, returning its index
    fn add_vertex_uv(&mut self, position: Vec3, uv: (f32, f32), normal: Vec3) -> u32;
}

/// Generated mesh data (f32 format, u32 indices)
///
/// Indices are u32 because a dense tube sweep can exceed the u16 vertex
/// limit (a 4000-segment tube with 10 radial segments carries 44 011
/// vertices).
#[derive(Clone)]
pub struct Mesh {
    /// Vertex positions as [x, y, z]
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals as [x, y, z]
    pub normals: Vec<[f32; 3]>,
    /// UV coordinates as [u, v] (empty if no UVs)
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleave vertex attributes as [pos.xyz, normal.xyz, uv.xy] per vertex
    ///
    /// Vertices without UVs get (0, 0). Output is ready for a single
    /// 32-byte-stride vertex buffer upload.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.positions.len() * 8);
        for (i, pos) in self.positions.iter().enumerate() {
            out.extend_from_slice(pos);
            out.extend_from_slice(&self.normals[i]);
            match self.uvs.get(i) {
                Some(uv) => out.extend_from_slice(uv),
                None => out.extend_from_slice(&[0.0, 0.0]),
            }
        }
        out
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshBuilder for Mesh {
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push([position.x, position.y, position.z]);
        self.normals.push([normal.x, normal.y, normal.z]);
        index
    }

    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }
}

impl MeshBuilderUV for Mesh {
    fn add_vertex_uv(&mut self, position: Vec3, uv: (f32, f32), normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push([position.x, position.y, position.z]);
        self.normals.push([normal.x, normal.y, normal.z]);
        self.uvs.push([uv.0, uv.1]);
        index
    }
}
