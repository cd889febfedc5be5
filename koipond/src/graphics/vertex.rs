//! Vertex format for tube and beacon meshes
//!
//! A single interleaved layout covers every mesh in the scene:
//! position, normal and UV, all f32. Geometry is baked in world space so
//! no per-mesh transform rides alongside.

/// Bytes per vertex: position (12) + normal (12) + uv (8)
pub const VERTEX_STRIDE: u32 = 32;

/// Floats per vertex, matching [`VERTEX_STRIDE`]
pub const FLOATS_PER_VERTEX: usize = 8;

const ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
    // Location 0: position
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 0,
    },
    // Location 1: normal
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 12,
        shader_location: 1,
    },
    // Location 2: uv
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x2,
        offset: 24,
        shader_location: 2,
    },
];

/// Vertex buffer layout shared by the scene and occlusion pipelines
pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: VERTEX_STRIDE as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_covers_all_attributes() {
        assert_eq!(VERTEX_STRIDE as usize, FLOATS_PER_VERTEX * 4);
        let last = ATTRIBUTES.last().unwrap();
        assert_eq!(last.offset + 8, VERTEX_STRIDE as u64);
    }

    #[test]
    fn locations_are_sequential() {
        let layout = vertex_buffer_layout();
        assert_eq!(layout.array_stride, 32);
        for (i, attr) in layout.attributes.iter().enumerate() {
            assert_eq!(attr.shader_location, i as u32);
        }
    }
}
