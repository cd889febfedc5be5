//! Tube extrusion along a curve
//!
//! Sweeps a circular cross-section along any [`Curve`], orienting each
//! ring with parallel-transport frames. Rings are duplicated at the seam
//! so the UV wrap stays continuous, and a closed sweep re-emits ring 0 as
//! the final ring (same positions, u = 1).

use glam::Vec3;
use tracing::warn;

use crate::curve::{ArcLengthTable, Curve};
use crate::frames::FrameSet;
use crate::mesh::MeshBuilderUV;

/// Generate a tube mesh swept along a curve
///
/// Vertices are laid out ring-major: `(tubular_segments + 1)` rings of
/// `(radial_segments + 1)` vertices each, with the last vertex of every
/// ring duplicating the first for the UV seam. Ring normals point from
/// the curve sample to the vertex, and texture coordinates span [0, 1]
/// along the tube (u) and around it (v).
///
/// # Arguments
/// * `table` - Arc-length table over the sweep path
/// * `tubular_segments` - Segments along the path (minimum 1)
/// * `radius` - Cross-section radius (minimum 0.001)
/// * `radial_segments` - Segments around the cross-section (minimum 3)
/// * `closed` - Re-use ring 0 as the final ring instead of sampling t = 1
///
/// # Returns
/// Mesh builder with `(tubular + 1) * (radial + 1)` vertices and
/// `tubular * radial * 2` triangles
pub fn generate_tube_uv<M, C>(
    table: &ArcLengthTable<'_, C>,
    tubular_segments: usize,
    radius: f32,
    radial_segments: usize,
    closed: bool,
) -> M
where
    M: MeshBuilderUV + Default,
    C: Curve + ?Sized,
{
    let tubular_segments = if tubular_segments < 1 {
        warn!("tube tubular_segments must be >= 1, clamping to 1");
        1
    } else {
        tubular_segments
    };
    let radial_segments = if radial_segments < 3 {
        warn!("tube radial_segments {radial_segments} too low, clamping to 3");
        3
    } else {
        radial_segments
    };
    let radius = if radius < 0.001 {
        warn!("tube radius {radius} too small, clamping to 0.001");
        0.001
    } else {
        radius
    };

    let frames = FrameSet::compute(table, tubular_segments, closed);
    let mut mesh = M::default();

    for i in 0..=tubular_segments {
        // A closed sweep ends on a copy of ring 0 so positions meet
        // exactly; the copy still gets u = 1.
        let ring = if i == tubular_segments && closed { 0 } else { i };
        let center = table.point_at(ring as f32 / tubular_segments as f32);
        let normal_axis = frames.normals[ring];
        let binormal_axis = frames.binormals[ring];
        let u = i as f32 / tubular_segments as f32;

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * std::f32::consts::TAU;
            let (sin_v, cos_v) = (v.sin(), -v.cos());

            let normal = (normal_axis * cos_v + binormal_axis * sin_v).normalize_or_zero();
            let position = center + normal * radius;
            let uv = (u, j as f32 / radial_segments as f32);

            mesh.add_vertex_uv(position, uv, normal);
        }
    }

    let ring_stride = (radial_segments + 1) as u32;
    for seg in 1..=tubular_segments as u32 {
        for ring in 1..=radial_segments as u32 {
            let a = ring_stride * (seg - 1) + (ring - 1);
            let b = ring_stride * seg + (ring - 1);
            let c = ring_stride * seg + ring;
            let d = ring_stride * (seg - 1) + ring;

            mesh.add_triangle(a, b, d);
            mesh.add_triangle(b, c, d);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::TorusKnot;
    use crate::mesh::Mesh;

    fn knot_tube(tubular: usize, radius: f32, radial: usize, closed: bool) -> Mesh {
        let knot = TorusKnot::new(1.0);
        let table = ArcLengthTable::new(&knot);
        generate_tube_uv(&table, tubular, radius, radial, closed)
    }

    #[test]
    fn vertex_and_triangle_counts_match_segment_grid() {
        let mesh = knot_tube(200, 0.3, 20, true);
        assert_eq!(mesh.vertex_count(), 201 * 21);
        assert_eq!(mesh.triangle_count(), 200 * 20 * 2);
        assert_eq!(mesh.uvs.len(), mesh.vertex_count());
    }

    #[test]
    fn dense_tube_exceeds_u16_vertex_range() {
        let mesh = knot_tube(4000, 0.2, 10, false);
        assert_eq!(mesh.vertex_count(), 4001 * 11);
        assert!(mesh.vertex_count() > u16::MAX as usize);
        let max_index = mesh.indices.iter().copied().max().unwrap();
        assert_eq!(max_index as usize, mesh.vertex_count() - 1);
    }

    #[test]
    fn closed_tube_repeats_ring_zero_at_the_seam() {
        let radial = 20;
        let mesh = knot_tube(200, 0.3, radial, true);
        let last_ring_start = 200 * (radial + 1);
        for j in 0..=radial {
            assert_eq!(
                mesh.positions[j],
                mesh.positions[last_ring_start + j],
                "seam vertex {j} diverges"
            );
        }
        // Same positions, different texture coordinates.
        assert_eq!(mesh.uvs[0][0], 0.0);
        assert_eq!(mesh.uvs[last_ring_start][0], 1.0);
    }

    #[test]
    fn ring_normals_are_unit_and_radial() {
        let mesh = knot_tube(32, 0.5, 8, false);
        let knot = TorusKnot::new(1.0);
        let table = ArcLengthTable::new(&knot);
        for (i, normal) in mesh.normals.iter().enumerate() {
            let n = Vec3::from_array(*normal);
            assert!((n.length() - 1.0).abs() < 1e-3, "normal {i}");

            let ring = i / 9;
            let center = table.point_at(ring as f32 / 32.0);
            let p = Vec3::from_array(mesh.positions[i]);
            assert!(
                ((p - center).length() - 0.5).abs() < 1e-3,
                "vertex {i} off the ring"
            );
        }
    }

    #[test]
    fn first_quad_indices_follow_ring_stride() {
        let mesh = knot_tube(4, 0.3, 6, false);
        let stride = 7;
        assert_eq!(
            &mesh.indices[0..6],
            &[0, stride, 1, stride, stride + 1, 1]
        );
    }

    #[test]
    fn uvs_cover_unit_square() {
        let mesh = knot_tube(10, 0.3, 5, false);
        let (mut min_u, mut max_u) = (f32::MAX, f32::MIN);
        let (mut min_v, mut max_v) = (f32::MAX, f32::MIN);
        for uv in &mesh.uvs {
            min_u = min_u.min(uv[0]);
            max_u = max_u.max(uv[0]);
            min_v = min_v.min(uv[1]);
            max_v = max_v.max(uv[1]);
        }
        assert_eq!((min_u, max_u), (0.0, 1.0));
        assert_eq!((min_v, max_v), (0.0, 1.0));
    }
}
