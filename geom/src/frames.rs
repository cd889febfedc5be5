//! Parallel-transport frames along a curve
//!
//! Produces a tangent/normal/binormal basis at evenly spaced samples. The
//! initial normal is seeded perpendicular to the first tangent, then
//! transported sample to sample by rotating about the axis between
//! consecutive tangents, which avoids the flips a pointwise Frenet normal
//! suffers at curvature sign changes. Closed curves get the accumulated
//! end-to-start twist distributed back over the whole loop.

use glam::{Quat, Vec3};

use crate::curve::{ArcLengthTable, Curve};

/// Orthonormal frames at `segments + 1` evenly spaced samples
#[derive(Clone, Debug)]
pub struct FrameSet {
    /// Unit tangents, one per sample
    pub tangents: Vec<Vec3>,
    /// Unit normals, one per sample
    pub normals: Vec<Vec3>,
    /// Unit binormals (tangent x normal), one per sample
    pub binormals: Vec<Vec3>,
}

impl FrameSet {
    /// Compute frames at samples u = i / segments for i in 0..=segments
    ///
    /// With `closed` set, the mismatch between the transported end normal
    /// and the start normal is spread evenly along the curve so the last
    /// frame lines back up with the first.
    pub fn compute<C: Curve + ?Sized>(
        table: &ArcLengthTable<'_, C>,
        segments: usize,
        closed: bool,
    ) -> Self {
        let count = segments + 1;
        let tangents: Vec<Vec3> = (0..count)
            .map(|i| table.tangent_at(i as f32 / segments.max(1) as f32))
            .collect();

        let mut normals = Vec::with_capacity(count);
        let mut binormals = Vec::with_capacity(count);

        normals.push(initial_normal(tangents[0]));
        binormals.push(tangents[0].cross(normals[0]));

        for i in 1..count {
            let mut normal = normals[i - 1];
            let axis = tangents[i - 1].cross(tangents[i]);
            if axis.length() > f32::EPSILON {
                let theta = tangents[i - 1].dot(tangents[i]).clamp(-1.0, 1.0).acos();
                normal = Quat::from_axis_angle(axis.normalize(), theta) * normal;
            }
            normals.push(normal);
            binormals.push(tangents[i].cross(normal));
        }

        if closed {
            let mut theta = normals[0]
                .dot(normals[segments])
                .clamp(-1.0, 1.0)
                .acos()
                / segments as f32;
            if normals[0].cross(normals[segments]).dot(tangents[0]) > 0.0 {
                theta = -theta;
            }
            for i in 1..count {
                normals[i] = Quat::from_axis_angle(tangents[i], theta * i as f32) * normals[i];
                binormals[i] = tangents[i].cross(normals[i]);
            }
        }

        Self {
            tangents,
            normals,
            binormals,
        }
    }

    /// Number of frames (samples), i.e. segments + 1
    pub fn len(&self) -> usize {
        self.tangents.len()
    }

    /// True when the set holds no frames
    pub fn is_empty(&self) -> bool {
        self.tangents.is_empty()
    }
}

/// Seed normal for the transport: axis-aligned, perpendicular-ish to the
/// first tangent along its smallest component
fn initial_normal(tangent: Vec3) -> Vec3 {
    let mut min = f32::MAX;
    let mut normal = Vec3::ZERO;
    let t = tangent.abs();
    if t.x <= min {
        min = t.x;
        normal = Vec3::X;
    }
    if t.y <= min {
        min = t.y;
        normal = Vec3::Y;
    }
    if t.z <= min {
        normal = Vec3::Z;
    }

    let axis = tangent.cross(normal).normalize_or_zero();
    tangent.cross(axis)
}
