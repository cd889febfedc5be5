//! Coil placement around a base curve
//!
//! Winds a helix of points around a curve: each sample sits at a fixed
//! radial distance from the curve, oriented by the local transport frame
//! and swept around the local tangent as the parameter advances.

use glam::{Mat4, Vec3, Vec4};
use tracing::warn;

use crate::curve::{ArcLengthTable, Curve};
use crate::frames::FrameSet;

/// Sweep angle at sample `index` of a coil
///
/// The angle grows linearly with the index and spans `turns` full
/// revolutions over `segment_count` samples, so the per-sample increment
/// is 2π × turns / segment_count.
pub fn turn_angle(index: usize, segment_count: usize, turns: f32) -> f32 {
    index as f32 / segment_count as f32 * (std::f32::consts::TAU * turns)
}

/// Generate the points of a coil wound around a base curve
///
/// Samples the curve at `base_samples × turns` evenly spaced positions.
/// Each point starts at `inner_radius + tube_radius` along the local
/// binormal (local X of the frame basis), is rotated about the local
/// tangent by [`turn_angle`], and is then translated to the curve sample.
/// Rotation about the tangent preserves the radial distance, so every
/// output point lies exactly `inner_radius + tube_radius` from its curve
/// sample.
///
/// Frames are transported without the closed-loop correction; where the
/// seam lands is decided by the turn count alone.
///
/// # Arguments
/// * `table` - Arc-length table over the base curve
/// * `inner_radius` - Radius of the tube the coil wraps around
/// * `tube_radius` - Radius of the coil's own tube
/// * `base_samples` - Sample density for a single turn (clamped to >= 1)
/// * `turns` - Number of full revolutions (clamped to >= 1.0)
///
/// # Returns
/// The coil polyline, one point per sample
pub fn coil_points<C: Curve + ?Sized>(
    table: &ArcLengthTable<'_, C>,
    inner_radius: f32,
    tube_radius: f32,
    base_samples: usize,
    turns: f32,
) -> Vec<Vec3> {
    let base_samples = if base_samples == 0 {
        warn!("coil base_samples must be >= 1, clamping to 1");
        1
    } else {
        base_samples
    };
    let turns = if turns < 1.0 {
        warn!("coil turns {turns} must be >= 1.0, clamping to 1.0");
        1.0
    } else {
        turns
    };

    let segment_count = (base_samples as f32 * turns).round() as usize;
    let origins = table.spaced_points(segment_count);
    let frames = FrameSet::compute(table, segment_count.saturating_sub(1), false);

    let radial = Vec3::new(inner_radius + tube_radius, 0.0, 0.0);

    (0..segment_count)
        .map(|i| {
            let basis = Mat4::from_cols(
                frames.binormals[i].extend(0.0),
                frames.normals[i].extend(0.0),
                frames.tangents[i].extend(0.0),
                Vec4::W,
            );
            let rotation = Mat4::from_axis_angle(frames.tangents[i], turn_angle(i, segment_count, turns));
            (rotation * basis).transform_point3(radial) + origins[i]
        })
        .collect()
}
