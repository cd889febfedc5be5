//! Polyline paths
//!
//! A [`PolyPath`] strings an ordered point sequence into a continuous
//! curve of straight segments: N points yield N - 1 segments, with
//! segment i connecting point i to point i + 1. The path is itself a
//! [`Curve`] parameterized by arc length, so a parameter step of equal
//! size covers an equal distance anywhere along it.

use glam::Vec3;

use crate::curve::Curve;

/// A curve built from straight segments between consecutive points
#[derive(Clone, Debug)]
pub struct PolyPath {
    points: Vec<Vec3>,
    /// cumulative[i] is the path length up to point i; cumulative[0] = 0
    cumulative: Vec<f32>,
}

impl PolyPath {
    /// Build a path from an ordered point sequence
    ///
    /// Callers guarantee at least two points. Coincident consecutive
    /// points are not rejected; they contribute zero-length segments.
    pub fn from_points(points: Vec<Vec3>) -> Self {
        debug_assert!(points.len() >= 2, "a path needs at least two points");

        let mut cumulative = Vec::with_capacity(points.len());
        let mut sum = 0.0;
        cumulative.push(0.0);
        for w in points.windows(2) {
            sum += w[0].distance(w[1]);
            cumulative.push(sum);
        }
        Self { points, cumulative }
    }

    /// Number of straight segments (one less than the point count)
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Endpoints of segment i
    pub fn segment(&self, i: usize) -> (Vec3, Vec3) {
        (self.points[i], self.points[i + 1])
    }

    /// The ordered points the path was built from
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Exact total length (sum of segment lengths)
    pub fn total_length(&self) -> f32 {
        self.cumulative[self.cumulative.len() - 1]
    }
}

impl Curve for PolyPath {
    /// Evaluate by walking the cumulative-length table, so t is an exact
    /// arc-length fraction rather than a per-segment index
    fn point(&self, t: f32) -> Vec3 {
        let target = t.clamp(0.0, 1.0) * self.total_length();
        let last = self.points.len() - 1;

        let i = self
            .cumulative
            .partition_point(|&len| len <= target)
            .saturating_sub(1)
            .min(last.saturating_sub(1));

        let segment = self.cumulative[i + 1] - self.cumulative[i];
        let local = if segment > 0.0 {
            (target - self.cumulative[i]) / segment
        } else {
            0.0
        };
        self.points[i].lerp(self.points[i + 1], local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{ArcLengthTable, TorusKnot};

    #[test]
    fn n_points_yield_n_minus_one_segments() {
        let points: Vec<Vec3> = (0..200).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let path = PolyPath::from_points(points);
        assert_eq!(path.segment_count(), 199);
    }

    #[test]
    fn segments_connect_consecutive_points_in_order() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(3.0, 2.0, 1.0),
            Vec3::new(3.0, 5.0, 1.0),
        ];
        let path = PolyPath::from_points(points.clone());
        assert_eq!(path.segment_count(), 3);
        for i in 0..path.segment_count() {
            let (a, b) = path.segment(i);
            assert_eq!(a, points[i]);
            assert_eq!(b, points[i + 1]);
        }
    }

    #[test]
    fn parameter_is_arc_length_fraction() {
        // Uneven segment lengths: 1 then 3, total 4.
        let path = PolyPath::from_points(vec![
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        ]);
        assert_eq!(path.total_length(), 4.0);
        assert_eq!(path.point(0.0), Vec3::ZERO);
        assert_eq!(path.point(0.25), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(path.point(0.5), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(path.point(1.0), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn coincident_points_do_not_break_evaluation() {
        let path = PolyPath::from_points(vec![
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
        ]);
        assert_eq!(path.point(0.5), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn arc_length_table_over_path_is_consistent() {
        // A path is already arc-length parameterized, so resampling it
        // through a table must land on the same points.
        let knot = TorusKnot::new(1.0);
        let samples = ArcLengthTable::new(&knot).spaced_points(50);
        let path = PolyPath::from_points(samples);
        let table = ArcLengthTable::new(&path);
        for i in 0..=20 {
            let u = i as f32 / 20.0;
            assert!(
                table.point_at(u).distance(path.point(u)) < 1e-3,
                "mismatch at u = {u}"
            );
        }
    }
}
