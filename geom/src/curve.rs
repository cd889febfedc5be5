//! Parametric curves and arc-length sampling
//!
//! Curves map a scalar t in [0, 1] to a 3D point. Even spacing along a
//! curve goes through [`ArcLengthTable`], which builds a cumulative
//! chord-length table once and maps an arc-length fraction u back to the
//! raw parameter t.

use glam::Vec3;

/// Finite-difference step for tangent estimation
const TANGENT_DELTA: f32 = 0.0001;

/// Number of table divisions used for arc-length parameterization
pub const ARC_LENGTH_DIVISIONS: usize = 200;

/// A parametric 3D curve over t in [0, 1]
pub trait Curve {
    /// Evaluate the curve at parameter t
    fn point(&self, t: f32) -> Vec3;

    /// Whether the curve returns to its start at t = 1
    fn is_closed(&self) -> bool {
        false
    }

    /// Unit tangent at parameter t, estimated by central differences
    ///
    /// The sample window is clamped at the curve ends, degrading to a
    /// one-sided difference there.
    fn tangent(&self, t: f32) -> Vec3 {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        (self.point(t2) - self.point(t1)).normalize_or_zero()
    }
}

/// The (3, 4) torus knot
///
/// Winds three times around the torus axis while looping four times
/// through the hole. With t scaled to [0, 2π]:
///
/// ```text
/// x = (2 + cos(4t)) * cos(3t)
/// y = (2 + cos(4t)) * sin(3t)
/// z = sin(4t)
/// ```
///
/// all multiplied by `scale`.
#[derive(Clone, Copy, Debug)]
pub struct TorusKnot {
    /// Uniform scale applied to the unit-form knot
    pub scale: f32,
}

/// Times around the torus axis
const KNOT_P: f32 = 3.0;
/// Times through the torus hole
const KNOT_Q: f32 = 4.0;

impl TorusKnot {
    /// Create a torus knot with the given uniform scale
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl Curve for TorusKnot {
    fn point(&self, t: f32) -> Vec3 {
        let t = t * std::f32::consts::TAU;
        let x = (2.0 + (KNOT_Q * t).cos()) * (KNOT_P * t).cos();
        let y = (2.0 + (KNOT_Q * t).cos()) * (KNOT_P * t).sin();
        let z = (KNOT_Q * t).sin();
        Vec3::new(x, y, z) * self.scale
    }

    fn is_closed(&self) -> bool {
        true
    }
}

/// Cumulative chord-length table over a curve
///
/// Maps an arc-length fraction u in [0, 1] to the curve parameter t by
/// linear interpolation between table entries, so that samples taken at
/// even u are evenly spaced along the curve rather than in t.
pub struct ArcLengthTable<'c, C: Curve + ?Sized> {
    curve: &'c C,
    lengths: Vec<f32>,
}

impl<'c, C: Curve + ?Sized> ArcLengthTable<'c, C> {
    /// Build a table with the default division count
    pub fn new(curve: &'c C) -> Self {
        Self::with_divisions(curve, ARC_LENGTH_DIVISIONS)
    }

    /// Build a table with `divisions` chord segments (`divisions` >= 1)
    pub fn with_divisions(curve: &'c C, divisions: usize) -> Self {
        let divisions = divisions.max(1);
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut sum = 0.0;
        let mut last = curve.point(0.0);
        lengths.push(0.0);
        for i in 1..=divisions {
            let current = curve.point(i as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        Self { curve, lengths }
    }

    /// Total approximated curve length
    pub fn total_length(&self) -> f32 {
        // Table always holds at least [0.0, ...]; the constructor pushes
        // one entry per division plus the leading zero.
        self.lengths[self.lengths.len() - 1]
    }

    /// Map an arc-length fraction u in [0, 1] to the curve parameter t
    pub fn u_to_t(&self, u: f32) -> f32 {
        let target = u.clamp(0.0, 1.0) * self.total_length();
        let last = self.lengths.len() - 1;

        // Largest table index whose cumulative length does not exceed the
        // target, then interpolate within that chord.
        let i = self
            .lengths
            .partition_point(|&len| len <= target)
            .saturating_sub(1)
            .min(last - 1);

        let before = self.lengths[i];
        let after = self.lengths[i + 1];
        let segment = after - before;
        let fraction = if segment > 0.0 {
            (target - before) / segment
        } else {
            0.0
        };
        ((i as f32 + fraction) / last as f32).min(1.0)
    }

    /// Curve point at arc-length fraction u
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.curve.point(self.u_to_t(u))
    }

    /// Unit tangent at arc-length fraction u
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.curve.tangent(self.u_to_t(u))
    }

    /// Whether the underlying curve is closed
    pub fn is_closed(&self) -> bool {
        self.curve.is_closed()
    }

    /// Sample `count` points evenly spaced along the curve's length
    ///
    /// `count` is caller-guaranteed >= 1; a single-point request returns
    /// the curve start. For a closed curve the first and last points
    /// coincide.
    pub fn spaced_points(&self, count: usize) -> Vec<Vec3> {
        if count <= 1 {
            return vec![self.point_at(0.0)];
        }
        (0..count)
            .map(|i| self.point_at(i as f32 / (count - 1) as f32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torus_knot_closes_on_itself() {
        let knot = TorusKnot::new(1.0);
        let start = knot.point(0.0);
        let end = knot.point(1.0);
        assert_eq!(start, Vec3::new(3.0, 0.0, 0.0));
        assert!(start.distance(end) < 1e-4, "gap {}", start.distance(end));
    }

    #[test]
    fn tangent_is_unit_length() {
        let knot = TorusKnot::new(1.0);
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let len = knot.tangent(t).length();
            assert!((len - 1.0).abs() < 1e-3, "tangent length {len} at t={t}");
        }
    }

    #[test]
    fn u_to_t_is_monotonic_and_spans_range() {
        let knot = TorusKnot::new(1.0);
        let table = ArcLengthTable::new(&knot);
        assert_eq!(table.u_to_t(0.0), 0.0);
        assert!((table.u_to_t(1.0) - 1.0).abs() < 1e-6);
        let mut previous = 0.0;
        for i in 1..=100 {
            let t = table.u_to_t(i as f32 / 100.0);
            assert!(t >= previous, "t regressed at step {i}");
            previous = t;
        }
    }

    #[test]
    fn spaced_points_are_evenly_spaced() {
        let knot = TorusKnot::new(1.0);
        let table = ArcLengthTable::new(&knot);
        let points = table.spaced_points(200);
        assert_eq!(points.len(), 200);

        // Closed curve: the sampling returns to its start.
        assert!(points[0].distance(points[199]) < 1e-3);

        let spacings: Vec<f32> = points.windows(2).map(|w| w[0].distance(w[1])).collect();
        let mean = spacings.iter().sum::<f32>() / spacings.len() as f32;
        for (i, s) in spacings.iter().enumerate() {
            assert!(
                (s - mean).abs() < mean * 0.05,
                "spacing {s} at {i} deviates from mean {mean}"
            );
        }
    }

    #[test]
    fn single_point_request_returns_curve_start() {
        let knot = TorusKnot::new(2.0);
        let table = ArcLengthTable::new(&knot);
        let points = table.spaced_points(1);
        assert_eq!(points, vec![knot.point(0.0)]);
    }

    #[test]
    fn sampling_is_deterministic() {
        let knot = TorusKnot::new(1.0);
        let a = ArcLengthTable::new(&knot).spaced_points(200);
        let b = ArcLengthTable::new(&knot).spaced_points(200);
        assert_eq!(a, b);
    }
}
