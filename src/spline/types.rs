use bevy::math::DVec3;
use bevy::prelude::*;
use serde::Deserialize;

/// Minimum number of control points for a closed Catmull-Rom curve.
pub const MIN_CONTROL_POINTS: usize = 3;

/// Knot intervals shorter than this are treated as degenerate.
const MIN_KNOT_INTERVAL: f64 = 1e-4;

/// Knot parameterization of a Catmull-Rom spline.
///
/// Controls how the spacing between control points shapes the curve.
/// Non-uniform variants avoid cusps and self-intersections when the
/// control points are unevenly spaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Deserialize)]
#[reflect(Default)]
pub enum Parameterization {
    /// Equal knot intervals regardless of point spacing.
    Uniform,
    /// Knot interval is the square root of the chord length.
    Centripetal,
    /// Knot interval is the chord length.
    #[default]
    Chordal,
}

impl Parameterization {
    /// Get the display name for this parameterization.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uniform => "Uniform",
            Self::Centripetal => "Centripetal",
            Self::Chordal => "Chordal",
        }
    }

    /// Exponent applied to the squared chord length to get a knot interval.
    fn squared_distance_exponent(&self) -> f64 {
        match self {
            Self::Uniform => 0.0,
            Self::Centripetal => 0.25,
            Self::Chordal => 0.5,
        }
    }

    /// Evaluate a closed spline through `points` at `t` (wrapped into 0.0..1.0).
    ///
    /// Each control point owns one segment, so `t = i / n` lands exactly on
    /// `points[i]`. Returns `None` when there are fewer than
    /// [`MIN_CONTROL_POINTS`] points.
    pub fn evaluate_closed(&self, points: &[DVec3], t: f64) -> Option<DVec3> {
        let n = points.len();
        if n < MIN_CONTROL_POINTS {
            return None;
        }

        let t_scaled = t.rem_euclid(1.0) * n as f64;
        let segment = (t_scaled.floor() as usize).min(n - 1);
        let local_t = t_scaled - segment as f64;

        let p0 = points[(segment + n - 1) % n];
        let p1 = points[segment];
        let p2 = points[(segment + 1) % n];
        let p3 = points[(segment + 2) % n];

        Some(self.catmull_rom(p0, p1, p2, p3, local_t))
    }

    fn catmull_rom(&self, p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3, t: f64) -> DVec3 {
        let exponent = self.squared_distance_exponent();

        let mut dt0 = p0.distance_squared(p1).powf(exponent);
        let mut dt1 = p1.distance_squared(p2).powf(exponent);
        let mut dt2 = p2.distance_squared(p3).powf(exponent);

        // Coincident neighbours would divide by zero below.
        if dt1 < MIN_KNOT_INTERVAL {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_INTERVAL {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_INTERVAL {
            dt2 = dt1;
        }

        // Tangents at p1 and p2, rescaled to the [0, 1] parameter of the middle segment.
        let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        cubic_hermite(p1, p2, m1, m2, t)
    }
}

fn cubic_hermite(p1: DVec3, p2: DVec3, m1: DVec3, m2: DVec3, t: f64) -> DVec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    let c2 = -3.0 * p1 + 3.0 * p2 - 2.0 * m1 - m2;
    let c3 = 2.0 * p1 - 2.0 * p2 + m1 + m2;

    p1 + m1 * t + c2 * t2 + c3 * t3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<DVec3> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn test_passes_through_control_points() {
        let points = square();
        for parameterization in [
            Parameterization::Uniform,
            Parameterization::Centripetal,
            Parameterization::Chordal,
        ] {
            for (i, expected) in points.iter().enumerate() {
                let t = i as f64 / points.len() as f64;
                let p = parameterization.evaluate_closed(&points, t).unwrap();
                assert!((p - *expected).length() < 1e-9, "{:?} at {}", parameterization, i);
            }
        }
    }

    #[test]
    fn test_wraps_around() {
        let points = square();
        let start = Parameterization::Chordal.evaluate_closed(&points, 0.0).unwrap();
        let end = Parameterization::Chordal.evaluate_closed(&points, 1.0).unwrap();
        assert!((start - end).length() < 1e-9);

        let near_end = Parameterization::Chordal
            .evaluate_closed(&points, 0.999)
            .unwrap();
        assert!((near_end - start).length() < 0.05);
    }

    #[test]
    fn test_uniform_matches_classic_catmull_rom() {
        let points = square();
        // Midpoint of segment 0 for the classic formula with tension 0.5.
        let (p0, p1, p2, p3) = (points[3], points[0], points[1], points[2]);
        let expected = 0.5
            * ((2.0 * p1)
                + (-p0 + p2) * 0.5
                + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * 0.25
                + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * 0.125);
        let p = Parameterization::Uniform
            .evaluate_closed(&points, 0.125)
            .unwrap();
        assert!((p - expected).length() < 1e-9);
    }

    #[test]
    fn test_too_few_points() {
        let points = vec![DVec3::ZERO, DVec3::X];
        assert!(Parameterization::Chordal.evaluate_closed(&points, 0.5).is_none());
    }

    #[test]
    fn test_duplicate_points_stay_finite() {
        let points = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 1.0),
        ];
        for i in 0..40 {
            let p = Parameterization::Centripetal
                .evaluate_closed(&points, i as f64 / 40.0)
                .unwrap();
            assert!(p.is_finite());
        }
    }
}
