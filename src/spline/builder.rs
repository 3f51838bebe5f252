use bevy::math::{DVec2, DVec3};

use crate::error::TrackError;
use crate::geometry::{bounding_box_center, translate_to_f32};

use super::components::TrackPath;
use super::types::{Parameterization, MIN_CONTROL_POINTS};

/// Number of samples generated along the closed path by default.
pub const DEFAULT_SAMPLE_COUNT: usize = 90;

/// Linear multiplier applied to raw coordinates by default.
///
/// Sized for coordinates given in geographic degrees.
pub const DEFAULT_CURVE_SCALE: f64 = 100_000.0;

/// Turns raw 2D control points into a closed, centered [`TrackPath`].
///
/// Control point `(x, y)` maps to world `(x, 0, y)` after scaling. Scaling
/// and centering run in `f64`, so large geographic coordinates survive the
/// narrowing to `f32`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathBuilder {
    /// Number of points evaluated along the closed spline.
    pub sample_count: usize,
    /// Linear multiplier applied to every control point.
    pub scale: f64,
    /// Knot parameterization of the spline.
    pub parameterization: Parameterization,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            scale: DEFAULT_CURVE_SCALE,
            parameterization: Parameterization::default(),
        }
    }
}

impl PathBuilder {
    /// Create a builder producing `sample_count` samples at unit scale.
    pub fn new(sample_count: usize) -> Self {
        Self {
            sample_count,
            scale: 1.0,
            ..Default::default()
        }
    }

    /// Set the linear scale factor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the knot parameterization.
    pub fn with_parameterization(mut self, parameterization: Parameterization) -> Self {
        self.parameterization = parameterization;
        self
    }

    /// Build the closed path through `control_points`, in input order.
    ///
    /// Samples are taken at `t = k / sample_count`, so the last sample is
    /// spline-adjacent to the first rather than a duplicate of it. The
    /// result is translated so the samples' bounding-box center is the
    /// origin; the raw outline gets the same translation.
    pub fn build(&self, control_points: &[DVec2]) -> Result<TrackPath, TrackError> {
        if control_points.len() < MIN_CONTROL_POINTS {
            return Err(TrackError::InsufficientPoints {
                found: control_points.len(),
                required: MIN_CONTROL_POINTS,
            });
        }
        if self.sample_count == 0 {
            return Err(TrackError::EmptyPath);
        }

        let scaled: Vec<DVec3> = control_points
            .iter()
            .map(|p| DVec3::new(p.x * self.scale, 0.0, p.y * self.scale))
            .collect();

        let samples: Vec<DVec3> = (0..self.sample_count)
            .filter_map(|k| {
                let t = k as f64 / self.sample_count as f64;
                self.parameterization.evaluate_closed(&scaled, t)
            })
            .collect();

        let center = bounding_box_center(&samples).ok_or(TrackError::EmptyPath)?;

        Ok(TrackPath::new(
            control_points.to_vec(),
            translate_to_f32(&samples, center),
            translate_to_f32(&scaled, center),
        ))
    }
}

#[cfg(test)]
mod tests {
    use bevy::math::Vec3;

    use super::*;

    fn unit_square() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ]
    }

    fn irregular_loop() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.5),
            DVec2::new(5.0, 3.0),
            DVec2::new(2.5, 6.0),
            DVec2::new(2.0, 5.8),
            DVec2::new(-1.0, 2.0),
        ]
    }

    fn bbox_center(points: &[Vec3]) -> Vec3 {
        let (min, max) = points
            .iter()
            .fold((points[0], points[0]), |(min, max), &p| (min.min(p), max.max(p)));
        (min + max) * 0.5
    }

    #[test]
    fn test_sample_count_is_exact() {
        for count in [1, 8, 90, 257] {
            let path = PathBuilder::new(count).build(&irregular_loop()).unwrap();
            assert_eq!(path.len(), count);
        }
    }

    #[test]
    fn test_path_is_closed() {
        let path = PathBuilder::new(90).build(&irregular_loop()).unwrap();
        let samples = path.samples();
        let largest_gap = samples
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .fold(0.0_f32, f32::max);
        let closing_gap = samples[samples.len() - 1].distance(samples[0]);
        assert!(closing_gap > 0.0);
        assert!(closing_gap <= largest_gap * 1.5);
    }

    #[test]
    fn test_centered_on_bounding_box() {
        let path = PathBuilder::new(90)
            .with_scale(3.0)
            .build(&irregular_loop())
            .unwrap();
        assert!(bbox_center(path.samples()).length() < 1e-4);
    }

    #[test]
    fn test_scaling_is_linear() {
        let base = PathBuilder::new(64).build(&irregular_loop()).unwrap();
        let scaled = PathBuilder::new(64)
            .with_scale(7.5)
            .build(&irregular_loop())
            .unwrap();
        for (a, b) in base.samples().iter().zip(scaled.samples()) {
            assert!((*a * 7.5 - *b).length() < 1e-3);
        }
    }

    #[test]
    fn test_unit_square_forms_centered_loop() {
        let path = PathBuilder::new(8).build(&unit_square()).unwrap();
        let samples = path.samples();
        assert_eq!(samples.len(), 8);

        // Even samples are the corners, odd samples sit between them.
        let corners = [
            Vec3::new(-0.5, 0.0, -0.5),
            Vec3::new(0.5, 0.0, -0.5),
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(-0.5, 0.0, 0.5),
        ];
        for (i, corner) in corners.iter().enumerate() {
            assert!((samples[i * 2] - *corner).length() < 1e-5);
        }
        for sample in samples {
            assert_eq!(sample.y, 0.0);
            let radius = sample.length();
            assert!(radius > 0.4 && radius < 0.8, "radius {}", radius);
        }
        assert!(bbox_center(samples).length() < 1e-5);
    }

    #[test]
    fn test_outline_shares_offset_with_samples() {
        let path = PathBuilder::new(12)
            .with_scale(2.0)
            .build(&irregular_loop())
            .unwrap();
        assert_eq!(path.outline().len(), 6);
        // Every control point lies on the spline, at sample 2 * i.
        for (i, point) in path.outline().iter().enumerate() {
            assert!((path.samples()[i * 2] - *point).length() < 1e-4);
        }
    }

    #[test]
    fn test_too_few_points_fails() {
        let err = PathBuilder::new(8)
            .build(&[DVec2::ZERO, DVec2::X])
            .unwrap_err();
        assert_eq!(
            err,
            TrackError::InsufficientPoints {
                found: 2,
                required: 3
            }
        );
    }

    #[test]
    fn test_zero_samples_fails() {
        let err = PathBuilder::new(0).build(&unit_square()).unwrap_err();
        assert_eq!(err, TrackError::EmptyPath);
    }

    #[test]
    fn test_duplicate_consecutive_points_do_not_crash() {
        let points = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
        ];
        let path = PathBuilder::new(32).build(&points).unwrap();
        assert!(path.samples().iter().all(|p| p.is_finite()));
    }
}
