use bevy::math::DVec2;
use bevy::prelude::*;

/// A closed, sampled track path attached to an entity.
///
/// Built by [`PathBuilder`](super::PathBuilder) and immutable afterwards.
/// Samples are cyclic: the sample after the last one is the first one.
#[derive(Component, Debug, Clone, Reflect, Default)]
#[reflect(Component)]
pub struct TrackPath {
    /// Raw control points in input order, before scaling.
    control_points: Vec<DVec2>,
    /// Evenly spaced points on the closed spline, centered at the origin.
    samples: Vec<Vec3>,
    /// Scaled control points in the XZ plane, sharing the samples' offset.
    outline: Vec<Vec3>,
}

impl TrackPath {
    pub(crate) fn new(control_points: Vec<DVec2>, samples: Vec<Vec3>, outline: Vec<Vec3>) -> Self {
        Self {
            control_points,
            samples,
            outline,
        }
    }

    /// Build a path straight from already sampled points.
    ///
    /// The points are used as-is: no smoothing and no centering.
    pub fn from_samples(samples: Vec<Vec3>) -> Self {
        Self {
            control_points: Vec::new(),
            outline: samples.clone(),
            samples,
        }
    }

    /// The raw control points the path was built from.
    pub fn control_points(&self) -> &[DVec2] {
        &self.control_points
    }

    /// The sampled points along the closed path.
    pub fn samples(&self) -> &[Vec3] {
        &self.samples
    }

    /// The raw coordinate outline.
    pub fn outline(&self) -> &[Vec3] {
        &self.outline
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the path has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the sample at `index`, wrapping around the loop.
    pub fn sample(&self, index: usize) -> Option<Vec3> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples[index % self.samples.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_wraps() {
        let path = TrackPath::from_samples(vec![Vec3::X, Vec3::Y, Vec3::Z]);
        assert_eq!(path.sample(0), Some(Vec3::X));
        assert_eq!(path.sample(3), Some(Vec3::X));
        assert_eq!(path.sample(5), Some(Vec3::Z));
        assert_eq!(TrackPath::default().sample(0), None);
    }
}
