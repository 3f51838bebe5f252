//! Fixed-duration tweens for the follower's position.
//!
//! A segment is three independent axis tweens that are joined: the segment
//! only completes once every axis has reached its target.

use std::time::Duration;

use bevy::math::curve::{Curve, EaseFunction, EasingCurve};
use bevy::prelude::*;
use serde::Deserialize;

/// Interpolation profile of a tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Deserialize)]
#[reflect(Default)]
pub enum Easing {
    /// Constant rate, no acceleration or deceleration.
    #[default]
    Linear,
    /// Accelerate then decelerate, quadratically.
    QuadraticInOut,
    /// Accelerate then decelerate, cubically.
    CubicInOut,
}

impl Easing {
    fn function(self) -> EaseFunction {
        match self {
            Self::Linear => EaseFunction::Linear,
            Self::QuadraticInOut => EaseFunction::QuadraticInOut,
            Self::CubicInOut => EaseFunction::CubicInOut,
        }
    }
}

/// Tween of a single scalar from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl AxisTween {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Advance by `delta`, clamped at the tween's duration.
    pub fn tick(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
    }

    /// Time still needed to reach the target.
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current value. Exactly `to` once finished.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let progress = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        EasingCurve::new(self.from, self.to, self.easing.function()).sample_clamped(progress)
    }
}

/// Result of ticking a [`SegmentTween`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStep {
    /// Position after the tick.
    pub position: Vec3,
    /// Unused part of the tick once all axes completed, `None` while in flight.
    pub leftover: Option<Duration>,
}

/// Joined x/y/z tweens moving toward one path sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentTween {
    axes: [AxisTween; 3],
    target: Vec3,
}

impl SegmentTween {
    pub fn new(from: Vec3, to: Vec3, duration: Duration, easing: Easing) -> Self {
        Self {
            axes: [
                AxisTween::new(from.x, to.x, duration, easing),
                AxisTween::new(from.y, to.y, duration, easing),
                AxisTween::new(from.z, to.z, duration, easing),
            ],
            target: to,
        }
    }

    /// The sample this segment moves toward.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Number of axes that reached their target.
    pub fn completed_axes(&self) -> usize {
        self.axes.iter().filter(|axis| axis.is_finished()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.completed_axes() == self.axes.len()
    }

    /// Current interpolated position.
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.axes[0].value(), self.axes[1].value(), self.axes[2].value())
    }

    /// Advance every axis by `delta`.
    ///
    /// Leftover time is measured against the slowest axis, so the segment
    /// never completes before its last axis does.
    pub fn tick(&mut self, delta: Duration) -> SegmentStep {
        let needed = self
            .axes
            .iter()
            .map(AxisTween::remaining)
            .max()
            .unwrap_or(Duration::ZERO);

        for axis in &mut self.axes {
            axis.tick(delta);
        }

        SegmentStep {
            position: self.position(),
            leftover: self.is_complete().then(|| delta.saturating_sub(needed)),
        }
    }
}
