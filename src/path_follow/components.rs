use std::time::Duration;

use bevy::prelude::*;

use crate::error::TrackError;
use crate::geometry::{facing_rotation, ForwardCorrection};

use super::tween::{Easing, SegmentTween};

/// Seconds per segment used by [`PathFollower::default`].
pub const DEFAULT_SEGMENT_DURATION: f32 = 0.5;

/// Seconds to wait before retrying a start that failed.
pub const DEFAULT_RETRY_DELAY: f32 = 0.25;

/// Lifecycle of a path follower.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Default)]
pub enum FollowerPhase {
    /// Waiting for the tracked object and the path to exist.
    #[default]
    Idle,
    /// Moving toward the sample at this index.
    Advancing(usize),
    /// Cancelled; the transform is no longer written.
    Stopped,
}

/// Component that drives its entity's [`Transform`] around a [`TrackPath`].
///
/// Each segment first turns the entity toward the target sample, then tweens
/// its position there over `segment_duration` seconds. Reaching the target
/// moves on to the next sample, wrapping to the first one forever.
///
/// [`TrackPath`]: crate::spline::TrackPath
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component, Default)]
pub struct PathFollower {
    /// The entity carrying the path to follow.
    pub path: Entity,

    /// Seconds spent moving toward each sample.
    pub segment_duration: f32,

    /// Interpolation profile of the position tweens.
    pub easing: Easing,

    /// Rotation applied after facing the next sample.
    pub correction: ForwardCorrection,

    /// Seconds to wait before retrying a failed start.
    pub retry_delay: f32,

    phase: FollowerPhase,

    retry_cooldown: f32,

    #[reflect(ignore)]
    tween: Option<SegmentTween>,
}

impl Default for PathFollower {
    fn default() -> Self {
        Self {
            path: Entity::PLACEHOLDER,
            segment_duration: DEFAULT_SEGMENT_DURATION,
            easing: Easing::Linear,
            correction: ForwardCorrection::default(),
            retry_delay: DEFAULT_RETRY_DELAY,
            phase: FollowerPhase::Idle,
            retry_cooldown: 0.0,
            tween: None,
        }
    }
}

impl PathFollower {
    /// Create a follower for the given path entity.
    pub fn new(path: Entity) -> Self {
        Self {
            path,
            ..default()
        }
    }

    /// Set the seconds spent on each segment.
    pub fn with_segment_duration(mut self, seconds: f32) -> Self {
        self.segment_duration = seconds;
        self
    }

    /// Set the easing of the position tweens.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the forward correction.
    pub fn with_correction(mut self, correction: ForwardCorrection) -> Self {
        self.correction = correction;
        self
    }

    /// Set the delay before a failed start is retried.
    pub fn with_retry_delay(mut self, seconds: f32) -> Self {
        self.retry_delay = seconds;
        self
    }

    pub fn phase(&self) -> FollowerPhase {
        self.phase
    }

    /// Index of the sample currently being approached.
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            FollowerPhase::Advancing(index) => Some(index),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == FollowerPhase::Idle
    }

    pub fn is_advancing(&self) -> bool {
        matches!(self.phase, FollowerPhase::Advancing(_))
    }

    pub fn is_stopped(&self) -> bool {
        self.phase == FollowerPhase::Stopped
    }

    /// The tween in flight, if any.
    pub fn segment(&self) -> Option<&SegmentTween> {
        self.tween.as_ref()
    }

    /// Start following: `Idle` to `Advancing(0)`.
    ///
    /// Snaps the object onto the first sample, faces it toward the path
    /// center and starts the first segment. Does nothing unless idle.
    pub fn begin(
        &mut self,
        object: Option<&mut Transform>,
        samples: &[Vec3],
    ) -> Result<(), TrackError> {
        if !self.is_idle() {
            return Ok(());
        }
        let object = object.ok_or(TrackError::ObjectNotReady)?;
        let first = *samples.first().ok_or(TrackError::EmptyPath)?;

        object.translation = first;
        // Paths are centered, so the origin is the middle of the loop.
        object.rotation = facing_rotation(first, Vec3::ZERO, object.rotation, self.correction);

        self.phase = FollowerPhase::Advancing(0);
        self.retry_cooldown = 0.0;
        self.tween = Some(self.start_segment(0, object, samples));
        Ok(())
    }

    /// Step the follower by `delta`.
    ///
    /// Moves the object along the in-flight segment. When all three axes
    /// reach the target, the index advances (wrapping at the end of the
    /// path), the next segment starts and the rest of `delta` carries into
    /// it. Returns the events produced during the step.
    pub fn advance(
        &mut self,
        delta: Duration,
        object: Option<&mut Transform>,
        samples: &[Vec3],
    ) -> Result<Vec<FollowerEventKind>, TrackError> {
        let mut events = Vec::new();
        let FollowerPhase::Advancing(mut index) = self.phase else {
            return Ok(events);
        };
        let object = object.ok_or(TrackError::ObjectNotReady)?;
        if samples.is_empty() {
            return Err(TrackError::EmptyPath);
        }

        // The path may have been rebuilt with fewer samples.
        if index >= samples.len() {
            index %= samples.len();
            self.phase = FollowerPhase::Advancing(index);
            self.tween = None;
        }
        if self.tween.is_none() {
            self.tween = Some(self.start_segment(index, object, samples));
        }

        let mut remaining = delta;
        // At most one lap per step, however large `delta` is.
        for _ in 0..samples.len() {
            let Some(tween) = self.tween.as_mut() else {
                break;
            };
            let step = tween.tick(remaining);
            object.translation = step.position;

            let Some(leftover) = step.leftover else {
                break;
            };

            events.push(FollowerEventKind::SegmentCompleted { index });
            index = (index + 1) % samples.len();
            if index == 0 {
                events.push(FollowerEventKind::LoopCompleted);
            }
            self.phase = FollowerPhase::Advancing(index);
            self.tween = Some(self.start_segment(index, object, samples));

            remaining = leftover;
            if remaining.is_zero() {
                break;
            }
        }

        Ok(events)
    }

    /// Cancel any tween in flight. The follower stays put until [`reset`](Self::reset).
    pub fn cancel(&mut self) {
        self.phase = FollowerPhase::Stopped;
        self.tween = None;
    }

    /// Return to `Idle` so the follower restarts from the first sample.
    pub fn reset(&mut self) {
        self.phase = FollowerPhase::Idle;
        self.retry_cooldown = 0.0;
        self.tween = None;
    }

    /// Count down the retry delay. Returns true once a start may be attempted.
    pub fn cool_down(&mut self, delta: Duration) -> bool {
        self.retry_cooldown = (self.retry_cooldown - delta.as_secs_f32()).max(0.0);
        self.retry_cooldown <= 0.0
    }

    /// Wait `retry_delay` seconds before the next start attempt.
    pub fn schedule_retry(&mut self) {
        self.retry_cooldown = self.retry_delay;
    }

    /// Segment duration as a [`Duration`]. Negative or NaN seconds give zero;
    /// values too large to represent saturate.
    fn duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.segment_duration.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// Face `samples[index]` and build the tween toward it.
    fn start_segment(&self, index: usize, object: &mut Transform, samples: &[Vec3]) -> SegmentTween {
        let target = samples[index];
        object.rotation =
            facing_rotation(object.translation, target, object.rotation, self.correction);

        SegmentTween::new(object.translation, target, self.duration(), self.easing)
    }
}

/// Message emitted when a follower makes progress along its path.
#[derive(Message, Debug, Clone)]
pub struct FollowerEvent {
    /// The entity with the PathFollower component.
    pub entity: Entity,
    /// The type of event.
    pub kind: FollowerEventKind,
}

/// Types of follower events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowerEventKind {
    /// Follower started at the first sample.
    Started,
    /// Follower reached the sample at `index`.
    SegmentCompleted { index: usize },
    /// Follower wrapped from the last sample back to the first.
    LoopCompleted,
    /// Follower was cancelled.
    Cancelled,
}
