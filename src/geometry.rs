//! Geometry utilities for centering paths and orienting the tracked object.

use bevy::math::DVec3;
use bevy::prelude::*;
use serde::Deserialize;

/// Horizontal direction lengths below this do not define a heading.
const MIN_HEADING_LENGTH_SQUARED: f32 = 1e-8;

/// Center of the axis-aligned bounding box around `points`.
///
/// Returns `None` for an empty slice.
pub fn bounding_box_center(points: &[DVec3]) -> Option<DVec3> {
    let first = *points.first()?;
    let (min, max) = points
        .iter()
        .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
    Some((min + max) * 0.5)
}

/// Translate `points` by `-offset` and narrow them to `f32`.
pub fn translate_to_f32(points: &[DVec3], offset: DVec3) -> Vec<Vec3> {
    points.iter().map(|&p| (p - offset).as_vec3()).collect()
}

/// Constant rotation applied after facing a target, to line up a model whose
/// authored forward axis is not Bevy's `-Z`.
///
/// Angles are in radians (Euler order YXZ). `yaw` is added to the look-at
/// heading; `pitch` and `roll` replace whatever the look-at produced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Deserialize)]
#[reflect(Default)]
#[serde(default)]
pub struct ForwardCorrection {
    /// Extra rotation about the Y axis on top of the heading.
    pub yaw: f32,
    /// Rotation about the local X axis.
    pub pitch: f32,
    /// Rotation about the local Z axis.
    pub roll: f32,
}

impl ForwardCorrection {
    /// For models authored with Z up and their front along +Z: a half turn
    /// of yaw so +Z faces the target, a quarter turn down in pitch and a
    /// half turn in roll.
    pub const Z_UP: Self = Self {
        yaw: std::f32::consts::PI,
        pitch: -std::f32::consts::FRAC_PI_2,
        roll: std::f32::consts::PI,
    };
}

/// Rotation that points the object at `position` toward `target`, followed
/// by the forward correction.
///
/// The look-at only contributes a heading around Y. If the horizontal offset
/// to the target is degenerate, the yaw of `current` is kept as-is.
pub fn facing_rotation(
    position: Vec3,
    target: Vec3,
    current: Quat,
    correction: ForwardCorrection,
) -> Quat {
    let offset = target - position;
    let yaw = if offset.x * offset.x + offset.z * offset.z > MIN_HEADING_LENGTH_SQUARED {
        // Yaw that turns -Z onto the horizontal offset.
        (-offset.x).atan2(-offset.z) + correction.yaw
    } else {
        current.to_euler(EulerRot::YXZ).0
    };

    Quat::from_euler(EulerRot::YXZ, yaw, correction.pitch, correction.roll)
}
