mod orbit;

pub use orbit::{orbit_camera_input, update_orbit_cameras, OrbitCamera};

use bevy::prelude::*;
use bevy::transform::TransformSystems;

/// Plugin that adds orbit camera controls.
///
/// # Usage
/// Add an `OrbitCamera` to your camera entity. Give it a target to keep an
/// entity in focus as it moves.
///
/// # Controls
/// - Left or right mouse button + drag: Orbit around focus (damped)
/// - Scroll wheel: Zoom in/out
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<OrbitCamera>()
            .add_systems(Update, orbit::orbit_camera_input)
            // After followers have moved this frame, before transforms propagate.
            .add_systems(
                PostUpdate,
                orbit::update_orbit_cameras.before(TransformSystems::Propagate),
            );
    }
}
