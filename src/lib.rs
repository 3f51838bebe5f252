//! # bevy_track_follow
//!
//! A Bevy app and plugin set that drives a model around a closed track.
//!
//! A short list of geographic coordinates is scaled into world space,
//! smoothed into a closed Catmull-Rom loop and sampled at a fixed count. A
//! tracked object then visits every sample in turn forever, facing each one
//! before it moves there.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_track_follow::prelude::*;
//!
//! fn main() -> AppExit {
//!     let config = TrackConfig::load_or_default(DEFAULT_CONFIG_PATH).unwrap();
//!
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(TrackScenePlugin::new(config))
//!         .run()
//! }
//! ```
//!
//! ## Plugins
//!
//! - [`TrackScenePlugin`]: Spawns the whole scene and adds the plugins below
//! - [`SplinePlugin`]: Type registration for the track path
//! - [`PathFollowPlugin`]: Steps path followers every frame
//! - [`TrackedModelPlugin`]: Resolves glTF model loading
//! - [`CameraPlugin`]: Orbit camera focused on the tracked object
//! - `DebugPanelPlugin`: Hotkeys and overlays (`debug_panel` feature)

pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod model;
pub mod path_follow;
pub mod scene;
pub mod spline;

#[cfg(feature = "debug_panel")]
pub mod debug_panel;

pub use camera::CameraPlugin;
pub use model::TrackedModelPlugin;
pub use path_follow::PathFollowPlugin;
pub use scene::TrackScenePlugin;
pub use spline::SplinePlugin;

#[cfg(feature = "debug_panel")]
pub use debug_panel::DebugPanelPlugin;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use bevy::math::DVec2;

    pub use crate::camera::{CameraPlugin, OrbitCamera};
    pub use crate::config::{CameraConfig, ConfigError, TrackConfig, DEFAULT_CONFIG_PATH};
    pub use crate::error::TrackError;
    pub use crate::geometry::ForwardCorrection;
    pub use crate::model::{ModelReady, ModelSource, TrackedModelPlugin, TrackedObject};
    pub use crate::path_follow::{
        Easing, FollowerEvent, FollowerEventKind, FollowerPhase, PathFollowPlugin, PathFollower,
    };
    pub use crate::scene::{TrackScene, TrackScenePlugin};
    pub use crate::spline::{Parameterization, PathBuilder, SplinePlugin, TrackPath};

    #[cfg(feature = "debug_panel")]
    pub use crate::debug_panel::{DebugPanel, DebugPanelPlugin, DebugToggle};
}
