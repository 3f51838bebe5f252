mod builder;
mod components;
mod types;

pub use builder::*;
pub use components::*;
pub use types::*;

use bevy::prelude::*;

/// Plugin that registers track path types for reflection.
pub struct SplinePlugin;

impl Plugin for SplinePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Parameterization>()
            .register_type::<TrackPath>();
    }
}
