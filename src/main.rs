//! Track follow application.
//!
//! Run with: `cargo run`. Edit `assets/track.ron` to change the track.

use bevy::prelude::*;
use bevy_track_follow::prelude::*;

fn main() -> AppExit {
    let config = match TrackConfig::load_or_default(DEFAULT_CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return AppExit::error();
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Track Follow".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(TrackScenePlugin::new(config))
        .run()
}
