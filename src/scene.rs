//! The track scene: path, tracked object, camera and lights wired together.
//!
//! The spawned entities are recorded in the [`TrackScene`] resource so
//! systems reach each other's pieces through an explicit context.

use bevy::prelude::*;

use crate::camera::{CameraPlugin, OrbitCamera};
use crate::config::TrackConfig;
#[cfg(feature = "debug_panel")]
use crate::debug_panel::DebugPanelPlugin;
use crate::model::{spawn_tracked_object, TrackedModelPlugin};
use crate::path_follow::PathFollowPlugin;
use crate::spline::SplinePlugin;

/// Entities making up the running scene.
#[derive(Resource, Debug, Clone, Copy)]
pub struct TrackScene {
    /// Entity carrying the [`TrackPath`](crate::spline::TrackPath).
    pub path: Entity,
    /// The car, driven by a [`PathFollower`](crate::path_follow::PathFollower).
    pub tracked_object: Entity,
    /// The orbit camera.
    pub camera: Entity,
}

/// Plugin that builds the whole scene from a [`TrackConfig`].
///
/// Adds every other plugin of the crate. The debug panel is included when
/// the `debug_panel` feature is enabled.
pub struct TrackScenePlugin {
    config: TrackConfig,
}

impl TrackScenePlugin {
    pub fn new(config: TrackConfig) -> Self {
        Self { config }
    }
}

impl Default for TrackScenePlugin {
    fn default() -> Self {
        Self::new(TrackConfig::default())
    }
}

impl Plugin for TrackScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .add_plugins((SplinePlugin, PathFollowPlugin, TrackedModelPlugin, CameraPlugin))
            .add_systems(Startup, setup_track_scene);

        #[cfg(feature = "debug_panel")]
        app.add_plugins(DebugPanelPlugin);
    }
}

/// Startup system that spawns the scene.
///
/// A track that cannot be built is fatal: nothing is spawned and the app
/// exits with an error.
pub fn setup_track_scene(
    mut commands: Commands,
    config: Res<TrackConfig>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut exit: MessageWriter<AppExit>,
) {
    let path = match config.path_builder().build(&config.control_points()) {
        Ok(path) => path,
        Err(err) => {
            error!("cannot build track: {}", err);
            exit.write(AppExit::error());
            return;
        }
    };
    info!(
        "track built from {} control points: {} samples, {} knots",
        path.control_points().len(),
        path.len(),
        config.parameterization.name()
    );

    let path = commands
        .spawn((
            Name::new("Track Path"),
            path,
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let tracked_object = spawn_tracked_object(
        &mut commands,
        &asset_server,
        &mut meshes,
        &mut materials,
        &config.model,
        Transform::from_scale(Vec3::splat(config.model_scale)),
    );
    commands
        .entity(tracked_object)
        .insert(config.follower(path));

    // Directional light
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Camera with orbit controls, focused on the tracked object
    let position = Vec3::from(config.camera.position);
    let orbit = OrbitCamera {
        damping: config.camera.damping,
        max_radius: config.camera.far * 0.8,
        ..OrbitCamera::from_position(position, Vec3::ZERO)
    };
    let camera = commands
        .spawn((
            Name::new("Camera"),
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: config.camera.fov_degrees.to_radians(),
                near: config.camera.near,
                far: config.camera.far,
                ..default()
            }),
            Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
            AmbientLight {
                color: Color::WHITE,
                brightness: 400.0,
                ..default()
            },
            orbit.with_target(tracked_object),
        ))
        .id();

    commands.insert_resource(TrackScene {
        path,
        tracked_object,
        camera,
    });
}

#[cfg(test)]
mod tests {
    use bevy::asset::AssetPlugin;

    use super::*;
    use crate::model::ModelReady;
    use crate::path_follow::PathFollower;
    use crate::spline::TrackPath;

    fn app(config: TrackConfig) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<StandardMaterial>()
            .insert_resource(config)
            .add_systems(Startup, setup_track_scene);
        app
    }

    fn count<C: Component>(app: &mut App) -> usize {
        let mut query = app.world_mut().query::<&C>();
        query.iter(app.world()).count()
    }

    #[test]
    fn test_too_few_coordinates_exit_without_spawning() {
        let mut app = app(TrackConfig {
            coordinates: vec![(0.0, 0.0), (1.0, 1.0)],
            ..default()
        });
        app.update();

        assert!(matches!(app.should_exit(), Some(AppExit::Error(_))));
        assert_eq!(count::<TrackPath>(&mut app), 0);
        assert_eq!(count::<PathFollower>(&mut app), 0);
        assert_eq!(count::<OrbitCamera>(&mut app), 0);
        assert!(app.world().get_resource::<TrackScene>().is_none());
    }

    #[test]
    fn test_default_config_spawns_wired_scene() {
        let config = TrackConfig::default();
        let sample_count = config.sample_count;
        let mut app = app(config);
        app.update();

        assert!(app.should_exit().is_none());
        let scene = *app.world().resource::<TrackScene>();

        let path = app.world().get::<TrackPath>(scene.path).unwrap();
        assert_eq!(path.len(), sample_count);

        let follower = app
            .world()
            .get::<PathFollower>(scene.tracked_object)
            .unwrap();
        assert_eq!(follower.path, scene.path);
        assert!(app
            .world()
            .get::<ModelReady>(scene.tracked_object)
            .is_some());

        let orbit = app.world().get::<OrbitCamera>(scene.camera).unwrap();
        assert_eq!(orbit.target, Some(scene.tracked_object));
    }
}
