//! The tracked object: the model the follower drives around the track.
//!
//! A glTF model loads asynchronously through the [`AssetServer`]; the
//! follower only starts once the entity carries [`ModelReady`]. A failed load
//! is fatal: there is nothing meaningful to show without the model.

use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;
use serde::Deserialize;

use crate::error::TrackError;

/// Where the tracked object's model comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Reflect, Deserialize)]
#[reflect(Default)]
pub enum ModelSource {
    /// A built-in box car, ready immediately.
    #[default]
    Primitive,
    /// The first scene of a glTF file, relative to the assets folder.
    Gltf(String),
}

/// Marker for the single tracked object.
#[derive(Component, Debug, Clone, Copy, Reflect, Default)]
#[reflect(Component)]
pub struct TrackedObject;

/// Marker inserted once the tracked object's model is fully loaded.
#[derive(Component, Debug, Clone, Copy, Reflect, Default)]
#[reflect(Component)]
pub struct ModelReady;

/// A model that is still loading.
#[derive(Component, Debug, Clone)]
pub struct PendingModel {
    /// Asset path, kept for error reporting.
    pub path: String,
    pub handle: Handle<Scene>,
}

/// Spawn the tracked object with its model.
///
/// Primitive models are marked ready straight away; glTF models get a
/// [`PendingModel`] that [`watch_model_loads`] resolves.
pub fn spawn_tracked_object(
    commands: &mut Commands,
    asset_server: &AssetServer,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    source: &ModelSource,
    transform: Transform,
) -> Entity {
    let mut entity = commands.spawn((
        Name::new("Tracked Object"),
        TrackedObject,
        transform,
        Visibility::default(),
    ));

    match source {
        ModelSource::Primitive => {
            let body = meshes.add(Cuboid::new(1.6, 0.6, 3.2));
            let cabin = meshes.add(Cuboid::new(1.3, 0.5, 1.5));
            let paint = materials.add(StandardMaterial {
                base_color: Color::srgb(0.85, 0.15, 0.1),
                ..default()
            });
            let glass = materials.add(StandardMaterial {
                base_color: Color::srgb(0.1, 0.1, 0.15),
                ..default()
            });

            entity.insert(ModelReady).with_children(|parent| {
                parent.spawn((
                    Mesh3d(body),
                    MeshMaterial3d(paint),
                    Transform::from_xyz(0.0, 0.3, 0.0),
                ));
                // Cabin sits toward the rear; forward is -Z.
                parent.spawn((
                    Mesh3d(cabin),
                    MeshMaterial3d(glass),
                    Transform::from_xyz(0.0, 0.85, 0.3),
                ));
            });
        }
        ModelSource::Gltf(path) => {
            let handle = asset_server.load(GltfAssetLabel::Scene(0).from_asset(path.clone()));
            info!("loading model '{}'", path);
            entity.insert((
                SceneRoot(handle.clone()),
                PendingModel {
                    path: path.clone(),
                    handle,
                },
            ));
        }
    }

    entity.id()
}

/// System that marks pending models ready, or exits the app if one failed.
pub fn watch_model_loads(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    pending: Query<(Entity, &PendingModel)>,
    mut exit: MessageWriter<AppExit>,
) {
    for (entity, model) in &pending {
        let id = model.handle.id();

        match (
            asset_server.load_state(id),
            asset_server.recursive_dependency_load_state(id),
        ) {
            (LoadState::Failed(err), _) | (_, RecursiveDependencyLoadState::Failed(err)) => {
                let error = TrackError::AssetLoad {
                    path: model.path.clone(),
                    reason: err.to_string(),
                };
                error!("{}", error);
                commands.entity(entity).remove::<PendingModel>();
                exit.write(AppExit::error());
            }
            (_, RecursiveDependencyLoadState::Loaded) => {
                info!("model '{}' loaded", model.path);
                commands
                    .entity(entity)
                    .remove::<PendingModel>()
                    .insert(ModelReady);
            }
            _ => {}
        }
    }
}

/// Plugin that resolves the tracked object's model loading.
pub struct TrackedModelPlugin;

impl Plugin for TrackedModelPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ModelSource>()
            .register_type::<TrackedObject>()
            .register_type::<ModelReady>()
            .add_systems(Update, watch_model_loads);
    }
}
