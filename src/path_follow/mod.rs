//! Path following plugin that drives the tracked object around the track.
//!
//! The follower is a small state machine stepped once per frame: it faces
//! the next sample, tweens x, y and z toward it over a fixed duration and
//! only moves on once all three axes have arrived.
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use bevy_track_follow::prelude::*;
//!
//! fn setup(mut commands: Commands) {
//!     let path = PathBuilder::new(90)
//!         .build(&[
//!             DVec2::new(0.0, 0.0),
//!             DVec2::new(10.0, 0.0),
//!             DVec2::new(10.0, 10.0),
//!             DVec2::new(0.0, 10.0),
//!         ])
//!         .unwrap();
//!     let path_entity = commands.spawn(path).id();
//!
//!     commands.spawn((
//!         Transform::default(),
//!         ModelReady,
//!         PathFollower::new(path_entity).with_segment_duration(0.5),
//!     ));
//! }
//! ```

mod components;
mod systems;
mod tween;

pub use components::*;
pub use systems::{advance_path_followers, start_path_followers};
pub use tween::{AxisTween, Easing, SegmentStep, SegmentTween};

use bevy::prelude::*;

use crate::geometry::ForwardCorrection;

/// Plugin that steps [`PathFollower`] components every frame.
///
/// Followers start once their entity carries [`ModelReady`](crate::model::ModelReady)
/// and their path entity has a [`TrackPath`](crate::spline::TrackPath).
/// Followers are cancelled when the app exits.
pub struct PathFollowPlugin;

impl Plugin for PathFollowPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PathFollower>()
            .register_type::<FollowerPhase>()
            .register_type::<Easing>()
            .register_type::<ForwardCorrection>()
            .add_message::<FollowerEvent>()
            .add_systems(
                Update,
                (
                    systems::start_path_followers,
                    systems::advance_path_followers,
                    systems::log_follower_events,
                )
                    .chain(),
            )
            .add_systems(Last, systems::cancel_followers_on_exit);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::model::ModelReady;
    use crate::spline::TrackPath;

    #[derive(Resource, Default)]
    struct TransformWrites(usize);

    #[derive(Resource, Default)]
    struct SeenEvents(Vec<FollowerEventKind>);

    fn count_transform_writes(
        changed: Query<(), (Changed<Transform>, With<PathFollower>)>,
        mut writes: ResMut<TransformWrites>,
    ) {
        writes.0 += changed.iter().count();
    }

    fn collect_events(mut reader: MessageReader<FollowerEvent>, mut seen: ResMut<SeenEvents>) {
        seen.0.extend(reader.read().map(|event| event.kind));
    }

    fn samples() -> Vec<Vec3> {
        vec![
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 1.0),
        ]
    }

    fn setup_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(PathFollowPlugin)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .init_resource::<TransformWrites>()
            .init_resource::<SeenEvents>()
            .add_systems(PostUpdate, (count_transform_writes, collect_events));
        app
    }

    fn spawn_follower(app: &mut App, retry_delay: f32) -> (Entity, Entity) {
        let path = app
            .world_mut()
            .spawn(TrackPath::from_samples(samples()))
            .id();
        let object = app
            .world_mut()
            .spawn((
                Transform::default(),
                PathFollower::new(path).with_retry_delay(retry_delay),
            ))
            .id();
        (path, object)
    }

    fn follower(app: &App, entity: Entity) -> &PathFollower {
        app.world().get::<PathFollower>(entity).unwrap()
    }

    #[test]
    fn test_start_waits_for_model_ready() {
        let mut app = setup_app();
        let (_, object) = spawn_follower(&mut app, 0.0);

        app.update();
        app.update();
        assert!(follower(&app, object).is_idle());
        assert_eq!(
            app.world().get::<Transform>(object).unwrap().translation,
            Vec3::ZERO
        );

        app.world_mut().entity_mut(object).insert(ModelReady);
        app.update();
        assert_eq!(follower(&app, object).phase(), FollowerPhase::Advancing(0));
        assert_eq!(
            app.world().get::<Transform>(object).unwrap().translation,
            samples()[0]
        );
        assert!(app
            .world()
            .resource::<SeenEvents>()
            .0
            .contains(&FollowerEventKind::Started));
    }

    #[test]
    fn test_failed_start_is_retried_after_delay() {
        let mut app = setup_app();
        let (_, object) = spawn_follower(&mut app, 0.25);

        // First attempt fails and schedules a retry.
        app.update();
        app.world_mut().entity_mut(object).insert(ModelReady);

        app.update();
        app.update();
        assert!(follower(&app, object).is_idle());

        app.update();
        assert!(follower(&app, object).is_advancing());
    }

    #[test]
    fn test_despawned_path_stops_transform_writes() {
        let mut app = setup_app();
        let (path, object) = spawn_follower(&mut app, 0.0);
        app.world_mut().entity_mut(object).insert(ModelReady);

        app.update();
        app.update();
        assert!(follower(&app, object).is_advancing());

        app.world_mut().despawn(path);
        app.update();
        assert!(follower(&app, object).is_stopped());
        assert_eq!(
            app.world().resource::<SeenEvents>().0.last(),
            Some(&FollowerEventKind::Cancelled)
        );

        app.world_mut().resource_mut::<TransformWrites>().0 = 0;
        let frozen = *app.world().get::<Transform>(object).unwrap();
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(app.world().resource::<TransformWrites>().0, 0);
        assert_eq!(*app.world().get::<Transform>(object).unwrap(), frozen);
    }

    #[test]
    fn test_app_exit_cancels_followers() {
        let mut app = setup_app();
        let (_, object) = spawn_follower(&mut app, 0.0);
        app.world_mut().entity_mut(object).insert(ModelReady);

        app.update();
        assert!(follower(&app, object).is_advancing());

        app.world_mut().write_message(AppExit::Success);
        app.update();
        assert!(follower(&app, object).is_stopped());
        assert!(follower(&app, object).segment().is_none());
    }
}
