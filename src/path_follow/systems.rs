use bevy::prelude::*;

use crate::model::ModelReady;
use crate::spline::TrackPath;

use super::{FollowerEvent, FollowerEventKind, PathFollower};

/// System that starts idle followers once their object and path are ready.
///
/// A failed start is not fatal: the follower waits `retry_delay` seconds and
/// tries again, so a slow model load only delays the first segment.
pub fn start_path_followers(
    mut followers: Query<(Entity, &mut PathFollower, &mut Transform, Has<ModelReady>)>,
    paths: Query<&TrackPath>,
    time: Res<Time>,
    mut events: MessageWriter<FollowerEvent>,
) {
    for (entity, mut follower, mut transform, ready) in &mut followers {
        if !follower.is_idle() || !follower.cool_down(time.delta()) {
            continue;
        }

        let samples = paths
            .get(follower.path)
            .map(TrackPath::samples)
            .unwrap_or_default();
        let object = if ready { Some(&mut *transform) } else { None };

        match follower.begin(object, samples) {
            Ok(()) => {
                info!(
                    "follower {} started on a path of {} samples",
                    entity,
                    samples.len()
                );
                events.write(FollowerEvent {
                    entity,
                    kind: FollowerEventKind::Started,
                });
            }
            Err(err) => {
                debug!(
                    "follower {} not started ({}), retrying in {}s",
                    entity, err, follower.retry_delay
                );
                follower.schedule_retry();
            }
        }
    }
}

/// System that steps every advancing follower by the frame delta.
pub fn advance_path_followers(
    mut followers: Query<(Entity, &mut PathFollower, &mut Transform, Has<ModelReady>)>,
    paths: Query<&TrackPath>,
    time: Res<Time>,
    mut events: MessageWriter<FollowerEvent>,
) {
    let delta = time.delta();

    for (entity, mut follower, mut transform, ready) in &mut followers {
        if !follower.is_advancing() {
            continue;
        }

        // A despawned path tears the follower down with it.
        let Ok(path) = paths.get(follower.path) else {
            warn!("path of follower {} is gone, cancelling", entity);
            follower.cancel();
            events.write(FollowerEvent {
                entity,
                kind: FollowerEventKind::Cancelled,
            });
            continue;
        };

        let object = if ready { Some(&mut *transform) } else { None };
        match follower.advance(delta, object, path.samples()) {
            Ok(kinds) => {
                for kind in kinds {
                    events.write(FollowerEvent { entity, kind });
                }
            }
            Err(err) => warn!("follower {} could not advance: {}", entity, err),
        }
    }
}

/// System that cancels in-flight tweens when the app is shutting down.
pub fn cancel_followers_on_exit(
    mut exits: MessageReader<AppExit>,
    mut followers: Query<(Entity, &mut PathFollower)>,
    mut events: MessageWriter<FollowerEvent>,
) {
    if exits.read().count() == 0 {
        return;
    }

    for (entity, mut follower) in &mut followers {
        if follower.is_stopped() {
            continue;
        }
        follower.cancel();
        events.write(FollowerEvent {
            entity,
            kind: FollowerEventKind::Cancelled,
        });
    }
}

/// System that logs follower progress.
pub fn log_follower_events(mut events: MessageReader<FollowerEvent>) {
    for event in events.read() {
        match event.kind {
            FollowerEventKind::Started => debug!("[{}] started", event.entity),
            FollowerEventKind::SegmentCompleted { index } => {
                trace!("[{}] reached sample {}", event.entity, index)
            }
            FollowerEventKind::LoopCompleted => info!("[{}] lap completed", event.entity),
            FollowerEventKind::Cancelled => info!("[{}] cancelled", event.entity),
        }
    }
}
