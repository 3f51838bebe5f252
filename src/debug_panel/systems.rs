use bevy::prelude::*;

use crate::model::TrackedObject;
use crate::spline::TrackPath;

use super::{DebugPanel, DebugToggle};

/// Marker for the panel's text node.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct DebugOverlay;

/// System to flip panel toggles with the number keys.
pub fn handle_debug_hotkeys(keyboard: Res<ButtonInput<KeyCode>>, mut panel: ResMut<DebugPanel>) {
    for toggle in DebugToggle::ALL {
        if keyboard.just_pressed(toggle.key()) {
            let shown = panel.toggle(toggle);
            info!("{}: {}", toggle.label(), shown);
        }
    }

    // H - Show/hide the panel text
    if keyboard.just_pressed(KeyCode::KeyH) {
        panel.show_overlay = !panel.show_overlay;
    }
}

/// System to bind the tracked object's visibility to its toggle.
pub fn sync_tracked_object_visibility(
    panel: Res<DebugPanel>,
    mut objects: Query<&mut Visibility, With<TrackedObject>>,
) {
    let wanted = if panel.show_tracked_object {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };

    for mut visibility in &mut objects {
        visibility.set_if_neq(wanted);
    }
}

/// System to spawn the panel text.
pub fn spawn_debug_overlay(mut commands: Commands, panel: Res<DebugPanel>) {
    commands.spawn((
        Name::new("Debug Overlay"),
        DebugOverlay,
        Text::new(panel.describe()),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

/// System to refresh the panel text when a toggle changes.
pub fn update_debug_overlay(
    panel: Res<DebugPanel>,
    mut overlays: Query<(&mut Text, &mut Visibility), With<DebugOverlay>>,
) {
    if !panel.is_changed() {
        return;
    }

    for (mut text, mut visibility) in &mut overlays {
        text.0 = panel.describe();
        visibility.set_if_neq(if panel.show_overlay {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

/// System to draw the raw outline and smoothed path as closed line strips.
pub fn draw_path_outlines(
    panel: Res<DebugPanel>,
    paths: Query<(&TrackPath, &GlobalTransform)>,
    mut gizmos: Gizmos,
) {
    for (path, global_transform) in &paths {
        if panel.show_path {
            draw_closed(&mut gizmos, path.samples(), global_transform, panel.path_color);
        }
        if panel.show_raw_outline {
            draw_closed(&mut gizmos, path.outline(), global_transform, panel.raw_outline_color);
        }
    }
}

fn draw_closed(gizmos: &mut Gizmos, points: &[Vec3], global_transform: &GlobalTransform, color: Color) {
    if points.len() < 2 {
        return;
    }

    // Repeat the first point to close the loop.
    let world_points = points
        .iter()
        .chain(points.first())
        .map(|&p| global_transform.transform_point(p));
    gizmos.linestrip(world_points, color);
}
