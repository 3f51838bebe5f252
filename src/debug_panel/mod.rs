mod systems;

pub use systems::{
    draw_path_outlines, handle_debug_hotkeys, spawn_debug_overlay, sync_tracked_object_visibility,
    update_debug_overlay, DebugOverlay,
};

use bevy::prelude::*;

/// A visibility switch exposed by the debug panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DebugToggle {
    /// The tracked object (the car).
    TrackedObject,
    /// The raw control point outline.
    RawOutline,
    /// The smoothed path.
    SmoothedPath,
}

impl DebugToggle {
    /// All toggles, in panel order.
    pub const ALL: [Self; 3] = [Self::TrackedObject, Self::RawOutline, Self::SmoothedPath];

    /// Hotkey flipping this toggle.
    pub fn key(self) -> KeyCode {
        match self {
            Self::TrackedObject => KeyCode::Digit1,
            Self::RawOutline => KeyCode::Digit2,
            Self::SmoothedPath => KeyCode::Digit3,
        }
    }

    /// Get the display name for this toggle.
    pub fn label(self) -> &'static str {
        match self {
            Self::TrackedObject => "car visible",
            Self::RawOutline => "coords",
            Self::SmoothedPath => "curve",
        }
    }
}

/// Visibility switches for scene elements.
#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct DebugPanel {
    /// Whether the tracked object is drawn.
    pub show_tracked_object: bool,
    /// Whether the raw control point outline is drawn.
    pub show_raw_outline: bool,
    /// Whether the smoothed path is drawn.
    pub show_path: bool,
    /// Whether the on-screen panel text is shown.
    pub show_overlay: bool,
    /// Color of the raw outline.
    pub raw_outline_color: Color,
    /// Color of the smoothed path.
    pub path_color: Color,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self {
            show_tracked_object: true,
            show_raw_outline: false,
            show_path: true,
            show_overlay: true,
            raw_outline_color: Color::srgb(1.0, 0.8, 0.2),
            path_color: Color::WHITE,
        }
    }
}

impl DebugPanel {
    /// Check whether a toggle is on.
    pub fn is_shown(&self, toggle: DebugToggle) -> bool {
        match toggle {
            DebugToggle::TrackedObject => self.show_tracked_object,
            DebugToggle::RawOutline => self.show_raw_outline,
            DebugToggle::SmoothedPath => self.show_path,
        }
    }

    /// Flip a toggle and return its new state.
    pub fn toggle(&mut self, toggle: DebugToggle) -> bool {
        let flag = match toggle {
            DebugToggle::TrackedObject => &mut self.show_tracked_object,
            DebugToggle::RawOutline => &mut self.show_raw_outline,
            DebugToggle::SmoothedPath => &mut self.show_path,
        };
        *flag = !*flag;
        *flag
    }

    /// Panel text, one line per toggle.
    pub fn describe(&self) -> String {
        let mut text = String::from("Debug (H to hide)\n");
        for toggle in DebugToggle::ALL {
            let state = if self.is_shown(toggle) { "on" } else { "off" };
            text.push_str(&format!("[{:?}] {}: {}\n", toggle.key(), toggle.label(), state));
        }
        text
    }
}

/// Plugin that adds the debug panel.
///
/// # Hotkeys
/// - `1`: Toggle the tracked object
/// - `2`: Toggle the raw coordinate outline
/// - `3`: Toggle the smoothed path
/// - `H`: Toggle the panel text
pub struct DebugPanelPlugin;

impl Plugin for DebugPanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugPanel>()
            .register_type::<DebugPanel>()
            .register_type::<DebugToggle>()
            .add_systems(Startup, systems::spawn_debug_overlay)
            .add_systems(
                Update,
                (
                    systems::handle_debug_hotkeys,
                    systems::sync_tracked_object_visibility,
                    systems::update_debug_overlay,
                    systems::draw_path_outlines,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_startup_state() {
        let panel = DebugPanel::default();
        assert!(panel.is_shown(DebugToggle::TrackedObject));
        assert!(!panel.is_shown(DebugToggle::RawOutline));
        assert!(panel.is_shown(DebugToggle::SmoothedPath));
    }

    #[test]
    fn test_toggle_flips_only_one_flag() {
        let mut panel = DebugPanel::default();
        assert!(panel.toggle(DebugToggle::RawOutline));
        assert!(panel.show_raw_outline);
        assert!(panel.show_tracked_object);
        assert!(panel.show_path);
        assert!(!panel.toggle(DebugToggle::RawOutline));
    }

    #[test]
    fn test_describe_lists_every_toggle() {
        let text = DebugPanel::default().describe();
        for toggle in DebugToggle::ALL {
            assert!(text.contains(toggle.label()));
        }
    }
}
