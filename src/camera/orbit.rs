use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
};

/// Component for orbit camera behavior.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct OrbitCamera {
    /// The point to orbit around.
    pub focus: Vec3,
    /// Entity whose translation becomes the focus every frame.
    pub target: Option<Entity>,
    /// Distance from the focus point.
    pub radius: f32,
    /// Rotation around the Y axis (yaw).
    pub yaw: f32,
    /// Rotation around the X axis (pitch).
    pub pitch: f32,
    /// Orbit sensitivity (radians per pixel).
    pub sensitivity: f32,
    /// Zoom sensitivity (units per scroll).
    pub zoom_sensitivity: f32,
    /// Fraction of the angular velocity lost each frame (0 = no damping).
    pub damping: f32,
    /// Minimum orbit radius.
    pub min_radius: f32,
    /// Maximum orbit radius.
    pub max_radius: f32,
    /// Minimum pitch (prevents flipping).
    pub min_pitch: f32,
    /// Maximum pitch (prevents flipping).
    pub max_pitch: f32,
    /// Current yaw velocity in radians per frame.
    pub yaw_velocity: f32,
    /// Current pitch velocity in radians per frame.
    pub pitch_velocity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            target: None,
            radius: 10.0,
            yaw: 0.0,
            pitch: 0.5,
            sensitivity: 0.005,
            zoom_sensitivity: 1.0,
            damping: 0.05,
            min_radius: 1.0,
            max_radius: 400.0,
            min_pitch: -std::f32::consts::FRAC_PI_2 + 0.1,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.1,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
        }
    }
}

impl OrbitCamera {
    /// Create an orbit whose camera sits at `position` looking at `focus`.
    pub fn from_position(position: Vec3, focus: Vec3) -> Self {
        let mut orbit = Self {
            focus,
            ..default()
        };

        let dir = position - focus;
        orbit.radius = dir.length().clamp(orbit.min_radius, orbit.max_radius);

        if dir.length() > 0.0 {
            let dir_norm = dir.normalize();
            orbit.pitch = dir_norm.y.asin().clamp(orbit.min_pitch, orbit.max_pitch);
            orbit.yaw = dir_norm.x.atan2(dir_norm.z);
        }

        orbit
    }

    /// Follow the translation of `target`.
    pub fn with_target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    /// Calculate the camera position from current orbit parameters.
    pub fn calculate_position(&self) -> Vec3 {
        let x = self.radius * self.pitch.cos() * self.yaw.sin();
        let y = self.radius * self.pitch.sin();
        let z = self.radius * self.pitch.cos() * self.yaw.cos();
        self.focus + Vec3::new(x, y, z)
    }

    /// Apply the current angular velocity, then let it decay.
    pub fn integrate(&mut self) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(self.min_pitch, self.max_pitch);

        // Without damping the whole drag is applied at once.
        let keep = if self.damping > 0.0 {
            (1.0 - self.damping).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.yaw_velocity *= keep;
        self.pitch_velocity *= keep;
    }
}

/// System to handle orbit camera input.
pub fn orbit_camera_input(
    mut cameras: Query<&mut OrbitCamera>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    mut scroll: MessageReader<MouseWheel>,
) {
    let Ok(mut orbit) = cameras.single_mut() else {
        motion.clear();
        scroll.clear();
        return;
    };

    // Damped velocity sums back to the full drag angle over the following frames.
    let gain = if orbit.damping > 0.0 { orbit.damping } else { 1.0 };
    if mouse.pressed(MouseButton::Left) || mouse.pressed(MouseButton::Right) {
        for ev in motion.read() {
            orbit.yaw_velocity -= ev.delta.x * orbit.sensitivity * gain;
            orbit.pitch_velocity += ev.delta.y * orbit.sensitivity * gain;
        }
    } else {
        motion.clear();
    }

    // Handle zoom (scroll wheel)
    for ev in scroll.read() {
        orbit.radius -= ev.y * orbit.zoom_sensitivity;
        orbit.radius = orbit.radius.clamp(orbit.min_radius, orbit.max_radius);
    }
}

/// System to move the focus onto the target and update the camera transform.
///
/// Only reads the target's transform.
pub fn update_orbit_cameras(
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
    targets: Query<&Transform, Without<OrbitCamera>>,
) {
    for (mut orbit, mut transform) in &mut cameras {
        if let Some(target) = orbit.target {
            if let Ok(target_transform) = targets.get(target) {
                orbit.focus = target_transform.translation;
            }
        }

        orbit.integrate();

        transform.translation = orbit.calculate_position();
        transform.look_at(orbit.focus, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position_round_trips() {
        let position = Vec3::new(12.0, 15.0, 12.0);
        let orbit = OrbitCamera::from_position(position, Vec3::ZERO);
        assert!((orbit.calculate_position() - position).length() < 1e-3);
    }

    #[test]
    fn test_velocity_decays() {
        let mut orbit = OrbitCamera {
            yaw_velocity: 1.0,
            damping: 0.5,
            ..default()
        };
        orbit.integrate();
        assert!((orbit.yaw - 1.0).abs() < 1e-6);
        assert!((orbit.yaw_velocity - 0.5).abs() < 1e-6);
        orbit.integrate();
        assert!((orbit.yaw - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut orbit = OrbitCamera {
            pitch_velocity: 10.0,
            ..default()
        };
        orbit.integrate();
        assert!(orbit.pitch <= orbit.max_pitch);
    }

    #[test]
    fn test_focus_follows_target() {
        let mut app = App::new();
        app.add_systems(Update, update_orbit_cameras);

        let target = app
            .world_mut()
            .spawn(Transform::from_xyz(3.0, 0.0, -2.0))
            .id();
        let camera = app
            .world_mut()
            .spawn((
                OrbitCamera::from_position(Vec3::new(12.0, 15.0, 12.0), Vec3::ZERO)
                    .with_target(target),
                Transform::default(),
            ))
            .id();

        app.update();

        let orbit = app.world().get::<OrbitCamera>(camera).unwrap();
        assert_eq!(orbit.focus, Vec3::new(3.0, 0.0, -2.0));
        // The camera never writes the target.
        let target_transform = app.world().get::<Transform>(target).unwrap();
        assert_eq!(target_transform.translation, Vec3::new(3.0, 0.0, -2.0));
    }
}
