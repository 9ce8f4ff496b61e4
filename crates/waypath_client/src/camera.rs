use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use waypath_simulation::{Player, PlayerCamera};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (orbit_camera_controls, follow_player, sync_camera_lens).chain(),
        );
    }
}

/// Third-person камера, вращается вокруг игрока
#[derive(Component)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,   // Horizontal rotation (radians)
    pub pitch: f32, // Vertical rotation (radians)
    pub sensitivity: f32,
    pub zoom_speed: f32,
    /// Высота точки фокуса над игроком
    pub focus_height: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 8.0,
            yaw: 0.0,
            pitch: std::f32::consts::FRAC_PI_8,
            sensitivity: 0.005,
            zoom_speed: 1.0,
            focus_height: 1.5,
        }
    }
}

/// Handle mouse input for orbit camera
fn orbit_camera_controls(
    mut query: Query<&mut OrbitCamera>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    let mut camera = match query.single_mut() {
        Ok(cam) => cam,
        Err(_) => return,
    };

    // Right mouse button: orbit
    if mouse_buttons.pressed(MouseButton::Right) {
        for motion in mouse_motion.read() {
            camera.yaw -= motion.delta.x * camera.sensitivity;
            camera.pitch -= motion.delta.y * camera.sensitivity;

            // Clamp pitch to avoid gimbal lock
            camera.pitch = camera.pitch.clamp(-0.2, std::f32::consts::FRAC_PI_2 - 0.1);
        }
    } else {
        // Consume motion events even when not orbiting
        mouse_motion.clear();
    }

    // Mouse wheel: zoom
    for wheel in mouse_wheel.read() {
        camera.distance -= wheel.y * camera.zoom_speed;
        camera.distance = camera.distance.clamp(3.0, 30.0);
    }
}

/// Фокус на игроке + позиция по сферическим координатам
fn follow_player(
    player: Query<&Transform, (With<Player>, Without<OrbitCamera>)>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };

    for (mut camera, mut transform) in cameras.iter_mut() {
        camera.focus = player_transform.translation + Vec3::Y * camera.focus_height;

        let x = camera.distance * camera.pitch.cos() * camera.yaw.sin();
        let y = camera.distance * camera.pitch.sin();
        let z = camera.distance * camera.pitch.cos() * camera.yaw.cos();

        let target = Transform::from_translation(camera.focus + Vec3::new(x, y, z)).looking_at(camera.focus, Vec3::Y);
        // set_if_neq: CameraMoved только при реальном движении
        transform.set_if_neq(target);
    }
}

/// Projection + размер окна → lens для indicator'а
fn sync_camera_lens(
    windows: Query<&Window>,
    mut cameras: Query<(&Projection, &mut PlayerCamera)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if window.height() <= 0.0 {
        return;
    }
    let aspect = window.width() / window.height();

    for (projection, mut lens) in cameras.iter_mut() {
        let Projection::Perspective(perspective) = projection else {
            continue;
        };
        if lens.aspect != aspect || lens.fov_y != perspective.fov {
            lens.aspect = aspect;
            lens.fov_y = perspective.fov;
            lens.near = perspective.near;
            lens.far = perspective.far;
        }
    }
}
