use bevy::prelude::*;
use waypath_simulation::{MovementInput, Player};

use crate::camera::OrbitCamera;

pub struct PlayerControlsPlugin;

impl Plugin for PlayerControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, keyboard_movement);
    }
}

/// WASD → MovementInput (относительно yaw камеры)
fn keyboard_movement(
    keys: Res<ButtonInput<KeyCode>>,
    cameras: Query<&Transform, With<OrbitCamera>>,
    mut players: Query<&mut MovementInput, With<Player>>,
) {
    let mut local = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        local.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        local.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        local.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        local.x -= 1.0;
    }

    // Плоские forward/right камеры (без pitch)
    let (forward, right) = match cameras.single() {
        Ok(camera) => {
            let forward = Vec3::new(camera.forward().x, 0.0, camera.forward().z).normalize_or_zero();
            let right = Vec3::new(camera.right().x, 0.0, camera.right().z).normalize_or_zero();
            (forward, right)
        }
        Err(_) => (Vec3::NEG_Z, Vec3::X),
    };

    let direction = (forward * local.y + right * local.x).normalize_or_zero();

    for mut input in players.iter_mut() {
        if input.direction != direction {
            input.direction = direction;
        }
    }
}
