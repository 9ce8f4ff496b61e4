//! Player — marker + простая kinematic локомоция
//!
//! Архитектура:
//! - Rapier для trigger'ов (RigidBody::KinematicPositionBased + capsule)
//! - Velocity интегрируем сами, напрямую в Transform
//! - Waypoint'ы реагируют только на entity с `Player`

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Marker component для player-controlled entity
///
/// Waypoint trigger'ы фильтруют actor'ов по этому компоненту.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Параметры движения игрока
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerMotor {
    /// Скорость движения (m/s)
    pub move_speed: f32,
}

impl Default for PlayerMotor {
    fn default() -> Self {
        Self { move_speed: 5.0 }
    }
}

/// Входные данные для движения
///
/// Headless — заполняется скриптом, client — из клавиатуры.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    /// Направление движения в world space (нормализуется при применении)
    pub direction: Vec3,
}

/// Система: input → translation
///
/// Работает в FixedUpdate, до rapier sync.
pub fn apply_player_movement(
    mut query: Query<(&PlayerMotor, &MovementInput, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (motor, input, mut transform) in query.iter_mut() {
        if input.direction.length_squared() > 0.01 {
            let direction = input.direction.normalize();
            transform.translation += direction * motor.move_speed * delta;
        }
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, apply_player_movement);
    }
}

/// Spawn helper: игрок с kinematic capsule
///
/// KINEMATIC_STATIC нужен, чтобы sensor'ы waypoint'ов (fixed) видели kinematic тело.
pub fn spawn_player(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            Name::new("Player"),
            Transform::from_translation(position),
            Player,
            PlayerMotor::default(),
            MovementInput::default(),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.4), // Высота 1.8m, радиус 0.4m
            ActiveEvents::COLLISION_EVENTS,
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
        ))
        .id()
}
