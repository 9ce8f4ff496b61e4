//! Waypoint systems
//!
//! Порядок (Update, chain):
//! 1. collect_waypoint_triggers — Rapier CollisionEvent → WaypointTrigger
//! 2. process_waypoint_triggers — classification + state machine → WaypointCrossed

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Waypoint, WaypointCrossing};
use super::events::{TriggerPhase, WaypointCrossed, WaypointTrigger};
use crate::error::WaypathError;
use crate::geometry::is_in_front_of;
use crate::logger;
use crate::player::Player;

/// Система: Rapier sensor события → WaypointTrigger
///
/// Пара (waypoint, player) может прийти в любом порядке collider'ов.
pub fn collect_waypoint_triggers(
    mut collisions: EventReader<CollisionEvent>,
    waypoints: Query<(), With<Waypoint>>,
    players: Query<(), With<Player>>,
    mut triggers: EventWriter<WaypointTrigger>,
) {
    for event in collisions.read() {
        let (a, b, phase) = match event {
            CollisionEvent::Started(a, b, _) => (*a, *b, TriggerPhase::Enter),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, TriggerPhase::Exit),
        };

        let pair = if waypoints.contains(a) && players.contains(b) {
            Some((a, b))
        } else if waypoints.contains(b) && players.contains(a) {
            Some((b, a))
        } else {
            None
        };

        if let Some((waypoint, actor)) = pair {
            triggers.write(WaypointTrigger { waypoint, actor, phase });
        }
    }
}

/// Система: enter/exit → crossing state machine
///
/// Actor'ы без `Player` игнорируются. Exit всегда сбрасывает состояние.
pub fn process_waypoint_triggers(
    mut triggers: EventReader<WaypointTrigger>,
    mut waypoints: Query<(&GlobalTransform, &mut WaypointCrossing), With<Waypoint>>,
    actors: Query<&GlobalTransform, With<Player>>,
    mut crossed: EventWriter<WaypointCrossed>,
) {
    for trigger in triggers.read() {
        let Ok(actor_transform) = actors.get(trigger.actor) else {
            continue;
        };
        let Ok((waypoint_transform, mut crossing)) = waypoints.get_mut(trigger.waypoint) else {
            logger::log_warning(&format!(
                "WaypointTrigger: waypoint {:?} not found",
                trigger.waypoint
            ));
            continue;
        };

        let ahead = is_in_front_of(
            waypoint_transform.translation(),
            waypoint_transform.forward().as_vec3(),
            actor_transform.translation(),
        );
        logger::log(&format!(
            "Waypoint {:?}: player {:?} is {} ({:?})",
            trigger.waypoint,
            trigger.actor,
            if ahead { "in front" } else { "not in front" },
            trigger.phase
        ));

        match trigger.phase {
            TriggerPhase::Enter => crossing.enter(ahead),
            TriggerPhase::Exit => {
                if let Some(direction) = crossing.exit(ahead) {
                    crossed.write(WaypointCrossed {
                        waypoint: trigger.waypoint,
                        actor: trigger.actor,
                        direction,
                    });
                }
            }
        }
    }
}

/// Проверка одного waypoint'а (sensor + anchors)
pub fn validate_waypoint(
    entity: Entity,
    waypoint: &Waypoint,
    is_sensor: bool,
    anchor_exists: impl Fn(Entity) -> bool,
) -> Vec<WaypathError> {
    let mut errors = Vec::new();

    if !is_sensor {
        errors.push(WaypathError::NotASensor(entity));
    }
    for (anchor, anchor_entity) in [("front", waypoint.front_point), ("back", waypoint.back_point)] {
        if !anchor_exists(anchor_entity) {
            errors.push(WaypathError::MissingAnchor {
                waypoint: entity,
                anchor,
                entity: anchor_entity,
            });
        }
    }

    errors
}

/// Система: валидация новых waypoint'ов (аналог editor-time проверок)
pub fn validate_new_waypoints(
    waypoints: Query<(Entity, &Waypoint, Has<Sensor>), Added<Waypoint>>,
    anchors: Query<(), With<GlobalTransform>>,
) {
    for (entity, waypoint, is_sensor) in waypoints.iter() {
        for error in validate_waypoint(entity, waypoint, is_sensor, |anchor| anchors.contains(anchor)) {
            logger::log_error(&error.to_string());
        }
    }
}

/// Spawn helper: sensor volume + front/back anchors
///
/// `transform.forward()` задаёт сторону "впереди"; anchors ставятся на
/// `anchor_distance` вперёд/назад от центра.
pub fn spawn_waypoint(
    commands: &mut Commands,
    transform: Transform,
    half_extents: Vec3,
    anchor_distance: f32,
) -> Entity {
    let front_point = commands
        .spawn((
            Name::new("WaypointFront"),
            Transform::from_translation(Vec3::NEG_Z * anchor_distance),
        ))
        .id();
    let back_point = commands
        .spawn((
            Name::new("WaypointBack"),
            Transform::from_translation(Vec3::Z * anchor_distance),
        ))
        .id();

    commands
        .spawn((
            Name::new("Waypoint"),
            transform,
            Waypoint {
                front_point,
                back_point,
            },
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
        ))
        .add_children(&[front_point, back_point])
        .id()
}
