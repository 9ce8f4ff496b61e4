//! Waypoint events

use bevy::prelude::*;

use super::components::CrossingDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPhase {
    Enter,
    Exit,
}

/// Event: actor вошёл/вышел из waypoint volume
///
/// Генерируется:
/// - collect_waypoint_triggers (из Rapier CollisionEvent)
/// - тестами/host'ом напрямую
///
/// Обрабатывается: process_waypoint_triggers
#[derive(Event, Debug, Clone, Copy)]
pub struct WaypointTrigger {
    pub waypoint: Entity,
    pub actor: Entity,
    pub phase: TriggerPhase,
}

/// Event: игрок прошёл waypoint насквозь (Through) или вернулся (Returned)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaypointCrossed {
    pub waypoint: Entity,
    pub actor: Entity,
    pub direction: CrossingDirection,
}
