//! Waypoint domain — trigger volumes с определением направления прохода
//!
//! Содержит:
//! - Waypoint, WaypointCrossing (components)
//! - WaypointTrigger, WaypointCrossed (events)
//! - Rapier → trigger → crossing системы

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

pub mod components;
pub mod events;
pub mod systems;

#[cfg(test)]
mod systems_tests;

pub use components::*;
pub use events::*;
pub use systems::{spawn_waypoint, validate_waypoint};

/// Системный набор waypoint'ов (path читает WaypointCrossed после него)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct WaypointSet;

pub struct WaypointPlugin;

impl Plugin for WaypointPlugin {
    fn build(&self, app: &mut App) {
        // CollisionEvent регистрирует RapierPhysicsPlugin; headless без rapier — регистрируем сами
        app.add_event::<CollisionEvent>()
            .add_event::<WaypointTrigger>()
            .add_event::<WaypointCrossed>()
            .register_type::<Waypoint>()
            .register_type::<WaypointCrossing>();

        app.add_systems(
            Update,
            (
                systems::validate_new_waypoints,
                systems::collect_waypoint_triggers,
                systems::process_waypoint_triggers,
            )
                .chain()
                .in_set(WaypointSet),
        );
    }
}
