//! Path domain — последовательность waypoint'ов, управляющая indicator'ом
//!
//! Содержит:
//! - WaypointPath, PathActive (components)
//! - PathFinished (event)
//! - Lifecycle observers (activate/deactivate) + курсор по WaypointCrossed

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

pub use components::{AnchorSide, PathActive, PathStep, WaypointPath};
pub use events::PathFinished;
pub use systems::{spawn_path, validate_path};

use crate::waypoint::WaypointSet;

pub struct PathPlugin;

impl Plugin for PathPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PathFinished>()
            .register_type::<WaypointPath>()
            .register_type::<PathActive>();

        app.add_observer(systems::on_path_activated)
            .add_observer(systems::on_path_deactivated);

        app.add_systems(
            Update,
            (systems::validate_new_paths, systems::follow_waypoint_crossings)
                .chain()
                .after(WaypointSet),
        );
    }
}
