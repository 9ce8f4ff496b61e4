//! Waypath Simulation Core
//!
//! Waypoint trigger'ы, screen-space indicator и path controller на Bevy ECS 0.16.
//!
//! Поток данных:
//! Rapier CollisionEvent → WaypointTrigger → WaypointCrossed → WaypointPath
//! → IndicatorCommand → WaypointIndicator → IndicatorVisual (client рисует UI)

use bevy::prelude::*;

// Публичные модули
pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod indicator;
pub mod logger;
pub mod path;
pub mod player;
pub mod waypoint;

// Re-export базовых типов для удобства
pub use camera::{CameraMoved, CameraView, PlayerCamera};
pub use config::IndicatorConfig;
pub use error::{WaypathError, WaypathResult};
pub use indicator::{
    spawn_indicator, IndicatorCommand, IndicatorPlugin, IndicatorSet, IndicatorSprite, IndicatorVisual,
    WaypointIndicator,
};
pub use logger::{log, log_error, log_info, log_warning};
pub use path::{spawn_path, PathActive, PathFinished, PathPlugin, WaypointPath};
pub use player::{spawn_player, MovementInput, Player, PlayerMotor, PlayerPlugin};
pub use waypoint::{
    spawn_waypoint, CrossingDirection, TriggerPhase, Waypoint, WaypointCrossed, WaypointCrossing,
    WaypointPlugin, WaypointSet, WaypointTrigger,
};

/// Главный plugin (объединяет все подсистемы)
///
/// Rapier не включён: host добавляет RapierPhysicsPlugin сам (client/headless binary).
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для локомоции
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins((PlayerPlugin, WaypointPlugin, PathPlugin, IndicatorPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции (без рендера и окна)
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins((MinimalPlugins, bevy::transform::TransformPlugin))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}
