//! Ошибки конфигурации и валидации сцены
//!
//! Runtime-отсутствие target/entity — не ошибка (no-op), сюда попадает только
//! то, что в редакторе ловилось бы как missing reference.

use bevy::prelude::Entity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WaypathError {
    #[error("waypoint {0:?} has a collider that is not a sensor")]
    NotASensor(Entity),

    #[error("waypoint {waypoint:?}: {anchor} anchor {entity:?} has no transform")]
    MissingAnchor {
        waypoint: Entity,
        anchor: &'static str,
        entity: Entity,
    },

    #[error("path {0:?} has no waypoints")]
    EmptyPath(Entity),

    #[error("path {path:?} references {waypoint:?}, which is not a waypoint")]
    UnknownWaypoint { path: Entity, waypoint: Entity },

    #[error("path {path:?} drives indicator {indicator:?}, which does not exist")]
    MissingIndicator { path: Entity, indicator: Entity },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] ron::error::SpannedError),
}

pub type WaypathResult<T> = Result<T, WaypathError>;
