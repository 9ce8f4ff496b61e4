//! Path events

use bevy::prelude::*;

/// Event: игрок прошёл весь путь (путь деактивирован)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathFinished {
    pub path: Entity,
}
