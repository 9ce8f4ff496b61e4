//! Indicator events

use bevy::prelude::*;

/// Команда indicator'у (адресная — по entity indicator'а)
///
/// Генерируется: path systems/observers.
/// Обрабатывается: apply_indicator_commands.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorCommand {
    /// Назначить target и сразу поставить indicator без сглаживания
    SetTarget { indicator: Entity, target: Entity },
    /// Снять target и спрятать visual
    RemoveTarget { indicator: Entity },
}
