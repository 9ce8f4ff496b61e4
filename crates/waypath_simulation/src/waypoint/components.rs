//! Waypoint components: trigger volume + crossing state machine

use bevy::prelude::*;

/// Trigger volume с front/back ориентацией
///
/// Orientation frame = GlobalTransform самого entity (`forward()` = сторона "впереди").
/// Anchors — дочерние entity, на них целится indicator.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(WaypointCrossing)]
pub struct Waypoint {
    pub front_point: Entity,
    pub back_point: Entity,
}

/// С какой стороны игрок вошёл в volume
///
/// Заменяет пару bool-флагов: одновременно "вошёл спереди" и "вошёл сзади"
/// теперь непредставимо. Повторный enter перезаписывает состояние.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum WaypointCrossing {
    #[default]
    Idle,
    /// Вошёл, находясь впереди waypoint'а
    EnteredAhead,
    /// Вошёл, находясь позади (или ровно на плоскости)
    EnteredBehind,
}

/// Направление завершённого прохода
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum CrossingDirection {
    /// Вошёл сзади, вышел впереди
    Through,
    /// Вошёл впереди, вышел сзади
    Returned,
}

impl WaypointCrossing {
    pub fn enter(&mut self, ahead: bool) {
        *self = if ahead {
            WaypointCrossing::EnteredAhead
        } else {
            WaypointCrossing::EnteredBehind
        };
    }

    /// Exit: возвращает направление, если проход завершён; всегда сбрасывает в Idle
    pub fn exit(&mut self, ahead: bool) -> Option<CrossingDirection> {
        let direction = match (*self, ahead) {
            (WaypointCrossing::EnteredBehind, true) => Some(CrossingDirection::Through),
            (WaypointCrossing::EnteredAhead, false) => Some(CrossingDirection::Returned),
            _ => None,
        };
        *self = WaypointCrossing::Idle;
        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behind_to_ahead_is_through() {
        let mut crossing = WaypointCrossing::default();
        crossing.enter(false);
        assert_eq!(crossing, WaypointCrossing::EnteredBehind);

        assert_eq!(crossing.exit(true), Some(CrossingDirection::Through));
        assert_eq!(crossing, WaypointCrossing::Idle);
    }

    #[test]
    fn test_ahead_to_behind_is_returned() {
        let mut crossing = WaypointCrossing::default();
        crossing.enter(true);

        assert_eq!(crossing.exit(false), Some(CrossingDirection::Returned));
        assert_eq!(crossing, WaypointCrossing::Idle);
    }

    #[test]
    fn test_exit_on_same_side_fires_nothing_and_resets() {
        for side in [true, false] {
            let mut crossing = WaypointCrossing::default();
            crossing.enter(side);
            assert_eq!(crossing.exit(side), None);
            assert_eq!(crossing, WaypointCrossing::Idle);
        }
    }

    #[test]
    fn test_exit_without_enter_fires_nothing() {
        let mut crossing = WaypointCrossing::Idle;
        assert_eq!(crossing.exit(true), None);
        assert_eq!(crossing.exit(false), None);
    }

    #[test]
    fn test_reentry_latest_side_wins() {
        let mut crossing = WaypointCrossing::default();
        crossing.enter(false);
        crossing.enter(true);

        // Последний enter был спереди → выход спереди ничего не даёт
        assert_eq!(crossing.exit(true), None);
    }
}
