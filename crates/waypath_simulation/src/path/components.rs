//! Path components: упорядоченный список waypoint'ов + курсор

use bevy::prelude::*;

/// Какой anchor waypoint'а становится target'ом indicator'а
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AnchorSide {
    Front,
    Back,
}

/// Результат перехода курсора
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// Indicator → anchor waypoint'а с индексом `index`
    Retarget { index: usize, side: AnchorSide },
    /// Игрок прошёл последний waypoint
    Finished,
}

/// Путь из waypoint'ов
///
/// Инвариант: 0 ≤ cursor ≤ len - 1 (для непустого пути).
/// Indicator — явная зависимость (entity), не глобальный singleton.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WaypointPath {
    waypoints: Vec<Entity>,
    cursor: usize,
    pub indicator: Entity,
}

/// Marker: путь активен и слушает свои waypoint'ы
///
/// Добавление → cursor = 0 и indicator на первый waypoint.
/// Удаление (или despawn) → indicator теряет target.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PathActive;

impl WaypointPath {
    pub fn new(waypoints: Vec<Entity>, indicator: Entity) -> Self {
        Self {
            waypoints,
            cursor: 0,
            indicator,
        }
    }

    pub fn waypoints(&self) -> &[Entity] {
        &self.waypoints
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn contains(&self, waypoint: Entity) -> bool {
        self.waypoints.contains(&waypoint)
    }

    pub fn waypoint(&self, index: usize) -> Option<Entity> {
        self.waypoints.get(index).copied()
    }

    /// Активация: курсор в начало, target — front первого waypoint'а
    pub fn reset(&mut self) -> Option<PathStep> {
        self.cursor = 0;
        if self.is_empty() {
            return None;
        }
        Some(PathStep::Retarget {
            index: 0,
            side: AnchorSide::Front,
        })
    }

    /// Игрок прошёл waypoint насквозь
    ///
    /// На последнем waypoint'е → Finished (курсор остаётся на last).
    pub fn advance(&mut self) -> Option<PathStep> {
        let last = self.len().checked_sub(1)?;
        if self.cursor >= last {
            self.cursor = last;
            return Some(PathStep::Finished);
        }

        self.cursor += 1;
        Some(PathStep::Retarget {
            index: self.cursor,
            side: AnchorSide::Front,
        })
    }

    /// Игрок вернулся назад через waypoint
    ///
    /// На нулевом — front первого, иначе back текущего.
    pub fn retreat(&mut self) -> Option<PathStep> {
        let last = self.len().checked_sub(1)?;
        self.cursor = self.cursor.saturating_sub(1).min(last);

        let side = if self.cursor == 0 {
            AnchorSide::Front
        } else {
            AnchorSide::Back
        };
        Some(PathStep::Retarget {
            index: self.cursor,
            side,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(len: usize) -> WaypointPath {
        let waypoints = (0..len as u32).map(Entity::from_raw).collect();
        WaypointPath::new(waypoints, Entity::PLACEHOLDER)
    }

    #[test]
    fn test_reset_targets_first_front() {
        let mut path = path(3);
        path.advance();
        assert_eq!(path.cursor(), 1);

        assert_eq!(
            path.reset(),
            Some(PathStep::Retarget {
                index: 0,
                side: AnchorSide::Front
            })
        );
        assert_eq!(path.cursor(), 0);
    }

    #[test]
    fn test_advance_then_retreat() {
        let mut path = path(3);

        assert_eq!(
            path.advance(),
            Some(PathStep::Retarget {
                index: 1,
                side: AnchorSide::Front
            })
        );
        assert_eq!(
            path.advance(),
            Some(PathStep::Retarget {
                index: 2,
                side: AnchorSide::Front
            })
        );
        assert_eq!(
            path.retreat(),
            Some(PathStep::Retarget {
                index: 1,
                side: AnchorSide::Back
            })
        );
        assert_eq!(
            path.retreat(),
            Some(PathStep::Retarget {
                index: 0,
                side: AnchorSide::Front
            })
        );
    }

    #[test]
    fn test_retreat_at_start_stays_on_first_front() {
        let mut path = path(3);

        assert_eq!(
            path.retreat(),
            Some(PathStep::Retarget {
                index: 0,
                side: AnchorSide::Front
            })
        );
        assert_eq!(path.cursor(), 0);
    }

    #[test]
    fn test_advance_past_last_finishes() {
        let mut path = path(2);

        path.advance();
        assert_eq!(path.cursor(), 1);
        assert_eq!(path.advance(), Some(PathStep::Finished));
        assert_eq!(path.cursor(), 1);
    }

    #[test]
    fn test_single_waypoint_finishes_immediately() {
        let mut path = path(1);
        assert_eq!(path.advance(), Some(PathStep::Finished));
        assert_eq!(path.cursor(), 0);
    }

    #[test]
    fn test_empty_path_has_no_steps() {
        let mut path = path(0);
        assert_eq!(path.reset(), None);
        assert_eq!(path.advance(), None);
        assert_eq!(path.retreat(), None);
        assert_eq!(path.cursor(), 0);
    }

    #[test]
    fn test_cursor_stays_in_bounds_for_any_sequence() {
        let len = 4;
        let mut path = path(len);

        // Детерминированная "случайная" последовательность шагов
        let mut state: u32 = 0x9E37_79B9;
        for _ in 0..500 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;

            if state % 3 == 0 {
                path.retreat();
            } else {
                path.advance();
            }
            assert!(path.cursor() < len, "cursor {} out of bounds", path.cursor());
        }
    }
}
