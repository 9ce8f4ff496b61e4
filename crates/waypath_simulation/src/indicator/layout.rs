//! Canvas layout math для indicator'а
//!
//! Canvas: reference resolution (по умолчанию 1920×1080), origin снизу-слева,
//! Y вверх. Углы в градусах, положительные — против часовой.

use bevy::prelude::*;

/// Сторона экрана для target'а за камерой
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ScreenSide {
    Left,
    Right,
}

impl ScreenSide {
    /// Положительный yaw (target слева от forward) → Left
    pub fn from_yaw(yaw_degrees: f32) -> Self {
        if yaw_degrees > 0.0 {
            ScreenSide::Left
        } else {
            ScreenSide::Right
        }
    }
}

/// Viewport `[0, 1]²` → canvas
pub fn canvas_point(viewport: Vec2, resolution: Vec2) -> Vec2 {
    viewport * resolution
}

/// Прижимает точку к рамке `margin` от краёв canvas
pub fn clamp_to_margin(point: Vec2, resolution: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        point.x.clamp(margin, resolution.x - margin),
        point.y.clamp(margin, resolution.y - margin),
    )
}

/// Поворот arrow: от центра canvas к точке + offset
///
/// Точка ровно в центре даёт угол 0 (+ offset).
pub fn arrow_rotation(point: Vec2, resolution: Vec2, offset_degrees: f32) -> f32 {
    let direction = (point - resolution * 0.5).normalize_or_zero();
    direction.y.atan2(direction.x).to_degrees() + offset_degrees
}

/// Фиксированная позиция у левого/правого края (target за камерой)
///
/// Возвращает (позиция, поворот): Left → -90°, Right → +90°.
pub fn pinned_placement(side: ScreenSide, resolution: Vec2, margin: f32) -> (Vec2, f32) {
    match side {
        ScreenSide::Left => (Vec2::new(margin, resolution.y * 0.5), -90.0),
        ScreenSide::Right => (Vec2::new(resolution.x - margin, resolution.y * 0.5), 90.0),
    }
}

/// Вертикальная пульсация (cos wave)
pub fn pulse_offset(elapsed_secs: f32, speed: f32, distance: f32) -> f32 {
    (elapsed_secs * speed).cos() * distance
}

/// Lerp к новой точке со strength × delta
///
/// `previous == ZERO` — сглаживание ещё не стартовало, берём текущую
/// отображаемую позицию.
pub fn smooth_towards(previous: Vec2, displayed: Vec2, point: Vec2, strength: f32, delta_secs: f32) -> Vec2 {
    let from = if previous == Vec2::ZERO { displayed } else { previous };
    from.lerp(point, (strength * delta_secs).clamp(0.0, 1.0))
}
