//! Геометрия front/behind и left/right
//!
//! Bevy: right-handed, Y-up, `forward()` = -Z.

use bevy::prelude::*;

/// Точка перед frame'ом (origin + forward)?
///
/// Граница (dot == 0) — НЕ впереди.
pub fn is_in_front_of(origin: Vec3, forward: Vec3, point: Vec3) -> bool {
    (point - origin).dot(forward) > 0.0
}

/// Signed angle вокруг up-оси от `forward` к `direction` (градусы)
///
/// Положительный — `direction` слева (против часовой, если смотреть сверху).
pub fn signed_yaw_degrees(forward: Vec3, direction: Vec3, up: Vec3) -> f32 {
    let sin = forward.cross(direction).dot(up);
    let cos = forward.dot(direction);
    sin.atan2(cos).to_degrees()
}
