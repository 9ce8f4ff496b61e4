//! Player camera — projection service для indicator'а
//!
//! Рендер-камера живёт в client'е; здесь только lens (FOV/aspect/near/far)
//! и world → viewport проекция, чтобы indicator считался headless.
//!
//! Viewport: origin снизу-слева, Y вверх, `[0, 1]²` — видимая область.

use bevy::prelude::*;

use crate::geometry::is_in_front_of;

/// Lens камеры игрока
///
/// Client синхронизирует `aspect` с окном; остальное задаётся при spawn.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerCamera {
    /// Vertical FOV (радианы)
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PlayerCamera {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Event: камера сдвинулась (после transform propagation)
///
/// Аналог "late update": indicator пересчитывается после того,
/// как камера уже заняла финальную позицию за кадр.
#[derive(Event, Debug, Clone, Copy)]
pub struct CameraMoved {
    pub camera: Entity,
}

/// Снимок камеры на текущий кадр
#[derive(Debug, Clone, Copy)]
pub struct CameraView {
    pub position: Vec3,
    pub forward: Vec3,
    pub near: f32,
    pub far: f32,
    view: Mat4,
    projection: Mat4,
}

impl CameraView {
    pub fn new(lens: &PlayerCamera, transform: &GlobalTransform) -> Self {
        Self {
            position: transform.translation(),
            forward: transform.forward().as_vec3(),
            near: lens.near,
            far: lens.far,
            view: transform.compute_matrix().inverse(),
            projection: Mat4::perspective_rh(lens.fov_y, lens.aspect, lens.near, lens.far),
        }
    }

    pub fn is_in_front(&self, point: Vec3) -> bool {
        is_in_front_of(self.position, self.forward, point)
    }

    /// Глубина точки вдоль forward камеры
    pub fn depth(&self, point: Vec3) -> f32 {
        -self.view.transform_point3(point).z
    }

    /// World → viewport; `None` если точка за камерой
    pub fn world_to_viewport(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.projection * self.view * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new((ndc.x + 1.0) * 0.5, (ndc.y + 1.0) * 0.5))
    }

    /// Точка внутри frustum'а?
    pub fn contains(&self, point: Vec3) -> bool {
        let depth = self.depth(point);
        if depth < self.near || depth > self.far {
            return false;
        }
        match self.world_to_viewport(point) {
            Some(v) => (0.0..=1.0).contains(&v.x) && (0.0..=1.0).contains(&v.y),
            None => false,
        }
    }
}

/// Система: CameraMoved для каждой PlayerCamera с изменённым GlobalTransform
pub fn emit_camera_moved(
    cameras: Query<Entity, (With<PlayerCamera>, Changed<GlobalTransform>)>,
    mut moved: EventWriter<CameraMoved>,
) {
    for camera in cameras.iter() {
        moved.write(CameraMoved { camera });
    }
}
