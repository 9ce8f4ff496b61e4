//! Indicator components

use bevy::prelude::*;

use super::layout::{self, ScreenSide};
use crate::camera::CameraView;
use crate::config::IndicatorConfig;
use crate::geometry::signed_yaw_degrees;

/// Какой sprite показывает indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum IndicatorSprite {
    /// Направленная стрелка (target вне экрана)
    Arrow,
    /// Маркер над target'ом (target в кадре)
    #[default]
    OnScreen,
}

/// Что должен показать UI host (client синхронизирует в Node/ImageNode)
///
/// Позиция в canvas units (origin снизу-слева), поворот в градусах против часовой.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct IndicatorVisual {
    pub position: Vec2,
    pub rotation_degrees: f32,
    pub sprite: IndicatorSprite,
    pub visible: bool,
}

/// Тайминг кадра для сглаживания/пульсации
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTiming {
    pub delta_secs: f32,
    pub elapsed_secs: f32,
}

impl FrameTiming {
    pub fn from_time(time: &Time) -> Self {
        Self {
            delta_secs: time.delta_secs(),
            elapsed_secs: time.elapsed_secs(),
        }
    }
}

/// Screen-space indicator, указывающий на текущий target
///
/// Максимум один target. Камера задаётся при spawn (вместо глобальной main camera).
/// Target — слабая ссылка: если entity исчез, обновление просто пропускается.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(IndicatorVisual)]
pub struct WaypointIndicator {
    pub camera: Entity,
    pub config: IndicatorConfig,
    target: Option<Entity>,
    /// Последняя сглаженная позиция (без пульсации)
    smoothed_position: Vec2,
    on_screen: bool,
    pulsing: bool,
    pulse_offset: f32,
}

impl WaypointIndicator {
    pub fn new(camera: Entity, config: IndicatorConfig) -> Self {
        Self {
            camera,
            config,
            target: None,
            smoothed_position: Vec2::ZERO,
            on_screen: false,
            pulsing: false,
            pulse_offset: 0.0,
        }
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn is_target_on_screen(&self) -> bool {
        self.on_screen
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulsing
    }

    pub fn pulse_offset(&self) -> f32 {
        self.pulse_offset
    }

    /// Назначить target и показать visual
    ///
    /// Немедленное (несглаженное) позиционирование делает вызывающая система
    /// через `refresh(.., smooth: false)`, когда известны transforms.
    pub fn set_target(&mut self, target: Entity, visual: &mut IndicatorVisual) {
        self.target = Some(target);
        visual.visible = true;
    }

    pub fn remove_target(&mut self, visual: &mut IndicatorVisual) {
        self.target = None;
        visual.visible = false;
    }

    /// Пересчитать placement для target'а в `target_position`
    pub fn refresh(
        &mut self,
        view: &CameraView,
        target_position: Vec3,
        timing: FrameTiming,
        smooth: bool,
        visual: &mut IndicatorVisual,
    ) {
        let resolution = self.config.resolution();
        let margin = self.config.screen_edges_margin;

        let viewport = if view.is_in_front(target_position) {
            view.world_to_viewport(target_position)
        } else {
            None
        };

        // Target за камерой: прижимаем к левому/правому краю
        let Some(viewport) = viewport else {
            let yaw = signed_yaw_degrees(view.forward, target_position - view.position, Vec3::Y);
            let (position, rotation) = layout::pinned_placement(ScreenSide::from_yaw(yaw), resolution, margin);
            visual.sprite = IndicatorSprite::Arrow;
            visual.position = position;
            visual.rotation_degrees = rotation;
            return;
        };

        visual.sprite = IndicatorSprite::OnScreen;
        let mut point = layout::canvas_point(viewport, resolution);

        self.on_screen = view.contains(target_position);
        if self.on_screen {
            visual.rotation_degrees = 0.0;
            self.pulsing = true;
        } else {
            visual.sprite = IndicatorSprite::Arrow;
            if self.config.clamp_position {
                point = layout::clamp_to_margin(point, resolution, margin);
            }
            if self.config.rotate_arrow {
                visual.rotation_degrees = layout::arrow_rotation(point, resolution, self.config.rotation_offset);
            }
            self.pulsing = false;
        }

        let base = if smooth {
            layout::smooth_towards(
                self.smoothed_position,
                visual.position,
                point,
                self.config.smooth_strength,
                timing.delta_secs,
            )
        } else {
            point
        };
        self.smoothed_position = base;

        self.pulse_offset = if self.pulsing && self.config.pulsing_enabled {
            layout::pulse_offset(timing.elapsed_secs, self.config.pulsing_speed, self.config.pulsing_distance)
        } else {
            0.0
        };
        visual.position = base + Vec2::new(0.0, self.pulse_offset);
    }
}
