//! Indicator systems
//!
//! Порядок (PostUpdate, после TransformPropagate, chain):
//! 1. apply_indicator_commands — SetTarget/RemoveTarget
//! 2. emit_camera_moved — CameraMoved для сдвинувшихся камер
//! 3. refresh_indicators_on_camera_moved — сглаженный пересчёт placement

use bevy::prelude::*;

use super::components::{FrameTiming, IndicatorVisual, WaypointIndicator};
use super::events::IndicatorCommand;
use crate::camera::{CameraMoved, CameraView, PlayerCamera};
use crate::config::IndicatorConfig;
use crate::logger;

/// Система: обработка IndicatorCommand
///
/// SetTarget сразу ставит indicator в raw позицию (если камера и target на месте).
pub fn apply_indicator_commands(
    mut events: EventReader<IndicatorCommand>,
    mut indicators: Query<(&mut WaypointIndicator, &mut IndicatorVisual)>,
    cameras: Query<(&PlayerCamera, &GlobalTransform)>,
    targets: Query<&GlobalTransform>,
    time: Res<Time>,
) {
    for command in events.read() {
        match *command {
            IndicatorCommand::SetTarget { indicator, target } => {
                let Ok((mut state, mut visual)) = indicators.get_mut(indicator) else {
                    logger::log_warning(&format!("IndicatorCommand: indicator {:?} not found", indicator));
                    continue;
                };
                state.set_target(target, &mut visual);

                let (Ok((lens, camera_transform)), Ok(target_transform)) =
                    (cameras.get(state.camera), targets.get(target))
                else {
                    continue;
                };
                let view = CameraView::new(lens, camera_transform);
                state.refresh(
                    &view,
                    target_transform.translation(),
                    FrameTiming::from_time(&time),
                    false,
                    &mut visual,
                );
            }
            IndicatorCommand::RemoveTarget { indicator } => {
                if let Ok((mut state, mut visual)) = indicators.get_mut(indicator) {
                    state.remove_target(&mut visual);
                }
            }
        }
    }
}

/// Система: пересчёт indicator'ов, чья камера сдвинулась
///
/// Нет target'а / target исчез / камеры нет → no-op.
pub fn refresh_indicators_on_camera_moved(
    mut moved: EventReader<CameraMoved>,
    mut indicators: Query<(&mut WaypointIndicator, &mut IndicatorVisual)>,
    cameras: Query<(&PlayerCamera, &GlobalTransform)>,
    targets: Query<&GlobalTransform>,
    time: Res<Time>,
) {
    let moved_cameras: Vec<Entity> = moved.read().map(|event| event.camera).collect();
    if moved_cameras.is_empty() {
        return;
    }
    let timing = FrameTiming::from_time(&time);

    for (mut state, mut visual) in indicators.iter_mut() {
        if !moved_cameras.contains(&state.camera) {
            continue;
        }
        let Some(target) = state.target() else {
            continue;
        };
        let (Ok((lens, camera_transform)), Ok(target_transform)) =
            (cameras.get(state.camera), targets.get(target))
        else {
            continue;
        };

        let view = CameraView::new(lens, camera_transform);
        let smooth = state.config.smooth;
        state.refresh(&view, target_transform.translation(), timing, smooth, &mut visual);
    }
}

/// Spawn helper: indicator, привязанный к камере
pub fn spawn_indicator(commands: &mut Commands, camera: Entity, config: IndicatorConfig) -> Entity {
    commands
        .spawn((Name::new("WaypointIndicator"), WaypointIndicator::new(camera, config)))
        .id()
}
