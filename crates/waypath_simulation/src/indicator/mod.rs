//! Indicator domain — screen-space стрелка/маркер к текущему target'у
//!
//! ECS ответственность:
//! - Target, сглаживание, пульсация (WaypointIndicator)
//! - Placement → IndicatorVisual
//!
//! Client ответственность:
//! - IndicatorVisual → Bevy UI (Node, ImageNode, rotation)

use bevy::prelude::*;
use bevy::transform::TransformSystem;

pub mod components;
pub mod events;
pub mod layout;
pub mod systems;

pub use components::{FrameTiming, IndicatorSprite, IndicatorVisual, WaypointIndicator};
pub use events::IndicatorCommand;
pub use layout::ScreenSide;
pub use systems::spawn_indicator;

use crate::camera::{emit_camera_moved, CameraMoved, PlayerCamera};

/// Системный набор indicator'а (client синхронизирует UI после него)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndicatorSet;

pub struct IndicatorPlugin;

impl Plugin for IndicatorPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<IndicatorCommand>()
            .add_event::<CameraMoved>()
            .register_type::<WaypointIndicator>()
            .register_type::<IndicatorVisual>()
            .register_type::<PlayerCamera>();

        // После propagation: камера уже на финальной позиции за кадр
        app.add_systems(
            PostUpdate,
            (
                systems::apply_indicator_commands,
                emit_camera_moved,
                systems::refresh_indicators_on_camera_moved,
            )
                .chain()
                .in_set(IndicatorSet)
                .after(TransformSystem::TransformPropagate),
        );
    }
}
