//! Path systems + lifecycle observers
//!
//! Подписка на waypoint'ы = наличие `PathActive`: неактивный путь
//! WaypointCrossed не обрабатывает, а снятие маркера сразу гасит indicator.

use bevy::prelude::*;

use super::components::{AnchorSide, PathActive, PathStep, WaypointPath};
use super::events::PathFinished;
use crate::error::WaypathError;
use crate::indicator::{IndicatorCommand, WaypointIndicator};
use crate::logger;
use crate::waypoint::{CrossingDirection, Waypoint, WaypointCrossed};

/// Anchor entity для шага пути
fn resolve_anchor(
    path: &WaypointPath,
    index: usize,
    side: AnchorSide,
    waypoints: &Query<&Waypoint>,
) -> Option<Entity> {
    let waypoint = waypoints.get(path.waypoint(index)?).ok()?;
    Some(match side {
        AnchorSide::Front => waypoint.front_point,
        AnchorSide::Back => waypoint.back_point,
    })
}

fn retarget(
    path: &WaypointPath,
    index: usize,
    side: AnchorSide,
    waypoints: &Query<&Waypoint>,
    indicator_commands: &mut EventWriter<IndicatorCommand>,
) {
    match resolve_anchor(path, index, side, waypoints) {
        Some(target) => {
            indicator_commands.write(IndicatorCommand::SetTarget {
                indicator: path.indicator,
                target,
            });
        }
        None => logger::log_warning(&format!(
            "Path: waypoint #{} ({:?}) has no {:?} anchor",
            index,
            path.waypoint(index),
            side
        )),
    }
}

/// Observer: путь активирован
pub fn on_path_activated(
    trigger: Trigger<OnAdd, PathActive>,
    mut paths: Query<&mut WaypointPath>,
    waypoints: Query<&Waypoint>,
    mut indicator_commands: EventWriter<IndicatorCommand>,
) {
    let entity = trigger.target();
    let Ok(mut path) = paths.get_mut(entity) else {
        logger::log_warning(&format!("PathActive added to {:?} without WaypointPath", entity));
        return;
    };

    match path.reset() {
        Some(PathStep::Retarget { index, side }) => {
            logger::log(&format!("Path {:?} activated ({} waypoints)", entity, path.len()));
            retarget(&path, index, side, &waypoints, &mut indicator_commands);
        }
        _ => logger::log_warning(&format!("Path {:?} activated with no waypoints", entity)),
    }
}

/// Observer: путь деактивирован или удалён
pub fn on_path_deactivated(
    trigger: Trigger<OnRemove, PathActive>,
    paths: Query<&WaypointPath>,
    mut indicator_commands: EventWriter<IndicatorCommand>,
) {
    let entity = trigger.target();
    if let Ok(path) = paths.get(entity) {
        logger::log(&format!("Path {:?} deactivated", entity));
        indicator_commands.write(IndicatorCommand::RemoveTarget {
            indicator: path.indicator,
        });
    }
}

/// Система: WaypointCrossed → курсор активных путей
pub fn follow_waypoint_crossings(
    mut commands: Commands,
    mut crossed: EventReader<WaypointCrossed>,
    mut paths: Query<(Entity, &mut WaypointPath), With<PathActive>>,
    waypoints: Query<&Waypoint>,
    mut indicator_commands: EventWriter<IndicatorCommand>,
    mut finished: EventWriter<PathFinished>,
) {
    // Деактивация через Commands отложена — не трогаем путь повторно в этом кадре
    let mut finished_now: Vec<Entity> = Vec::new();

    for event in crossed.read() {
        for (entity, mut path) in paths.iter_mut() {
            if finished_now.contains(&entity) || !path.contains(event.waypoint) {
                continue;
            }

            let step = match event.direction {
                CrossingDirection::Through => {
                    logger::log(&format!("Path {:?}: player went through waypoint {:?}", entity, event.waypoint));
                    path.advance()
                }
                CrossingDirection::Returned => {
                    logger::log(&format!("Path {:?}: player returned through waypoint {:?}", entity, event.waypoint));
                    path.retreat()
                }
            };

            match step {
                Some(PathStep::Retarget { index, side }) => {
                    retarget(&path, index, side, &waypoints, &mut indicator_commands);
                }
                Some(PathStep::Finished) => {
                    logger::log_info(&format!("Path {:?} finished", entity));
                    finished.write(PathFinished { path: entity });
                    // on_path_deactivated снимет target с indicator'а
                    commands.entity(entity).remove::<PathActive>();
                    finished_now.push(entity);
                }
                None => {}
            }
        }
    }
}

/// Проверка пути (пустой / чужие entity / нет indicator'а)
pub fn validate_path(
    entity: Entity,
    path: &WaypointPath,
    is_waypoint: impl Fn(Entity) -> bool,
    indicator_exists: bool,
) -> Vec<WaypathError> {
    let mut errors = Vec::new();

    if path.is_empty() {
        errors.push(WaypathError::EmptyPath(entity));
    }
    for &waypoint in path.waypoints() {
        if !is_waypoint(waypoint) {
            errors.push(WaypathError::UnknownWaypoint { path: entity, waypoint });
        }
    }
    if !indicator_exists {
        errors.push(WaypathError::MissingIndicator {
            path: entity,
            indicator: path.indicator,
        });
    }

    errors
}

/// Система: валидация новых путей
pub fn validate_new_paths(
    paths: Query<(Entity, &WaypointPath), Added<WaypointPath>>,
    waypoints: Query<(), With<Waypoint>>,
    indicators: Query<(), With<WaypointIndicator>>,
) {
    for (entity, path) in paths.iter() {
        let indicator_exists = indicators.contains(path.indicator);
        for error in validate_path(entity, path, |waypoint| waypoints.contains(waypoint), indicator_exists) {
            logger::log_error(&error.to_string());
        }
    }
}

/// Spawn helper: активный путь
pub fn spawn_path(commands: &mut Commands, waypoints: Vec<Entity>, indicator: Entity) -> Entity {
    commands
        .spawn((
            Name::new("WaypointPath"),
            WaypointPath::new(waypoints, indicator),
            PathActive,
        ))
        .id()
}
