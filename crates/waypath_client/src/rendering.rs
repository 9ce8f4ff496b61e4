use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use waypath_simulation::{Player, PathActive, Waypoint, WaypointIndicator, WaypointPath};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (spawn_player_visuals, spawn_waypoint_visuals, draw_path_gizmos),
        );
    }
}

/// Link: visual entity → simulation entity
#[derive(Component)]
pub struct VisualOf(pub Entity);

/// Capsule mesh для нового игрока (child, двигается вместе с ним)
fn spawn_player_visuals(
    mut commands: Commands,
    query: Query<Entity, Added<Player>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for player in query.iter() {
        let visual = commands
            .spawn((
                Mesh3d(meshes.add(Capsule3d::new(0.4, 1.0))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.2, 0.4, 0.9),
                    ..default()
                })),
                Transform::default(),
                VisualOf(player),
            ))
            .id();

        commands.entity(player).insert(Visibility::default()).add_child(visual);
    }
}

/// Полупрозрачные ворота по размеру sensor collider'а
fn spawn_waypoint_visuals(
    mut commands: Commands,
    query: Query<(Entity, &Collider), Added<Waypoint>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (waypoint, collider) in query.iter() {
        let Some(cuboid) = collider.as_cuboid() else {
            continue;
        };
        let size = cuboid.half_extents() * 2.0;

        let visual = commands
            .spawn((
                Mesh3d(meshes.add(Cuboid::from_size(size))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgba(0.2, 0.9, 0.6, 0.25),
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                })),
                Transform::default(),
                VisualOf(waypoint),
            ))
            .id();

        commands.entity(waypoint).insert(Visibility::default()).add_child(visual);
    }
}

/// Стрелки между waypoint'ами + anchors; текущий target подсвечен
fn draw_path_gizmos(
    paths: Query<(&WaypointPath, Has<PathActive>)>,
    waypoints: Query<&Waypoint>,
    transforms: Query<&GlobalTransform>,
    indicators: Query<&WaypointIndicator>,
    mut gizmos: Gizmos,
) {
    for (path, active) in paths.iter() {
        let color = if active {
            Color::srgb(0.9, 0.8, 0.2)
        } else {
            Color::srgb(0.5, 0.5, 0.5)
        };

        let positions: Vec<Vec3> = path
            .waypoints()
            .iter()
            .filter_map(|waypoint| transforms.get(*waypoint).ok())
            .map(|transform| transform.translation())
            .collect();

        for pair in positions.windows(2) {
            gizmos.arrow(pair[0], pair[1], color);
        }

        let target = indicators.get(path.indicator).ok().and_then(|indicator| indicator.target());

        for waypoint in path.waypoints() {
            let Ok(waypoint) = waypoints.get(*waypoint) else {
                continue;
            };
            for anchor in [waypoint.front_point, waypoint.back_point] {
                let Ok(transform) = transforms.get(anchor) else {
                    continue;
                };
                let anchor_color = if Some(anchor) == target {
                    Color::srgb(1.0, 0.3, 0.2)
                } else {
                    color
                };
                gizmos.sphere(Isometry3d::from_translation(transform.translation()), 0.2, anchor_color);
            }
        }
    }
}
