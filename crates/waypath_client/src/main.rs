use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use waypath_simulation::{
    logger, spawn_indicator, spawn_path, spawn_player, spawn_waypoint, IndicatorConfig, PlayerCamera, SimulationPlugin,
};

mod camera;
mod controls;
mod indicator_ui;
mod rendering;

use camera::CameraPlugin;
use controls::PlayerControlsPlugin;
use indicator_ui::IndicatorUiPlugin;
use rendering::RenderingSyncPlugin;

const CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/config/indicator.ron");

/// Загруженный на старте конфиг indicator'а
#[derive(Resource)]
struct ClientConfig(IndicatorConfig);

fn main() {
    logger::init_logger();
    logger::set_log_level(logger::LogLevel::Info);

    let config = IndicatorConfig::load_or_default(CONFIG_PATH);

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Waypath".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Physics (sensors → CollisionEvent)
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Simulation (headless ECS logic)
        .add_plugins(SimulationPlugin)
        // Visuals, camera, input, UI
        .add_plugins((RenderingSyncPlugin, CameraPlugin, PlayerControlsPlugin, IndicatorUiPlugin))
        .insert_resource(ClientConfig(config))
        .add_systems(Startup, setup_scene)
        .run();
}

/// Ground, свет, камера, путь из 5 waypoint'ов змейкой, игрок
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ClientConfig>,
) {
    // Ground plane (80x80m)
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(40.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    // Camera: orbit вокруг игрока + lens для indicator'а
    let lens = PlayerCamera::default();
    let camera = commands
        .spawn((
            Name::new("PlayerCamera"),
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: lens.fov_y,
                near: lens.near,
                far: lens.far,
                ..default()
            }),
            lens,
            Transform::from_xyz(0.0, 4.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
            camera::OrbitCamera::default(),
        ))
        .id();

    let indicator = spawn_indicator(&mut commands, camera, config.0.clone());

    // Waypoint'ы смотрят на следующий (forward = направление прохода)
    let positions = [
        Vec3::new(0.0, 1.0, -8.0),
        Vec3::new(6.0, 1.0, -18.0),
        Vec3::new(-4.0, 1.0, -28.0),
        Vec3::new(-12.0, 1.0, -20.0),
        Vec3::new(-16.0, 1.0, -6.0),
    ];
    let waypoints: Vec<Entity> = positions
        .iter()
        .enumerate()
        .map(|(i, position)| {
            let heading = match positions.get(i + 1) {
                Some(next) => *next - *position,
                None => *position - positions[i - 1],
            };
            let transform = Transform::from_translation(*position).looking_to(heading.with_y(0.0), Vec3::Y);
            spawn_waypoint(&mut commands, transform, Vec3::new(2.5, 1.5, 0.3), 2.0)
        })
        .collect();

    spawn_path(&mut commands, waypoints, indicator);
    spawn_player(&mut commands, Vec3::new(0.0, 1.0, 0.0));
}
