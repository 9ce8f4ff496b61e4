//! Headless прогон waypath
//!
//! Rapier sensors + 3 waypoint'а + игрок, идущий по -Z.
//! Печатает проходы waypoint'ов и завершение пути.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::*;
use waypath_simulation::*;

const MAX_TICKS: usize = 1200;

#[derive(Resource, Default)]
struct PathDone(bool);

fn report_crossings(mut crossed: EventReader<WaypointCrossed>) {
    for event in crossed.read() {
        log_info(&format!("Crossed waypoint {:?}: {:?}", event.waypoint, event.direction));
    }
}

fn report_finish(mut finished: EventReader<PathFinished>, mut done: ResMut<PathDone>) {
    for event in finished.read() {
        log_info(&format!("Path {:?} finished", event.path));
        done.0 = true;
    }
}

fn setup_scene(mut commands: Commands) {
    let camera = commands
        .spawn((
            Name::new("PlayerCamera"),
            PlayerCamera::default(),
            Transform::from_xyz(0.0, 3.0, 8.0).looking_at(Vec3::new(0.0, 0.0, -10.0), Vec3::Y),
        ))
        .id();
    let indicator = spawn_indicator(&mut commands, camera, IndicatorConfig::default());

    let waypoints: Vec<Entity> = [-5.0, -15.0, -25.0]
        .into_iter()
        .map(|z| {
            spawn_waypoint(
                &mut commands,
                Transform::from_xyz(0.0, 1.0, z),
                Vec3::new(3.0, 2.0, 0.5),
                1.5,
            )
        })
        .collect();
    spawn_path(&mut commands, waypoints, indicator);

    let player = spawn_player(&mut commands, Vec3::new(0.0, 1.0, 0.0));
    commands.entity(player).insert(MovementInput { direction: Vec3::NEG_Z });
}

fn main() {
    let mut app = create_headless_app();
    log_info("Starting waypath headless simulation");

    app.add_plugins((SimulationPlugin, RapierPhysicsPlugin::<NoUserData>::default()))
        // Один update = один fixed шаг
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .init_resource::<PathDone>()
        .add_systems(Startup, setup_scene)
        .add_systems(Last, (report_crossings, report_finish));

    for tick in 0..MAX_TICKS {
        app.update();

        if tick % 60 == 0 {
            let mut players = app.world_mut().query_filtered::<&Transform, With<Player>>();
            if let Some(transform) = players.iter(app.world()).next() {
                log(&format!("Tick {}: player z = {:.2}", tick, transform.translation.z));
            }
        }

        if app.world().resource::<PathDone>().0 {
            log_info(&format!("Simulation complete at tick {}", tick));
            return;
        }
    }

    log_warning("Simulation stopped before the path was finished");
}
