//! Path traversal integration test
//!
//! Полный headless пайплайн: WaypointTrigger → WaypointCrossed → WaypointPath
//! → IndicatorCommand → WaypointIndicator.
//!
//! Проверяем:
//! - Курсор 0→1→0 и retarget indicator'а
//! - Завершение пути (PathFinished + деактивация)
//! - Деактивация/повторная активация

use bevy::prelude::*;
use waypath_simulation::*;

#[derive(Resource, Default)]
struct Finished(Vec<PathFinished>);

fn record_finished(mut events: EventReader<PathFinished>, mut finished: ResMut<Finished>) {
    finished.0.extend(events.read().copied());
}

struct Scene {
    app: App,
    waypoints: Vec<Entity>,
    path: Entity,
    indicator: Entity,
    player: Entity,
}

/// N waypoint'ов вдоль -Z (через каждые 10m), игрок позади первого
fn build_scene(waypoint_count: usize) -> Scene {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin)
        .init_resource::<Finished>()
        .add_systems(Last, record_finished);

    let camera = app
        .world_mut()
        .spawn((PlayerCamera::default(), Transform::from_xyz(0.0, 2.0, 8.0)))
        .id();

    let (waypoints, indicator, path) = {
        let mut commands = app.world_mut().commands();
        let indicator = spawn_indicator(&mut commands, camera, IndicatorConfig::default());
        let waypoints: Vec<Entity> = (0..waypoint_count)
            .map(|i| {
                spawn_waypoint(
                    &mut commands,
                    Transform::from_xyz(0.0, 0.0, -10.0 * i as f32),
                    Vec3::new(3.0, 2.0, 0.5),
                    1.0,
                )
            })
            .collect();
        let path = spawn_path(&mut commands, waypoints.clone(), indicator);
        (waypoints, indicator, path)
    };
    app.world_mut().flush();

    let player = app
        .world_mut()
        .spawn((Player, Transform::from_xyz(0.0, 0.0, 2.0)))
        .id();

    app.update();

    Scene {
        app,
        waypoints,
        path,
        indicator,
        player,
    }
}

impl Scene {
    fn move_player(&mut self, z: f32) {
        self.app
            .world_mut()
            .get_mut::<Transform>(self.player)
            .unwrap()
            .translation = Vec3::new(0.0, 0.0, z);
        self.app.update();
    }

    fn trigger(&mut self, waypoint: usize, phase: TriggerPhase) {
        let event = WaypointTrigger {
            waypoint: self.waypoints[waypoint],
            actor: self.player,
            phase,
        };
        self.app.world_mut().send_event(event);
        self.app.update();
    }

    /// Пройти waypoint насквозь (сзади → вперёд)
    fn walk_through(&mut self, waypoint: usize) {
        let z = -10.0 * waypoint as f32;
        self.move_player(z + 2.0);
        self.trigger(waypoint, TriggerPhase::Enter);
        self.move_player(z - 2.0);
        self.trigger(waypoint, TriggerPhase::Exit);
    }

    /// Вернуться назад через waypoint (впереди → назад)
    fn walk_back(&mut self, waypoint: usize) {
        let z = -10.0 * waypoint as f32;
        self.move_player(z - 2.0);
        self.trigger(waypoint, TriggerPhase::Enter);
        self.move_player(z + 2.0);
        self.trigger(waypoint, TriggerPhase::Exit);
    }

    fn cursor(&self) -> usize {
        self.app.world().get::<WaypointPath>(self.path).unwrap().cursor()
    }

    fn indicator_target(&self) -> Option<Entity> {
        self.app.world().get::<WaypointIndicator>(self.indicator).unwrap().target()
    }

    fn indicator_visible(&self) -> bool {
        self.app.world().get::<IndicatorVisual>(self.indicator).unwrap().visible
    }

    fn front(&self, waypoint: usize) -> Entity {
        self.app.world().get::<Waypoint>(self.waypoints[waypoint]).unwrap().front_point
    }

    fn back(&self, waypoint: usize) -> Entity {
        self.app.world().get::<Waypoint>(self.waypoints[waypoint]).unwrap().back_point
    }

    fn is_active(&self) -> bool {
        self.app.world().get::<PathActive>(self.path).is_some()
    }
}

#[test]
fn test_activation_targets_first_front() {
    let scene = build_scene(3);

    assert_eq!(scene.cursor(), 0);
    assert_eq!(scene.indicator_target(), Some(scene.front(0)));
    assert!(scene.indicator_visible());
}

#[test]
fn test_through_then_return_retargets() {
    let mut scene = build_scene(3);

    scene.walk_through(0);
    assert_eq!(scene.cursor(), 1);
    assert_eq!(scene.indicator_target(), Some(scene.front(1)));

    scene.walk_back(0);
    assert_eq!(scene.cursor(), 0);
    assert_eq!(scene.indicator_target(), Some(scene.front(0)));
}

#[test]
fn test_return_in_middle_targets_back_anchor() {
    let mut scene = build_scene(3);

    scene.walk_through(0);
    scene.walk_through(1);
    assert_eq!(scene.cursor(), 2);

    scene.walk_back(1);
    assert_eq!(scene.cursor(), 1);
    assert_eq!(scene.indicator_target(), Some(scene.back(1)));
}

#[test]
fn test_last_waypoint_finishes_path() {
    let mut scene = build_scene(2);

    scene.walk_through(0);
    assert!(scene.is_active());

    scene.walk_through(1);

    let finished = &scene.app.world().resource::<Finished>().0;
    assert_eq!(finished, &vec![PathFinished { path: scene.path }]);
    assert!(!scene.is_active());
    assert_eq!(scene.cursor(), 1);
    assert_eq!(scene.indicator_target(), None);
    assert!(!scene.indicator_visible());
}

#[test]
fn test_inactive_path_ignores_crossings() {
    let mut scene = build_scene(3);
    let path = scene.path;

    scene.app.world_mut().entity_mut(path).remove::<PathActive>();
    scene.app.update();
    assert_eq!(scene.indicator_target(), None);
    assert!(!scene.indicator_visible());

    scene.walk_through(0);
    assert_eq!(scene.cursor(), 0);
    assert_eq!(scene.indicator_target(), None);
}

#[test]
fn test_reactivation_resets_cursor() {
    let mut scene = build_scene(3);
    let path = scene.path;

    scene.walk_through(0);
    scene.walk_through(1);
    assert_eq!(scene.cursor(), 2);

    scene.app.world_mut().entity_mut(path).remove::<PathActive>();
    scene.app.update();
    scene.app.world_mut().entity_mut(path).insert(PathActive);
    scene.app.update();

    assert_eq!(scene.cursor(), 0);
    assert_eq!(scene.indicator_target(), Some(scene.front(0)));
    assert!(scene.indicator_visible());
}

#[test]
fn test_despawned_path_clears_indicator() {
    let mut scene = build_scene(3);
    let path = scene.path;

    scene.app.world_mut().despawn(path);
    scene.app.update();

    assert_eq!(scene.indicator_target(), None);
}

#[test]
fn test_crossing_foreign_waypoint_is_ignored() {
    let mut scene = build_scene(3);

    // Waypoint вне пути
    let stray = spawn_waypoint(
        &mut scene.app.world_mut().commands(),
        Transform::from_xyz(50.0, 0.0, 0.0),
        Vec3::new(3.0, 2.0, 0.5),
        1.0,
    );
    scene.app.world_mut().flush();
    scene.app.update();

    scene.waypoints.push(stray);
    scene
        .app
        .world_mut()
        .get_mut::<Transform>(scene.player)
        .unwrap()
        .translation = Vec3::new(50.0, 0.0, 2.0);
    scene.app.update();
    scene.trigger(3, TriggerPhase::Enter);
    scene
        .app
        .world_mut()
        .get_mut::<Transform>(scene.player)
        .unwrap()
        .translation = Vec3::new(50.0, 0.0, -2.0);
    scene.app.update();
    scene.trigger(3, TriggerPhase::Exit);

    assert_eq!(scene.cursor(), 0);
    assert_eq!(scene.indicator_target(), Some(scene.front(0)));
}
