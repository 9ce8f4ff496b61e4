//! Tests for waypoint systems (headless App).

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

use super::*;
use crate::create_headless_app;
use crate::player::Player;

#[derive(Resource, Default)]
struct Crossings(Vec<WaypointCrossed>);

fn record_crossings(mut events: EventReader<WaypointCrossed>, mut crossings: ResMut<Crossings>) {
    crossings.0.extend(events.read().copied());
}

/// Waypoint в origin, forward = -Z; игрок стартует позади (+Z)
fn setup() -> (App, Entity, Entity) {
    let mut app = create_headless_app();
    app.add_plugins(WaypointPlugin)
        .init_resource::<Crossings>()
        .add_systems(Last, record_crossings);

    let waypoint = spawn_waypoint(
        &mut app.world_mut().commands(),
        Transform::default(),
        Vec3::new(2.0, 2.0, 0.5),
        1.0,
    );
    let player = app
        .world_mut()
        .spawn((Player, Transform::from_xyz(0.0, 0.0, 2.0)))
        .id();

    // Propagation GlobalTransform
    app.update();

    (app, waypoint, player)
}

fn move_to(app: &mut App, entity: Entity, position: Vec3) {
    app.world_mut().get_mut::<Transform>(entity).unwrap().translation = position;
    app.update();
}

fn trigger(app: &mut App, waypoint: Entity, actor: Entity, phase: TriggerPhase) {
    app.world_mut().send_event(WaypointTrigger { waypoint, actor, phase });
    app.update();
}

fn crossings(app: &App) -> Vec<CrossingDirection> {
    app.world().resource::<Crossings>().0.iter().map(|c| c.direction).collect()
}

#[test]
fn test_walk_through_fires_through() {
    let (mut app, waypoint, player) = setup();

    trigger(&mut app, waypoint, player, TriggerPhase::Enter);
    assert_eq!(
        *app.world().get::<WaypointCrossing>(waypoint).unwrap(),
        WaypointCrossing::EnteredBehind
    );

    move_to(&mut app, player, Vec3::new(0.0, 0.0, -2.0));
    trigger(&mut app, waypoint, player, TriggerPhase::Exit);

    assert_eq!(crossings(&app), vec![CrossingDirection::Through]);
    assert_eq!(*app.world().get::<WaypointCrossing>(waypoint).unwrap(), WaypointCrossing::Idle);
}

#[test]
fn test_walk_back_fires_returned() {
    let (mut app, waypoint, player) = setup();
    move_to(&mut app, player, Vec3::new(0.0, 0.0, -2.0));

    trigger(&mut app, waypoint, player, TriggerPhase::Enter);
    move_to(&mut app, player, Vec3::new(0.0, 0.0, 2.0));
    trigger(&mut app, waypoint, player, TriggerPhase::Exit);

    assert_eq!(crossings(&app), vec![CrossingDirection::Returned]);
}

#[test]
fn test_turning_back_inside_fires_nothing() {
    let (mut app, waypoint, player) = setup();

    trigger(&mut app, waypoint, player, TriggerPhase::Enter);
    trigger(&mut app, waypoint, player, TriggerPhase::Exit);

    assert!(crossings(&app).is_empty());
    assert_eq!(*app.world().get::<WaypointCrossing>(waypoint).unwrap(), WaypointCrossing::Idle);
}

#[test]
fn test_non_player_actor_is_ignored() {
    let (mut app, waypoint, _player) = setup();
    let npc = app.world_mut().spawn(Transform::from_xyz(0.0, 0.0, 2.0)).id();
    app.update();

    trigger(&mut app, waypoint, npc, TriggerPhase::Enter);
    move_to(&mut app, npc, Vec3::new(0.0, 0.0, -2.0));
    trigger(&mut app, waypoint, npc, TriggerPhase::Exit);

    assert!(crossings(&app).is_empty());
    assert_eq!(*app.world().get::<WaypointCrossing>(waypoint).unwrap(), WaypointCrossing::Idle);
}

#[test]
fn test_rotated_waypoint_uses_its_own_forward() {
    let (mut app, _, player) = setup();
    // forward() = +X после поворота на -90° вокруг Y
    let rotated = spawn_waypoint(
        &mut app.world_mut().commands(),
        Transform::from_xyz(10.0, 0.0, 0.0).with_rotation(Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2)),
        Vec3::new(2.0, 2.0, 0.5),
        1.0,
    );
    move_to(&mut app, player, Vec3::new(8.0, 0.0, 0.0));

    trigger(&mut app, rotated, player, TriggerPhase::Enter);
    move_to(&mut app, player, Vec3::new(12.0, 0.0, 0.0));
    trigger(&mut app, rotated, player, TriggerPhase::Exit);

    assert_eq!(crossings(&app), vec![CrossingDirection::Through]);
}

#[test]
fn test_rapier_sensor_events_are_translated() {
    let (mut app, waypoint, player) = setup();

    // Порядок collider'ов в событии произвольный
    app.world_mut()
        .send_event(CollisionEvent::Started(player, waypoint, CollisionEventFlags::SENSOR));
    app.update();
    assert_eq!(
        *app.world().get::<WaypointCrossing>(waypoint).unwrap(),
        WaypointCrossing::EnteredBehind
    );

    move_to(&mut app, player, Vec3::new(0.0, 0.0, -2.0));
    app.world_mut()
        .send_event(CollisionEvent::Stopped(waypoint, player, CollisionEventFlags::SENSOR));
    app.update();

    assert_eq!(crossings(&app), vec![CrossingDirection::Through]);
}

#[test]
fn test_validate_waypoint_flags_missing_sensor_and_anchor() {
    let waypoint_entity = Entity::from_raw(1);
    let front = Entity::from_raw(2);
    let back = Entity::from_raw(3);
    let waypoint = Waypoint {
        front_point: front,
        back_point: back,
    };

    let errors = validate_waypoint(waypoint_entity, &waypoint, false, |anchor| anchor == front);

    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], crate::WaypathError::NotASensor(_)));
    assert!(matches!(errors[1], crate::WaypathError::MissingAnchor { anchor: "back", .. }));
    assert!(validate_waypoint(waypoint_entity, &waypoint, true, |_| true).is_empty());
}
