//! Tests for the per-frame systems and the world setup.

use approx::assert_relative_eq;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ringrunner_core::components::*;
use ringrunner_core::constants::*;
use ringrunner_core::enums::{ModelId, ScrollKind};
use ringrunner_core::input::InputState;
use ringrunner_core::types::{Position, Rotation, Scale};

use crate::assets::AssetManifest;
use crate::session::{CameraRig, ExplosionTimer};
use crate::systems::{camera, collision, explosion, scroll, ship_control, wobble};
use crate::world_setup;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn ship_world() -> (World, hecs::Entity) {
    let mut world = World::new();
    let ship = world_setup::spawn_ship(&mut world);
    (world, ship)
}

// ---- World setup ----

#[test]
fn test_setup_spawns_fixed_pools() {
    let mut world = World::new();
    world_setup::setup_world(&mut world, &mut rng(), &AssetManifest::builtin());

    assert_eq!(world.query::<&Ship>().iter().count(), 1);
    assert_eq!(world.query::<&Asteroid>().iter().count(), ASTEROID_COUNT);
    assert_eq!(world.query::<&RingLoop>().iter().count(), LOOP_COUNT);
    assert_eq!(world.query::<&ExplosionActor>().iter().count(), 1);
    assert_eq!(world.query::<&ExplosionLight>().iter().count(), 1);
    assert_eq!(world.query::<&Attached>().iter().count(), 0);
}

#[test]
fn test_initial_spawn_bands() {
    let mut world = World::new();
    world_setup::setup_world(&mut world, &mut rng(), &AssetManifest::builtin());

    for (_e, (_a, pos, scale)) in world.query::<(&Asteroid, &Position, &Scale)>().iter() {
        assert!(pos.x >= LATERAL_MIN && pos.x < LATERAL_MAX);
        assert!(pos.y >= LATERAL_MIN && pos.y < LATERAL_MAX);
        assert!(pos.z <= ASTEROID_SPAWN_Z_NEAR);
        assert!(pos.z > ASTEROID_SPAWN_Z_NEAR - ASTEROID_SPAWN_DEPTH);
        assert!(scale.x >= ASTEROID_SCALE_MIN && scale.x < ASTEROID_SCALE_MAX);
    }
    for (_e, (_l, pos)) in world.query::<(&RingLoop, &Position)>().iter() {
        assert!(pos.z <= LOOP_SPAWN_Z_NEAR);
        assert!(pos.z > LOOP_SPAWN_Z_NEAR - LOOP_SPAWN_DEPTH);
    }
}

#[test]
fn test_failed_models_skip_entities() {
    let mut assets = AssetManifest::builtin();
    assets.mark_failed(ModelId::Spaceship, "missing");
    assets.mark_failed(ModelId::Explosion, "missing");

    let mut world = World::new();
    world_setup::setup_world(&mut world, &mut rng(), &assets);

    assert!(world_setup::find_ship(&world).is_none());
    assert_eq!(world.query::<&ExplosionActor>().iter().count(), 0);
    // Light and loops do not need a model.
    assert_eq!(world.query::<&ExplosionLight>().iter().count(), 1);
    assert_eq!(world.query::<&RingLoop>().iter().count(), LOOP_COUNT);
    assert_eq!(world.query::<&Asteroid>().iter().count(), ASTEROID_COUNT);
}

#[test]
fn test_ship_spawn_pose() {
    let (world, ship) = ship_world();
    let pos = *world.get::<&Position>(ship).unwrap();
    let rot = *world.get::<&Rotation>(ship).unwrap();
    let scale = *world.get::<&Scale>(ship).unwrap();

    assert_eq!(pos, Position::new(0.0, -2.0, 0.0));
    assert_relative_eq!(rot.y, std::f64::consts::PI);
    assert_relative_eq!(scale.x, SHIP_SCALE);
}

// ---- Ship control ----

#[test]
fn test_ship_moves_only_on_held_axes() {
    let (mut world, ship) = ship_world();
    let mut camera = CameraRig::default();
    let mut input = InputState::default();
    input.on_key_down("ArrowUp");

    ship_control::run(&mut world, &input, SHIP_SPEED, &mut camera);

    let pos = *world.get::<&Position>(ship).unwrap();
    assert_relative_eq!(pos.x, 0.0);
    assert_relative_eq!(pos.y, -2.0 + SHIP_SPEED);
    assert_relative_eq!(pos.z, 0.0);
    assert_relative_eq!(camera.position.y, SHIP_SPEED);
    assert_relative_eq!(camera.roll, 0.0);
}

#[test]
fn test_diagonal_is_sum_of_axes() {
    let (mut world, ship) = ship_world();
    let mut camera = CameraRig::default();
    let mut input = InputState::default();
    input.on_key_down("ArrowDown");
    input.on_key_down("ArrowLeft");

    ship_control::run(&mut world, &input, SHIP_SPEED, &mut camera);

    let pos = *world.get::<&Position>(ship).unwrap();
    let rot = *world.get::<&Rotation>(ship).unwrap();
    assert_relative_eq!(pos.x, -SHIP_SPEED);
    assert_relative_eq!(pos.y, -2.0 - SHIP_SPEED);
    assert_relative_eq!(rot.z, SHIP_SPEED * BANK_FACTOR);
    assert_relative_eq!(camera.roll, SHIP_SPEED * BANK_FACTOR);
}

#[test]
fn test_no_input_no_motion() {
    let (mut world, ship) = ship_world();
    let mut camera = CameraRig::default();
    ship_control::run(&mut world, &InputState::default(), SHIP_SPEED, &mut camera);

    assert_eq!(
        *world.get::<&Position>(ship).unwrap(),
        world_setup::ship_spawn_position()
    );
    assert_eq!(camera.position, CameraRig::default().position);
}

// ---- Wobble ----

#[test]
fn test_wobble_flips_after_period() {
    let (mut world, ship) = ship_world();

    // countdown 50 -> -1 takes 51 frames, all positive.
    for _ in 0..51 {
        wobble::run(&mut world);
    }
    let rot = *world.get::<&Rotation>(ship).unwrap();
    assert_relative_eq!(rot.z, 51.0 * WOBBLE_STEP, epsilon = 1e-12);
    {
        let w = *world.get::<&Wobble>(ship).unwrap();
        assert_eq!(w.countdown, WOBBLE_PERIOD);
        assert!(!w.positive);
    }

    wobble::run(&mut world);
    let rot = *world.get::<&Rotation>(ship).unwrap();
    assert_relative_eq!(rot.z, 50.0 * WOBBLE_STEP, epsilon = 1e-12);
}

// ---- Scroll ----

#[test]
fn test_scroll_advances_z() {
    let mut world = World::new();
    let e = world.spawn((
        Scrolling {
            kind: ScrollKind::Asteroid,
        },
        Position::new(1.0, 1.0, -10.0),
    ));
    let recycled = scroll::run(&mut world, &mut rng(), SPACE_SPEED);

    assert_eq!(recycled, 0);
    let pos = *world.get::<&Position>(e).unwrap();
    assert_relative_eq!(pos.z, -10.0 + SPACE_SPEED);
    assert_relative_eq!(pos.x, 1.0);
}

#[test]
fn test_recycle_lands_exactly_on_respawn_plane() {
    let mut world = World::new();
    let e = world.spawn((
        RingLoop {
            slot: 0,
            passed: true,
        },
        Scrolling {
            kind: ScrollKind::Loop,
        },
        Position::new(0.0, 0.0, 4.95),
    ));

    let recycled = scroll::run(&mut world, &mut rng(), SPACE_SPEED);
    assert_eq!(recycled, 1);

    let pos = *world.get::<&Position>(e).unwrap();
    assert_eq!(pos.z, SCROLL_RESPAWN_Z);
    assert!(pos.x >= LATERAL_MIN && pos.x < LATERAL_MAX);
    assert!(pos.y >= LATERAL_MIN && pos.y < LATERAL_MAX);
    assert!(!world.get::<&RingLoop>(e).unwrap().passed);
}

#[test]
fn test_exactly_at_bound_not_recycled() {
    let mut world = World::new();
    let e = world.spawn((
        Scrolling {
            kind: ScrollKind::Asteroid,
        },
        Position::new(0.0, 0.0, SCROLL_FORWARD_BOUND),
    ));
    scroll::run(&mut world, &mut rng(), 0.0);
    assert_eq!(world.get::<&Position>(e).unwrap().z, SCROLL_FORWARD_BOUND);
}

#[test]
fn test_zero_speed_freezes_field() {
    let mut world = World::new();
    world_setup::setup_world(&mut world, &mut rng(), &AssetManifest::builtin());
    let before: Vec<f64> = world
        .query::<(&Scrolling, &Position)>()
        .iter()
        .map(|(_, (_, p))| p.z)
        .collect();

    scroll::run(&mut world, &mut rng(), 0.0);

    let after: Vec<f64> = world
        .query::<(&Scrolling, &Position)>()
        .iter()
        .map(|(_, (_, p))| p.z)
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_respawn_near_side_only_moves_near_members() {
    let mut world = World::new();
    let near = world.spawn((
        RingLoop {
            slot: 0,
            passed: true,
        },
        Scrolling {
            kind: ScrollKind::Loop,
        },
        Position::new(0.0, 0.0, 1.0),
    ));
    let far = world.spawn((
        Scrolling {
            kind: ScrollKind::Asteroid,
        },
        Position::new(0.0, 0.0, RETRY_RESPAWN_BELOW_Z),
    ));

    let moved = scroll::respawn_near_side(&mut world, &mut rng());
    assert_eq!(moved, 1);

    let near_pos = *world.get::<&Position>(near).unwrap();
    assert!(near_pos.z <= LOOP_SPAWN_Z_NEAR);
    assert!(!world.get::<&RingLoop>(near).unwrap().passed);
    assert_eq!(world.get::<&Position>(far).unwrap().z, RETRY_RESPAWN_BELOW_Z);
}

// ---- Collision ----

#[test]
fn test_collision_radius_is_strict() {
    let origin = Position::new(0.0, 0.0, 0.0);
    assert!(!collision::is_hit(&origin, &Position::new(1.5, 0.0, 0.0)));
    assert!(collision::is_hit(&origin, &Position::new(1.49, 0.0, 0.0)));
    assert!(collision::is_hit(&origin, &origin));
}

#[test]
fn test_collision_skips_passed_loops() {
    let mut world = World::new();
    let ship_pos = world_setup::ship_spawn_position();
    world.spawn((
        RingLoop {
            slot: 1,
            passed: true,
        },
        ship_pos,
    ));
    let fresh = world.spawn((
        RingLoop {
            slot: 2,
            passed: false,
        },
        ship_pos,
    ));

    let report = collision::run(&world, &ship_pos);
    assert_eq!(report.loops_entered, vec![(fresh, 2)]);
    assert!(report.asteroid_hit.is_none());
}

#[test]
fn test_collision_reports_lowest_asteroid_slot() {
    let mut world = World::new();
    let ship_pos = world_setup::ship_spawn_position();
    world.spawn((Asteroid { slot: 4 }, ship_pos));
    world.spawn((Asteroid { slot: 3 }, ship_pos));
    world.spawn((Asteroid { slot: 0 }, Position::new(4.0, 4.0, -8.0)));

    let report = collision::run(&world, &ship_pos);
    assert_eq!(report.asteroid_hit.map(|(slot, _)| slot), Some(3));
}

// ---- Explosion ----

#[test]
fn test_explosion_ignite_and_grow() {
    let mut world = World::new();
    world_setup::spawn_explosion(&mut world, true);
    let mut timer = ExplosionTimer::default();
    let at = Position::new(1.0, -2.0, 0.0);

    explosion::ignite(&mut world, at, &timer);
    assert!(explosion::is_attached(&world));
    assert_eq!(explosion::focus(&world), Some(at));

    let mut spent_at = None;
    for frame in 1..=EXPLOSION_DURATION + 5 {
        if explosion::run(&mut world, &mut timer) {
            spent_at = Some(frame);
        }
    }
    assert_eq!(spent_at, Some(EXPLOSION_DURATION));
    assert_eq!(timer.countdown, 0);
    let expected = EXPLOSION_INITIAL_SCALE + EXPLOSION_DURATION as f64 * EXPLOSION_GROWTH;
    assert_relative_eq!(timer.scale, expected, epsilon = 1e-9);

    let scale = world
        .query::<(&ExplosionActor, &Scale)>()
        .iter()
        .next()
        .map(|(_, (_, s))| *s)
        .unwrap();
    assert_relative_eq!(scale.x, expected, epsilon = 1e-9);
}

#[test]
fn test_explosion_detach_resets() {
    let mut world = World::new();
    world_setup::spawn_explosion(&mut world, true);
    let mut timer = ExplosionTimer::default();
    explosion::ignite(&mut world, Position::default(), &timer);
    for _ in 0..10 {
        explosion::run(&mut world, &mut timer);
    }

    let timer = ExplosionTimer::default();
    explosion::detach(&mut world, &timer);

    assert!(!explosion::is_attached(&world));
    let light = world
        .query::<&ExplosionLight>()
        .iter()
        .next()
        .map(|(_, l)| *l)
        .unwrap();
    assert_relative_eq!(light.intensity, 0.0);
    assert_eq!(light.color, EXPLOSION_LIGHT_COLOR);
}

#[test]
fn test_explosion_without_actor_uses_light() {
    let mut world = World::new();
    world_setup::spawn_explosion(&mut world, false);
    let at = Position::new(2.0, 0.0, -1.0);
    explosion::ignite(&mut world, at, &ExplosionTimer::default());

    assert!(explosion::is_attached(&world));
    assert_eq!(explosion::focus(&world), Some(at));
}

// ---- Camera ----

#[test]
fn test_camera_orbit_keeps_radius() {
    let mut camera = CameraRig::default();
    let center = Position::new(1.0, -2.0, 0.0);

    for _ in 0..30 {
        camera::orbit(&mut camera, center);
        let dx = camera.position.x - center.x;
        let dz = camera.position.z - center.z;
        assert_relative_eq!((dx * dx + dz * dz).sqrt(), CAMERA_ORBIT_RADIUS, epsilon = 1e-9);
    }
    assert_relative_eq!(camera.orbit_angle, 30.0 * CAMERA_ORBIT_SPEED, epsilon = 1e-9);
    assert_eq!(camera.look_at, Some(center));
}
