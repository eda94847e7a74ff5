//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the ship, the fixed asteroid and loop pools, and the explosion
//! actor and light. Model-backed entities are only spawned when their model
//! loaded.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ringrunner_core::components::*;
use ringrunner_core::constants::*;
use ringrunner_core::enums::{ModelId, ScrollKind};
use ringrunner_core::types::{Position, Rotation, Scale};

use crate::assets::AssetManifest;

/// Populate the world for a new session.
pub fn setup_world(world: &mut World, rng: &mut ChaCha8Rng, assets: &AssetManifest) {
    if assets.is_loaded(ModelId::Spaceship) {
        spawn_ship(world);
    }
    if assets.is_loaded(ModelId::Asteroid) {
        spawn_asteroid_pool(world, rng);
    }
    // Loops are built from procedural torus geometry and need no model.
    spawn_loop_pool(world, rng);
    spawn_explosion(world, assets.is_loaded(ModelId::Explosion));
}

/// Spawn the ship at its spawn pose.
pub fn spawn_ship(world: &mut World) -> Entity {
    world.spawn((
        Ship,
        ship_spawn_position(),
        ship_spawn_rotation(),
        Scale::uniform(SHIP_SCALE),
        idle_wobble(),
        ModelRef(ModelId::Spaceship),
    ))
}

pub fn ship_spawn_position() -> Position {
    let (x, y, z) = SHIP_SPAWN;
    Position::new(x, y, z)
}

pub fn ship_spawn_rotation() -> Rotation {
    Rotation::new(0.0, SHIP_YAW, 0.0)
}

/// Spawn all asteroids with random placement, orientation and scale.
pub fn spawn_asteroid_pool(world: &mut World, rng: &mut ChaCha8Rng) {
    for slot in 0..ASTEROID_COUNT {
        let position = initial_spawn_position(rng, ScrollKind::Asteroid);
        let rotation = Rotation::new(
            rng.gen_range(0.0..std::f64::consts::PI),
            rng.gen_range(0.0..std::f64::consts::PI),
            0.0,
        );
        let scale = Scale::new(
            rng.gen_range(ASTEROID_SCALE_MIN..ASTEROID_SCALE_MAX),
            rng.gen_range(ASTEROID_SCALE_MIN..ASTEROID_SCALE_MAX),
            rng.gen_range(ASTEROID_SCALE_MIN..ASTEROID_SCALE_MAX),
        );
        world.spawn((
            Asteroid { slot },
            Scrolling {
                kind: ScrollKind::Asteroid,
            },
            position,
            rotation,
            scale,
            ModelRef(ModelId::Asteroid),
        ));
    }
}

/// Spawn all loops.
pub fn spawn_loop_pool(world: &mut World, rng: &mut ChaCha8Rng) {
    for slot in 0..LOOP_COUNT {
        let position = initial_spawn_position(rng, ScrollKind::Loop);
        world.spawn((
            RingLoop {
                slot,
                passed: false,
            },
            Scrolling {
                kind: ScrollKind::Loop,
            },
            position,
        ));
    }
}

/// Spawn the explosion actor (if its model loaded) and light, detached.
pub fn spawn_explosion(world: &mut World, with_actor: bool) {
    if with_actor {
        world.spawn((
            ExplosionActor,
            Position::default(),
            Scale::uniform(EXPLOSION_INITIAL_SCALE),
            ModelRef(ModelId::Explosion),
        ));
    }
    world.spawn((
        ExplosionLight {
            intensity: 0.0,
            color: EXPLOSION_LIGHT_COLOR,
        },
        Position::default(),
    ));
}

/// Random position in the initial spawn band of a pool kind.
/// x and y in [-5, 5); z in (near - depth, near].
pub fn initial_spawn_position(rng: &mut ChaCha8Rng, kind: ScrollKind) -> Position {
    let (near, depth) = match kind {
        ScrollKind::Asteroid => (ASTEROID_SPAWN_Z_NEAR, ASTEROID_SPAWN_DEPTH),
        ScrollKind::Loop => (LOOP_SPAWN_Z_NEAR, LOOP_SPAWN_DEPTH),
    };
    Position::new(
        rng.gen_range(LATERAL_MIN..LATERAL_MAX),
        rng.gen_range(LATERAL_MIN..LATERAL_MAX),
        near - rng.gen_range(0.0..depth),
    )
}

/// Find the ship entity and its position. `None` if the ship never loaded.
pub fn find_ship(world: &World) -> Option<(Entity, Position)> {
    world
        .query::<(&Ship, &Position)>()
        .iter()
        .next()
        .map(|(entity, (_, pos))| (entity, *pos))
}

/// Wobble state at spawn.
pub fn idle_wobble() -> Wobble {
    Wobble {
        countdown: WOBBLE_PERIOD,
        positive: true,
    }
}
