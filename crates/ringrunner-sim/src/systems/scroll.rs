//! Scrolling field system.
//!
//! Advances every pool member along +z and recycles those that pass the
//! forward bound. Pools are never resized; members only move.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ringrunner_core::components::{RingLoop, Scrolling};
use ringrunner_core::constants::*;
use ringrunner_core::types::Position;

use crate::world_setup::initial_spawn_position;

/// Advance the field by `speed`. Returns the number of recycled entities.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, speed: f64) -> usize {
    let mut recycled = 0;
    for (_entity, (_scrolling, pos, ring)) in
        world.query_mut::<(&Scrolling, &mut Position, Option<&mut RingLoop>)>()
    {
        pos.z += speed;
        if pos.z > SCROLL_FORWARD_BOUND {
            recycle(pos, rng);
            if let Some(ring) = ring {
                ring.passed = false;
            }
            recycled += 1;
        }
    }
    recycled
}

/// Send an entity to the far plane with fresh lateral coordinates.
/// z lands exactly on the respawn plane; overshoot is discarded.
pub fn recycle(pos: &mut Position, rng: &mut ChaCha8Rng) {
    pos.z = SCROLL_RESPAWN_Z;
    pos.x = rng.gen_range(LATERAL_MIN..LATERAL_MAX);
    pos.y = rng.gen_range(LATERAL_MIN..LATERAL_MAX);
}

/// Re-randomize every pool member on the near side of the retry threshold,
/// using the initial spawn band of its kind. Returns how many moved.
pub fn respawn_near_side(world: &mut World, rng: &mut ChaCha8Rng) -> usize {
    let mut moved = 0;
    for (_entity, (scrolling, pos, ring)) in
        world.query_mut::<(&Scrolling, &mut Position, Option<&mut RingLoop>)>()
    {
        if let Some(ring) = ring {
            ring.passed = false;
        }
        if pos.z < RETRY_RESPAWN_BELOW_Z {
            *pos = initial_spawn_position(rng, scrolling.kind);
            moved += 1;
        }
    }
    moved
}
