//! Collision detection: ship proximity to loops and asteroids.
//!
//! Read-only: reports what was touched, the engine decides what happens.

use hecs::{Entity, World};

use ringrunner_core::components::{Asteroid, RingLoop};
use ringrunner_core::constants::COLLISION_RADIUS;
use ringrunner_core::types::Position;

/// What the ship touched this frame.
#[derive(Debug, Clone, Default)]
pub struct CollisionReport {
    /// Loops entered this frame that were not already passed: (entity, slot).
    pub loops_entered: Vec<(Entity, usize)>,
    /// First asteroid in range: (slot, asteroid position).
    pub asteroid_hit: Option<(usize, Position)>,
}

/// Strictly inside the collision radius. The radius itself is not a hit.
pub fn is_hit(a: &Position, b: &Position) -> bool {
    a.range_to(b) < COLLISION_RADIUS
}

pub fn run(world: &World, ship: &Position) -> CollisionReport {
    let mut report = CollisionReport::default();

    for (entity, (ring, pos)) in world.query::<(&RingLoop, &Position)>().iter() {
        if !ring.passed && is_hit(ship, pos) {
            report.loops_entered.push((entity, ring.slot));
        }
    }
    report.loops_entered.sort_by_key(|&(_, slot)| slot);

    report.asteroid_hit = world
        .query::<(&Asteroid, &Position)>()
        .iter()
        .filter(|(_, (_, pos))| is_hit(ship, pos))
        .map(|(_, (asteroid, pos))| (asteroid.slot, *pos))
        .min_by_key(|&(slot, _)| slot);

    report
}
