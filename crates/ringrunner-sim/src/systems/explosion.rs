//! Explosion system: ignition at the crash site, per-frame growth, and
//! detachment on retry.

use hecs::{Entity, World};

use ringrunner_core::components::{Attached, ExplosionActor, ExplosionLight};
use ringrunner_core::constants::{EXPLOSION_GROWTH, EXPLOSION_LIGHT_RAMP};
use ringrunner_core::types::{Position, Scale};

use crate::session::ExplosionTimer;

fn explosion_entities(world: &World) -> Vec<Entity> {
    let mut entities: Vec<Entity> = world
        .query::<&ExplosionActor>()
        .iter()
        .map(|(e, _)| e)
        .collect();
    entities.extend(world.query::<&ExplosionLight>().iter().map(|(e, _)| e));
    entities
}

/// Snap actor and light to `at` and attach them to the scene.
pub fn ignite(world: &mut World, at: Position, timer: &ExplosionTimer) {
    for entity in explosion_entities(world) {
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            *pos = at;
        }
        let _ = world.insert_one(entity, Attached);
    }
    apply(world, timer);
}

/// Grow for one frame while the countdown is positive.
/// Returns true on the frame the countdown reaches zero.
pub fn run(world: &mut World, timer: &mut ExplosionTimer) -> bool {
    if timer.countdown == 0 {
        return false;
    }
    timer.countdown -= 1;
    timer.scale += EXPLOSION_GROWTH;
    timer.light_intensity += EXPLOSION_LIGHT_RAMP;
    apply(world, timer);
    timer.countdown == 0
}

/// Write the timer's scale and intensity onto the entities.
pub fn apply(world: &mut World, timer: &ExplosionTimer) {
    for (_entity, (_actor, scale)) in world.query_mut::<(&ExplosionActor, &mut Scale)>() {
        *scale = Scale::uniform(timer.scale);
    }
    for (_entity, light) in world.query_mut::<&mut ExplosionLight>() {
        light.intensity = timer.light_intensity;
    }
}

/// Remove actor and light from the scene and write the reset timer values.
pub fn detach(world: &mut World, timer: &ExplosionTimer) {
    for entity in explosion_entities(world) {
        let _ = world.remove_one::<Attached>(entity);
    }
    apply(world, timer);
}

/// Whether the explosion is currently in the scene.
pub fn is_attached(world: &World) -> bool {
    world
        .query::<(&ExplosionLight, &Attached)>()
        .iter()
        .next()
        .is_some()
}

/// Center of the explosion: the actor if its model loaded, else the light.
pub fn focus(world: &World) -> Option<Position> {
    let actor = world
        .query::<(&ExplosionActor, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos);
    actor.or_else(|| {
        world
            .query::<(&ExplosionLight, &Position)>()
            .iter()
            .next()
            .map(|(_, (_, pos))| *pos)
    })
}
