//! Idle wobble: a small oscillating roll independent of input.

use hecs::World;

use ringrunner_core::components::{Ship, Wobble};
use ringrunner_core::constants::{WOBBLE_PERIOD, WOBBLE_STEP};
use ringrunner_core::types::Rotation;

pub fn run(world: &mut World) {
    for (_entity, (_ship, rot, wobble)) in
        world.query_mut::<(&Ship, &mut Rotation, &mut Wobble)>()
    {
        wobble.countdown -= 1;
        if wobble.positive {
            rot.z += WOBBLE_STEP;
        } else {
            rot.z -= WOBBLE_STEP;
        }
        if wobble.countdown < 0 {
            wobble.countdown = WOBBLE_PERIOD;
            wobble.positive = !wobble.positive;
        }
    }
}
