//! Ship steering system.
//!
//! Moves the ship along every held direction and banks it on left/right.
//! The camera follows the same translation and banking.

use hecs::World;

use ringrunner_core::components::Ship;
use ringrunner_core::constants::BANK_FACTOR;
use ringrunner_core::input::InputState;
use ringrunner_core::types::{Position, Rotation};

use crate::session::CameraRig;

/// Apply one frame of input. Diagonals are the plain sum of axis deltas.
pub fn run(world: &mut World, input: &InputState, ship_speed: f64, camera: &mut CameraRig) {
    let bank = ship_speed * BANK_FACTOR;

    for (_entity, (_ship, pos, rot)) in
        world.query_mut::<(&Ship, &mut Position, &mut Rotation)>()
    {
        if input.up {
            pos.y += ship_speed;
            camera.position.y += ship_speed;
        }
        if input.down {
            pos.y -= ship_speed;
            camera.position.y -= ship_speed;
        }
        if input.left {
            pos.x -= ship_speed;
            camera.position.x -= ship_speed;
            rot.z += bank;
            camera.roll += bank;
        }
        if input.right {
            pos.x += ship_speed;
            camera.position.x += ship_speed;
            rot.z -= bank;
            camera.roll -= bank;
        }
    }
}
