//! Snapshot system: queries the ECS world and builds a complete FrameSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use ringrunner_core::components::*;
use ringrunner_core::constants::{LOOP_COLOR, LOOP_PASSED_COLOR};
use ringrunner_core::events::{GameEvent, UiSignal};
use ringrunner_core::state::*;
use ringrunner_core::types::{FrameTime, Position, Rotation, Scale};

use crate::session::Session;
use crate::systems::explosion;

/// Build a complete FrameSnapshot from the current world and session state.
pub fn build_snapshot(
    world: &World,
    time: &FrameTime,
    session: &Session,
    scoring_enabled: bool,
    narrative: NarrativeView,
    events: Vec<GameEvent>,
    ui_signals: Vec<UiSignal>,
) -> FrameSnapshot {
    FrameSnapshot {
        time: *time,
        phase: session.phase,
        run_state: session.run_state,
        ship: build_ship(world),
        asteroids: build_asteroids(world),
        loops: build_loops(world),
        explosion: build_explosion(world, session),
        camera: CameraView {
            position: session.camera.position,
            roll: session.camera.roll,
            look_at: session.camera.look_at,
        },
        scroll_speed: session.scroll_speed,
        score: ScoreView {
            score: session.score.score,
            loops_passed: session.score.loops_passed,
            scoring_enabled,
        },
        narrative,
        ui: UiView {
            game_over_visible: session.game_over_visible,
            retry_visible: session.game_over_visible,
        },
        events,
        ui_signals,
    }
}

fn build_ship(world: &World) -> Option<ShipView> {
    world
        .query::<(&Ship, &Position, &Rotation, &Scale)>()
        .iter()
        .next()
        .map(|(_, (_, pos, rot, scale))| ShipView {
            position: *pos,
            rotation: *rot,
            scale: *scale,
        })
}

fn build_asteroids(world: &World) -> Vec<AsteroidView> {
    let mut asteroids: Vec<AsteroidView> = world
        .query::<(&Asteroid, &Position, &Rotation, &Scale)>()
        .iter()
        .map(|(_, (asteroid, pos, rot, scale))| AsteroidView {
            slot: asteroid.slot,
            position: *pos,
            rotation: *rot,
            scale: *scale,
        })
        .collect();
    asteroids.sort_by_key(|a| a.slot);
    asteroids
}

fn build_loops(world: &World) -> Vec<LoopView> {
    let mut loops: Vec<LoopView> = world
        .query::<(&RingLoop, &Position)>()
        .iter()
        .map(|(_, (ring, pos))| LoopView {
            slot: ring.slot,
            position: *pos,
            passed: ring.passed,
            color: if ring.passed {
                LOOP_PASSED_COLOR
            } else {
                LOOP_COLOR
            },
        })
        .collect();
    loops.sort_by_key(|l| l.slot);
    loops
}

fn build_explosion(world: &World, session: &Session) -> ExplosionView {
    ExplosionView {
        attached: explosion::is_attached(world),
        position: explosion::focus(world).unwrap_or_default(),
        scale: session.explosion.scale,
        light_intensity: session.explosion.light_intensity,
        countdown: session.explosion.countdown,
    }
}
