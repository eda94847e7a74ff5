//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `FrameSnapshot`s. Completely headless
//! (no terminal dependency), enabling deterministic testing.

use std::collections::VecDeque;
use std::time::Duration;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ringrunner_core::commands::PlayerCommand;
use ringrunner_core::components::{RingLoop, Wobble};
use ringrunner_core::enums::{GamePhase, RunState};
use ringrunner_core::events::{GameEvent, UiSignal};
use ringrunner_core::input::InputState;
use ringrunner_core::state::{FrameSnapshot, NarrativeView};
use ringrunner_core::types::{FrameTime, Position, Rotation};
use ringrunner_narrative::milestones::{self, MilestoneCheck, NarrativeSequence};
use ringrunner_narrative::typewriter::Typewriter;

use crate::assets::AssetManifest;
use crate::config::GameConfig;
use crate::session::{CameraRig, ExplosionTimer, ScoreState, Session};
use crate::systems;
use crate::systems::collision::CollisionReport;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all session state.
pub struct SimulationEngine {
    world: World,
    time: FrameTime,
    frame_duration: Duration,
    rng: ChaCha8Rng,
    config: GameConfig,
    input: InputState,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
    ui_signals: Vec<UiSignal>,
    session: Session,
    narrative: NarrativeSequence,
    typewriter: Typewriter,
    started: bool,
}

impl SimulationEngine {
    /// Create an engine with every model available.
    pub fn new(config: GameConfig) -> Self {
        Self::with_assets(config, AssetManifest::builtin())
    }

    /// Create an engine with an explicit asset manifest. Entities whose
    /// model did not load are never spawned.
    pub fn with_assets(config: GameConfig, assets: AssetManifest) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.sim.seed);
        let mut world = World::new();
        world_setup::setup_world(&mut world, &mut rng, &assets);

        log::debug!(
            "World ready: seed={} scoring={} entities={}",
            config.sim.seed,
            config.features.scoring,
            world.len()
        );

        Self {
            world,
            time: FrameTime::default(),
            frame_duration: config.sim.frame_duration(),
            rng,
            session: Session::new(config.sim.space_speed),
            narrative: config.narrative.sequence(),
            typewriter: Typewriter::new(config.narrative.char_delay()),
            config,
            input: InputState::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            ui_signals: Vec::new(),
            started: false,
        }
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Process queued commands, advance one frame if running, and return
    /// the resulting snapshot.
    pub fn tick(&mut self) -> FrameSnapshot {
        self.process_commands();

        if self.session.run_state == RunState::Running {
            self.run_systems();
            self.time.advance(self.frame_duration);
        }

        let events = std::mem::take(&mut self.events);
        let ui_signals = std::mem::take(&mut self.ui_signals);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.session,
            self.scoring_enabled(),
            self.narrative_view(),
            events,
            ui_signals,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn run_state(&self) -> RunState {
        self.session.run_state
    }

    pub fn time(&self) -> FrameTime {
        self.time
    }

    pub fn scroll_speed(&self) -> f64 {
        self.session.scroll_speed
    }

    pub fn score(&self) -> &ScoreState {
        &self.session.score
    }

    pub fn explosion(&self) -> &ExplosionTimer {
        &self.session.explosion
    }

    pub fn camera(&self) -> &CameraRig {
        &self.session.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn narrative_index(&self) -> usize {
        self.session.narrative_index
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scoring_enabled(&self) -> bool {
        self.config.features.scoring
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for scenario setup (e.g. placing an asteroid).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::KeyDown { key } => {
                self.input.on_key_down(&key);
            }
            PlayerCommand::KeyUp { key } => {
                self.input.on_key_up(&key);
            }
            PlayerCommand::Start => {
                if self.session.run_state != RunState::Running {
                    self.session.run_state = RunState::Running;
                    self.ui_signals.push(UiSignal::LoopStarted);
                    if !self.started {
                        self.started = true;
                        self.reveal_line(0);
                    }
                    log::info!("Frame loop started at frame {}", self.time.frame);
                }
            }
            PlayerCommand::Stop => {
                if self.session.run_state == RunState::Running {
                    self.session.run_state = RunState::Stopped;
                    self.ui_signals.push(UiSignal::LoopStopped);
                    log::info!("Frame loop stopped at frame {}", self.time.frame);
                }
            }
            PlayerCommand::Retry => {
                if matches!(self.session.phase, GamePhase::Exploding | GamePhase::Over) {
                    self.retry();
                } else {
                    log::debug!("Retry ignored in phase {:?}", self.session.phase);
                }
            }
        }
    }

    /// Reset the session after a crash and resume flying.
    fn retry(&mut self) {
        if let Some((ship, _)) = world_setup::find_ship(&self.world) {
            if let Ok(mut pos) = self.world.get::<&mut Position>(ship) {
                *pos = world_setup::ship_spawn_position();
            }
            if let Ok(mut rot) = self.world.get::<&mut Rotation>(ship) {
                *rot = world_setup::ship_spawn_rotation();
            }
            if let Ok(mut wobble) = self.world.get::<&mut Wobble>(ship) {
                *wobble = world_setup::idle_wobble();
            }
        }

        self.session.explosion = ExplosionTimer::default();
        systems::explosion::detach(&mut self.world, &self.session.explosion);
        let moved = systems::scroll::respawn_near_side(&mut self.world, &mut self.rng);

        self.session.phase = GamePhase::Flying;
        self.session.scroll_speed = self.config.sim.space_speed;
        self.session.score = ScoreState::default();
        self.session.camera = CameraRig::default();
        self.session.narrative_index = 0;
        self.session.game_over_visible = false;
        self.input.clear();
        self.typewriter.cancel();
        self.reveal_line(0);

        if self.session.run_state != RunState::Running {
            self.session.run_state = RunState::Running;
            self.ui_signals.push(UiSignal::LoopStarted);
        }
        self.ui_signals.push(UiSignal::HideGameOver);
        self.events.push(GameEvent::Retried);
        log::info!("Retry at frame {}: {} entities respawned", self.time.frame, moved);
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let flying = self.session.phase == GamePhase::Flying;

        // 1. Ship steering and idle wobble
        if flying {
            systems::ship_control::run(
                &mut self.world,
                &self.input,
                self.config.sim.ship_speed,
                &mut self.session.camera,
            );
            systems::wobble::run(&mut self.world);
        }
        // 2. Field scroll and recycling
        systems::scroll::run(&mut self.world, &mut self.rng, self.session.scroll_speed);
        // 3. Collisions while flying, explosion growth after a crash
        if flying {
            if let Some((_, ship_pos)) = world_setup::find_ship(&self.world) {
                let report = systems::collision::run(&self.world, &ship_pos);
                self.apply_collisions(report, ship_pos);
            }
        } else if self.session.phase == GamePhase::Exploding
            && systems::explosion::run(&mut self.world, &mut self.session.explosion)
        {
            self.session.phase = GamePhase::Over;
            self.events.push(GameEvent::ExplosionSpent);
            log::info!("Explosion spent at frame {}, game over", self.time.frame);
        }
        // 4. Camera orbit
        if self.session.phase != GamePhase::Flying {
            if let Some(center) = systems::explosion::focus(&self.world) {
                systems::camera::orbit(&mut self.session.camera, center);
            }
        }
        // 5. Narrative reveal
        self.typewriter.advance(self.frame_duration);
    }

    fn apply_collisions(&mut self, report: CollisionReport, ship_pos: Position) {
        for (entity, slot) in report.loops_entered {
            if let Ok(mut ring) = self.world.get::<&mut RingLoop>(entity) {
                ring.passed = true;
            }
            self.on_loop_passed(slot);
        }

        if let Some((slot, _)) = report.asteroid_hit {
            self.begin_explosion(slot, ship_pos);
        }
    }

    fn on_loop_passed(&mut self, slot: usize) {
        self.session.score.loops_passed += 1;
        if self.scoring_enabled() {
            self.session.score.score += 1;
            let score = self.session.score.score;
            if let MilestoneCheck::Crossed { index } =
                milestones::check(&self.narrative, self.session.narrative_index, score)
            {
                self.session.narrative_index = index;
                self.reveal_line(index);
                self.events.push(GameEvent::MilestoneReached { index });
            }
        }
        log::debug!("Loop {} passed, score {}", slot, self.session.score.score);
        self.events.push(GameEvent::LoopPassed {
            slot,
            score: self.session.score.score,
        });
    }

    /// Crash: freeze the field, attach the explosion at the ship, show game over.
    /// Only the first hit of a flying episode does anything.
    fn begin_explosion(&mut self, slot: usize, at: Position) {
        if self.session.phase != GamePhase::Flying {
            return;
        }
        self.session.phase = GamePhase::Exploding;
        self.session.scroll_speed = 0.0;
        systems::explosion::ignite(&mut self.world, at, &self.session.explosion);
        self.session.game_over_visible = true;
        self.ui_signals.push(UiSignal::ShowGameOver);
        self.events.push(GameEvent::AsteroidHit { slot, position: at });
        log::info!(
            "Asteroid {} hit at frame {}, score {}",
            slot,
            self.time.frame,
            self.session.score.score
        );
    }

    fn reveal_line(&mut self, index: usize) {
        if !self.scoring_enabled() || self.narrative.is_empty() {
            return;
        }
        self.typewriter.start(self.narrative.line(index));
    }

    fn narrative_view(&self) -> NarrativeView {
        if !self.scoring_enabled() {
            return NarrativeView::default();
        }
        NarrativeView {
            index: self.session.narrative_index,
            text: self.typewriter.visible(),
            complete: self.typewriter.is_complete(),
        }
    }
}
