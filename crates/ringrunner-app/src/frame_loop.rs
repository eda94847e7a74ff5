//! Frame loop thread: runs the simulation engine at a fixed rate and
//! publishes snapshots.
//!
//! The engine is moved into this thread and never shared. Commands arrive via
//! `mpsc` channel. Snapshots go to the renderer over a second channel and are
//! stored in shared state for synchronous polling. While the engine is not
//! running the thread parks on the command channel instead of ticking.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use ringrunner_core::enums::RunState;
use ringrunner_core::state::FrameSnapshot;
use ringrunner_sim::SimulationEngine;

use crate::state::LoopCommand;

/// Spawns the frame loop in a new thread.
///
/// Returns the command sender and the thread's join handle.
pub fn spawn_frame_loop(
    engine: SimulationEngine,
    frame: Duration,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    snapshot_tx: mpsc::Sender<FrameSnapshot>,
) -> std::io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("ringrunner-frame-loop".into())
        .spawn(move || {
            run_frame_loop(engine, frame, cmd_rx, &latest_snapshot, &snapshot_tx);
        })?;

    Ok((cmd_tx, handle))
}

/// The frame loop. Runs until Shutdown command or channel disconnect.
fn run_frame_loop(
    mut engine: SimulationEngine,
    frame: Duration,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
    snapshot_tx: &mpsc::Sender<FrameSnapshot>,
) {
    let mut next_frame_time = Instant::now();
    log::debug!("Frame loop running at {:?} per frame", frame);

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one frame (the engine skips systems unless running)
        let snapshot = engine.tick();

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }

        // 4. Hand the snapshot to the renderer. A closed receiver is fine.
        let _ = snapshot_tx.send(snapshot);

        // 5. Park until the next command while stopped or idle
        if engine.run_state() != RunState::Running {
            match cmd_rx.recv() {
                Ok(LoopCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) | Err(_) => return,
            }
            next_frame_time = Instant::now();
            continue;
        }

        // 6. Sleep until next frame
        next_frame_time += frame;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }
}
