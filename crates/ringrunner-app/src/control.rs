//! Frame loop control: start, command forwarding, polling and shutdown.
//!
//! These are the only entry points the UI uses to talk to the frame loop.

use std::sync::mpsc;
use std::time::Duration;

use ringrunner_core::commands::PlayerCommand;
use ringrunner_core::state::FrameSnapshot;
use ringrunner_sim::SimulationEngine;

use crate::frame_loop;
use crate::state::{AppState, LoopCommand, LoopError};

/// Start the frame loop. Refuses if one is already registered.
///
/// Returns the receiving end of the snapshot channel.
pub fn start_loop(
    state: &AppState,
    engine: SimulationEngine,
    frame: Duration,
) -> Result<mpsc::Receiver<FrameSnapshot>, LoopError> {
    let mut running = state.running.lock().map_err(|_| LoopError::Poisoned)?;

    if *running {
        return Err(LoopError::AlreadyRunning);
    }

    let (snap_tx, snap_rx) = mpsc::channel();
    let (cmd_tx, handle) =
        frame_loop::spawn_frame_loop(engine, frame, state.latest_snapshot.clone(), snap_tx)?;

    *state.command_tx.lock().map_err(|_| LoopError::Poisoned)? = Some(cmd_tx);
    *state.handle.lock().map_err(|_| LoopError::Poisoned)? = Some(handle);
    *running = true;
    log::info!("Frame loop registered");

    Ok(snap_rx)
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), LoopError> {
    let tx_lock = state.command_tx.lock().map_err(|_| LoopError::Poisoned)?;

    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(LoopCommand::Player(command))
            .map_err(|_| LoopError::Disconnected),
        None => Err(LoopError::NotRunning),
    }
}

/// Get the latest snapshot synchronously.
pub fn get_snapshot(state: &AppState) -> Result<Option<FrameSnapshot>, LoopError> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|_| LoopError::Poisoned)?;
    Ok(lock.clone())
}

/// Stop the frame loop thread and wait for it to exit.
pub fn shutdown(state: &AppState) -> Result<(), LoopError> {
    let mut running = state.running.lock().map_err(|_| LoopError::Poisoned)?;
    if !*running {
        return Err(LoopError::NotRunning);
    }

    if let Some(tx) = state
        .command_tx
        .lock()
        .map_err(|_| LoopError::Poisoned)?
        .take()
    {
        // The thread may already be gone; joining below tells us.
        let _ = tx.send(LoopCommand::Shutdown);
    }
    let handle = state.handle.lock().map_err(|_| LoopError::Poisoned)?.take();
    if let Some(handle) = handle {
        handle.join().map_err(|_| LoopError::Disconnected)?;
    }

    *running = false;
    log::info!("Frame loop shut down");
    Ok(())
}
