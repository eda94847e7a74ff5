//! Application state shared between the UI thread and the frame loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use ringrunner_core::commands::PlayerCommand;
use ringrunner_core::state::FrameSnapshot;

/// Commands sent from the UI thread to the frame loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the frame loop thread gracefully.
    Shutdown,
}

/// Frame loop control errors.
#[derive(thiserror::Error, Debug)]
pub enum LoopError {
    #[error("frame loop already running")]
    AlreadyRunning,

    #[error("frame loop not started")]
    NotRunning,

    #[error("frame loop thread is gone")]
    Disconnected,

    #[error("failed to spawn frame loop thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("frame loop state lock poisoned")]
    Poisoned,
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` so the state is `Sync`
/// - `Option` fields are `None` until the loop is started
/// - the latest snapshot is shared with the frame loop thread
pub struct AppState {
    /// Channel sender to forward commands to the frame loop thread.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Latest snapshot for synchronous polling.
    /// Updated by the frame loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    /// Join handle of the frame loop thread.
    pub handle: Mutex<Option<JoinHandle<()>>>,
    /// Whether a frame loop is registered. At most one at a time.
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            handle: Mutex::new(None),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
