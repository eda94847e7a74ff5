use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use ringrunner_app::control;
use ringrunner_app::keyboard::{self, AppAction, HeldKeys};
use ringrunner_app::render;
use ringrunner_app::state::AppState;
use ringrunner_core::commands::PlayerCommand;
use ringrunner_core::enums::RunState;
use ringrunner_core::state::FrameSnapshot;
use ringrunner_sim::assets::{AssetManifest, DirectoryAssets};
use ringrunner_sim::config::GameConfig;
use ringrunner_sim::SimulationEngine;

#[derive(Parser)]
#[command(name = "ringrunner")]
#[command(about = "Fly through the rings, dodge the rocks")]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model directory (<dir>/<model>/scene.gltf). Built-in models if omitted.
    #[arg(short, long)]
    models: Option<PathBuf>,

    /// RNG seed, overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Plain flight: loops change colour but score nothing
    #[arg(long)]
    no_scoring: bool,

    /// Frame rate of the simulation, overrides the config file
    #[arg(long)]
    fps: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::load_or_default(cli.config.as_deref())
        .context("failed to load config")?;
    if let Some(seed) = cli.seed {
        config.sim.seed = seed;
    }
    if let Some(fps) = cli.fps {
        config.sim.frame_rate = fps;
    }
    if cli.no_scoring {
        config.features.scoring = false;
    }

    let assets = match &cli.models {
        Some(dir) => AssetManifest::resolve(&DirectoryAssets::new(dir)),
        None => AssetManifest::builtin(),
    };
    let frame = config.sim.frame_duration();
    let engine = SimulationEngine::with_assets(config, assets);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events. Terminals without the kitty protocol
    // fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, engine, frame, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    engine: SimulationEngine,
    frame: Duration,
    keyboard_enhanced: bool,
) -> anyhow::Result<()> {
    let state = AppState::new();
    let snapshots = control::start_loop(&state, engine, frame)?;

    let mut held = HeldKeys::new(keyboard_enhanced);
    let mut ui_frame: u64 = 0;
    let mut latest: Option<FrameSnapshot> = None;

    'ui: loop {
        ui_frame += 1;

        // 1. Input
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else {
                continue;
            };
            if let Some(action) = keyboard::app_action(&key) {
                let commands = match action {
                    AppAction::Quit => break 'ui,
                    AppAction::ToggleRun => match latest.as_ref().map(|s| s.run_state) {
                        Some(RunState::Running) => vec![PlayerCommand::Stop],
                        _ => vec![PlayerCommand::Start],
                    },
                    AppAction::Retry => held.retry(),
                    AppAction::Start => vec![PlayerCommand::Start],
                };
                for command in commands {
                    control::send_command(&state, command)?;
                }
                continue;
            }
            for command in held.translate(&key, ui_frame) {
                control::send_command(&state, command)?;
            }
        }
        for command in held.expire(ui_frame) {
            control::send_command(&state, command)?;
        }

        // 2. Newest snapshot; the loop publishes nothing while parked
        match snapshots.recv_timeout(frame) {
            Ok(snapshot) => {
                latest = Some(snapshots.try_iter().last().unwrap_or(snapshot));
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if latest.is_none() {
                    latest = control::get_snapshot(&state)?;
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                log::warn!("Frame loop ended unexpectedly");
                break;
            }
        }

        // 3. Draw
        if let Some(snapshot) = &latest {
            render::render(out, snapshot)?;
        }
    }

    control::shutdown(&state)?;
    Ok(())
}
