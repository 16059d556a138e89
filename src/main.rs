//! Slingshot entry point
//!
//! Runs a headless session with the autopilot in real time: wall-clock
//! timers, recorded draw calls and logged sound effects.
//!
//! Usage: `slingshot [tuning.json]`. `SLINGSHOT_SECONDS` sets the duration and
//! `SLINGSHOT_SETTINGS` names a settings JSON file.

use std::path::Path;
use std::thread;
use std::time::Duration;

use slingshot::audio::{AudioManager, LogAudio};
use slingshot::demo::AutoPilot;
use slingshot::platform::{Clock, SystemClock};
use slingshot::renderer::{CommandList, draw_frame};
use slingshot::{FrameLoop, Game, Settings, Tuning};

/// Target frame pacing for the headless loop
const FRAME_TIME: Duration = Duration::from_micros(16_667);

fn main() {
    env_logger::init();
    log::info!("Slingshot (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load_or_default(Path::new(&path)),
        None => Tuning::default(),
    };
    let seconds: f64 = std::env::var("SLINGSHOT_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(30.0);

    let max_delta = tuning.max_frame_delta;
    let mut game = Game::with_thread_timers(tuning);
    let mut frames = FrameLoop::new(SystemClock::new(), max_delta);
    let mut pilot = AutoPilot::new();
    let settings = match std::env::var("SLINGSHOT_SETTINGS") {
        Ok(path) => Settings::load_or_default(Path::new(&path)),
        Err(_) => Settings::default(),
    };
    let mut audio = AudioManager::new(LogAudio, settings);
    let mut canvas = CommandList::new();

    while frames.clock().now() < seconds {
        let events = frames.update(&mut game, &mut pilot);
        audio.handle_events(&events);

        canvas.clear();
        draw_frame(&game.state, &mut canvas);
        log::trace!("Frame: {} draw calls", canvas.commands.len());

        thread::sleep(FRAME_TIME);
    }

    let scores = &game.state.scores;
    log::info!(
        "Session over after {:.1}s: {} rounds, high score {}, current score {}",
        game.state.elapsed,
        scores.rounds_played,
        scores.high_score,
        scores.score
    );
}
