//! Slingshot - a falling-men arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entity store, spawn scheduling, slingshot, per-frame step)
//! - `game`: Host-facing wrapper driving the simulation once per frame
//! - `renderer`: Presentation adapter contract (draw calls derived from state)
//! - `audio`: Sound effect dispatch for game events
//! - `platform`: Clock and pointer input abstractions
//! - `tuning`: Data-driven game balance
//! - `demo`: Autopilot input for idle/demo mode

pub mod audio;
pub mod demo;
pub mod game;
pub mod geometry;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{FrameLoop, Game};
pub use highscores::Scoreboard;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Reference virtual screen the layout is authored for
    pub const REFERENCE_WIDTH: f32 = 800.0;
    pub const REFERENCE_HEIGHT: f32 = 600.0;

    /// Downward acceleration applied to shots (units/s²)
    pub const GRAVITY: f32 = 980.0;

    /// Entity capacities
    pub const MAX_SHOTS: usize = 100;
    pub const MAX_MEN: usize = 100;

    /// Shots are culled once this far outside the screen
    pub const CULL_MARGIN: f32 = 32.0;
    /// Shot-to-man distance that counts as a hit
    pub const HIT_RADIUS: f32 = 64.0;

    /// Slingshot defaults
    pub const GRAB_RADIUS: f32 = 32.0;
    pub const LAUNCH_POWER: f32 = 10.0;
    pub const DRAG_OVERSHOOT: f32 = 16.0;
    /// Half of the ball sprite (the pouch is 32×32)
    pub const BALL_HALF_SIZE: f32 = 16.0;

    /// Spawn schedule
    pub const INITIAL_SPAWN_INTERVAL: f32 = 2.0;
    pub const RATE_DECREASE_PERIOD: f32 = 10.0;
    pub const RATE_DECREASE_FACTOR: f32 = 0.75;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.01;

    /// Men spawn above the visible area
    pub const SPAWN_Y: f32 = -100.0;
    pub const SPAWN_EDGE_MARGIN: f32 = 32.0;
    pub const MAN_SPEED_MIN: f32 = 48.0;
    pub const MAN_SPEED_RANGE: f32 = 100.0;

    /// Launch sound pitch mapping
    pub const PITCH_DIVISOR: f32 = 1400.0;
    pub const PITCH_MIN: f32 = 0.5;
    pub const PITCH_MAX: f32 = 3.0;

    /// Largest frame delta fed to the simulation (stalls, debugger breaks)
    pub const MAX_FRAME_DELTA: f32 = 0.25;

    /// Layout positions in reference coordinates
    pub const BALL_REST: (f32, f32) = (350.0, 536.0);
    /// Point the launch direction and speed are measured from
    pub const SLINGSHOT_ORIGIN: (f32, f32) = (348.0, 468.0);
    pub const SLINGSHOT_POS: (f32, f32) = (300.0, 472.0);
    pub const BAND_LEFT: (f32, f32) = (310.0, 500.0);
    pub const BAND_RIGHT: (f32, f32) = (418.0, 500.0);

    /// HUD text inset from the screen edges
    pub const HUD_INSET: f32 = 24.0;
}
