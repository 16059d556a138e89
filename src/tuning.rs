//! Data-driven game balance
//!
//! Every field has a default from [`crate::consts`]; a JSON file only needs to
//! name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::OverflowPolicy;

/// Balance and layout parameters for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Virtual screen size the simulation runs in
    pub virtual_width: f32,
    pub virtual_height: f32,

    // === Physics ===
    pub gravity: f32,
    pub cull_margin: f32,
    pub hit_radius: f32,

    // === Entity store ===
    pub max_shots: usize,
    pub max_men: usize,
    /// What happens when a store is full
    pub overflow: OverflowPolicy,

    // === Slingshot ===
    pub grab_radius: f32,
    pub launch_power: f32,
    pub drag_overshoot: f32,
    pub ball_half_size: f32,
    pub pitch_divisor: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,

    // === Spawning ===
    pub initial_spawn_interval: f32,
    pub rate_decrease_period: f32,
    pub rate_decrease_factor: f32,
    pub min_spawn_interval: f32,
    pub spawn_y: f32,
    pub spawn_edge_margin: f32,
    pub man_speed_min: f32,
    pub man_speed_range: f32,

    // === Host loop ===
    pub max_frame_delta: f32,
    /// Fixed RNG seed (random per session when absent)
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            virtual_width: REFERENCE_WIDTH,
            virtual_height: REFERENCE_HEIGHT,

            gravity: GRAVITY,
            cull_margin: CULL_MARGIN,
            hit_radius: HIT_RADIUS,

            max_shots: MAX_SHOTS,
            max_men: MAX_MEN,
            overflow: OverflowPolicy::Wrap,

            grab_radius: GRAB_RADIUS,
            launch_power: LAUNCH_POWER,
            drag_overshoot: DRAG_OVERSHOOT,
            ball_half_size: BALL_HALF_SIZE,
            pitch_divisor: PITCH_DIVISOR,
            pitch_min: PITCH_MIN,
            pitch_max: PITCH_MAX,

            initial_spawn_interval: INITIAL_SPAWN_INTERVAL,
            rate_decrease_period: RATE_DECREASE_PERIOD,
            rate_decrease_factor: RATE_DECREASE_FACTOR,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            spawn_y: SPAWN_Y,
            spawn_edge_margin: SPAWN_EDGE_MARGIN,
            man_speed_min: MAN_SPEED_MIN,
            man_speed_range: MAN_SPEED_RANGE,

            max_frame_delta: MAX_FRAME_DELTA,
            seed: None,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Load tuning from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read tuning {}: {} - using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        if self.max_shots == 0 {
            log::warn!("max_shots must be at least 1");
            self.max_shots = 1;
        }
        if self.max_men == 0 {
            log::warn!("max_men must be at least 1");
            self.max_men = 1;
        }
        let min_width = self.spawn_edge_margin + 1.0;
        if self.virtual_width < min_width {
            log::warn!("virtual_width {} too small, using {}", self.virtual_width, min_width);
            self.virtual_width = min_width;
        }
        if self.virtual_height < 1.0 {
            log::warn!("virtual_height {} too small, using 1", self.virtual_height);
            self.virtual_height = 1.0;
        }
        if self.min_spawn_interval <= 0.0 {
            log::warn!("min_spawn_interval must be positive, using {}", MIN_SPAWN_INTERVAL);
            self.min_spawn_interval = MIN_SPAWN_INTERVAL;
        }
        if self.initial_spawn_interval < self.min_spawn_interval {
            self.initial_spawn_interval = self.min_spawn_interval;
        }
        if self.rate_decrease_period <= 0.0 {
            log::warn!("rate_decrease_period must be positive, using {}", RATE_DECREASE_PERIOD);
            self.rate_decrease_period = RATE_DECREASE_PERIOD;
        }
        if self.pitch_min > self.pitch_max {
            std::mem::swap(&mut self.pitch_min, &mut self.pitch_max);
        }
        self.man_speed_range = self.man_speed_range.max(0.0);
        self.max_frame_delta = self.max_frame_delta.max(0.0);
        self
    }
}
