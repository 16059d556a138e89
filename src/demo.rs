//! Idle/demo mode - an input source that plays the game
//!
//! Grabs the ball, pulls it away from the lowest man (leading for his
//! descent and for gravity), lets go, waits, repeats.

use glam::Vec2;

use crate::geometry::{distance, normalize};
use crate::platform::{InputSource, PointerState};
use crate::sim::{GameState, SlingshotState, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Press on the resting ball
    Grab,
    /// Drag to the aim point, button held
    Pull,
    /// Let go
    Release,
    /// Frames left before the next shot
    Wait(u32),
}

#[derive(Debug, Clone)]
pub struct AutoPilot {
    phase: Phase,
    /// How far to pull the ball back from the anchor
    pub pull: f32,
    /// Frames between shots
    pub cooldown_frames: u32,
    aim_ball_pos: Vec2,
}

impl Default for AutoPilot {
    fn default() -> Self {
        Self {
            phase: Phase::Wait(0),
            pull: 80.0,
            cooldown_frames: 20,
            aim_ball_pos: Vec2::ZERO,
        }
    }
}

impl AutoPilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ball position (top-left) that launches a shot toward `man`
    fn aim_at(&self, state: &GameState, man: &Target) -> Vec2 {
        let tuning = &state.tuning;
        let anchor = state.slingshot.layout().anchor;
        let launch_speed = (self.pull * tuning.launch_power).max(1.0);

        let t = distance(anchor, man.pos) / launch_speed;
        let lead = Vec2::new(0.0, man.speed * t - 0.5 * tuning.gravity * t * t);
        let dir = normalize(man.pos + lead - anchor);
        anchor - dir * self.pull
    }
}

impl InputSource for AutoPilot {
    fn sample(&mut self, state: &GameState) -> PointerState {
        let half = Vec2::splat(state.tuning.ball_half_size);
        let rest = state.slingshot.layout().ball_rest;
        let idle = PointerState {
            pos: Vec2::ZERO,
            button_down: false,
        };

        match self.phase {
            Phase::Wait(0) => {
                let lowest = state
                    .store
                    .men
                    .iter()
                    .filter(|m| m.pos.y > 0.0)
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
                let Some(man) = lowest else {
                    return idle;
                };
                self.aim_ball_pos = self.aim_at(state, man);
                self.phase = Phase::Pull;
                log::trace!("Autopilot aiming at {:?}", man.pos);
                PointerState {
                    pos: rest + half,
                    button_down: true,
                }
            }
            Phase::Wait(n) => {
                self.phase = Phase::Wait(n - 1);
                idle
            }
            Phase::Grab => {
                self.phase = Phase::Pull;
                PointerState {
                    pos: rest + half,
                    button_down: true,
                }
            }
            Phase::Pull => {
                // Grab didn't take (ball was mid-flight or layout changed)
                if state.slingshot.state() != SlingshotState::Aiming {
                    self.phase = Phase::Grab;
                    return idle;
                }
                self.phase = Phase::Release;
                PointerState {
                    pos: self.aim_ball_pos + half,
                    button_down: true,
                }
            }
            Phase::Release => {
                self.phase = Phase::Wait(self.cooldown_frames);
                PointerState {
                    pos: self.aim_ball_pos + half,
                    button_down: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::sim::{GameEvent, TickInput};
    use crate::tuning::Tuning;

    #[test]
    fn test_idle_without_targets() {
        let game = Game::new(Tuning {
            seed: Some(3),
            ..Tuning::default()
        });
        let mut pilot = AutoPilot::new();
        let sample = pilot.sample(&game.state);
        assert!(!sample.button_down);
    }

    #[test]
    fn test_fires_at_visible_man() {
        let mut game = Game::new(Tuning {
            seed: Some(3),
            ..Tuning::default()
        });
        game.state.store.add_target(Vec2::new(360.0, 100.0), 0.0);
        let mut pilot = AutoPilot::new();

        let mut launched = None;
        for _ in 0..4 {
            let pointer = pilot.sample(&game.state);
            for e in game.frame(&TickInput { pointer }, 0.016) {
                if let GameEvent::Launched { vel, .. } = e {
                    launched = Some(vel);
                }
            }
        }
        let vel = launched.expect("autopilot launched");
        // Man is almost straight above the slingshot
        assert!(vel.y < 0.0);
        assert!((vel.length() - 800.0).abs() < 1.0);
    }
}
