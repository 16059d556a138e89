//! Game state and events
//!
//! [`GameState`] is the single context object every simulation operation
//! works on. There is no global state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::slingshot::{Slingshot, SlingshotLayout};
use super::spawn::SpawnScheduler;
use super::store::EntityStore;
use super::timer::{TimerFired, TimerKind};
use crate::highscores::Scoreboard;
use crate::tuning::Tuning;

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A shot left the slingshot
    Launched { pos: Vec2, vel: Vec2, pitch: f32 },
    /// A man appeared above the screen
    TargetSpawned { pos: Vec2, speed: f32 },
    /// A shot knocked down the man at `pos`
    TargetHit { pos: Vec2, score: u32 },
    /// Shots that left the play area this frame
    ShotsCulled { count: usize },
    /// A man reached the ground
    RoundEnded { score: u32, high_score: u32 },
    /// The spawn interval shrank
    SpawnIntervalChanged { interval: f32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub seed: u64,
    rng: Pcg32,
    pub store: EntityStore,
    pub spawn: SpawnScheduler,
    pub slingshot: Slingshot,
    pub scores: Scoreboard,
    /// Seconds simulated so far
    pub elapsed: f64,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let seed = tuning.seed.unwrap_or_else(rand::random);
        let layout = SlingshotLayout::for_viewport(tuning.virtual_width, tuning.virtual_height);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            store: EntityStore::new(tuning.max_shots, tuning.max_men, tuning.overflow),
            spawn: SpawnScheduler::new(&tuning),
            slingshot: Slingshot::new(layout),
            scores: Scoreboard::new(),
            elapsed: 0.0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Virtual screen size
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.tuning.virtual_width, self.tuning.virtual_height)
    }

    /// Follow a viewport resize: the virtual screen matches the window and
    /// the slingshot layout is rescaled from the reference screen.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.tuning.virtual_width = width.max(self.tuning.spawn_edge_margin + 1.0);
        self.tuning.virtual_height = height.max(1.0);
        let layout =
            SlingshotLayout::for_viewport(self.tuning.virtual_width, self.tuning.virtual_height);
        self.slingshot.set_layout(layout);
        log::info!(
            "Viewport resized to {}x{}",
            self.tuning.virtual_width,
            self.tuning.virtual_height
        );
    }

    /// Drop one man at a random column above the screen
    pub fn spawn_target(&mut self) {
        let span = (self.tuning.virtual_width - self.tuning.spawn_edge_margin).max(1.0) as u32;
        let x = self.rng.random_range(0..span) as f32;
        let speed = self.tuning.man_speed_min + self.rng.random::<f32>() * self.tuning.man_speed_range;
        let pos = Vec2::new(x, self.tuning.spawn_y);

        self.store.add_target(pos, speed);
        log::debug!("Spawned man at x={} speed={:.1}", x, speed);
        self.push_event(GameEvent::TargetSpawned { pos, speed });
    }

    /// Apply a drained timer fire. Stale fires are dropped.
    pub fn handle_timer(&mut self, fired: &TimerFired) {
        match self.spawn.accept(fired) {
            Some(TimerKind::Spawn) => self.spawn_target(),
            Some(TimerKind::RateDecrease) => {
                let interval = self.spawn.decrease();
                log::debug!("Spawn interval now {:.4}s", interval);
                self.push_event(GameEvent::SpawnIntervalChanged { interval });
            }
            None => log::trace!("Ignoring stale {:?} fire", fired.kind),
        }
    }

    /// A man reached the ground: bank the score, clear men, restart spawning
    pub fn end_round(&mut self) {
        let score = self.scores.end_round();
        self.store.clear_targets();
        self.spawn.reset();
        log::info!(
            "Round {} over: score {} (best {})",
            self.scores.rounds_played,
            score,
            self.scores.high_score
        );
        self.push_event(GameEvent::RoundEnded {
            score,
            high_score: self.scores.high_score,
        });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last call, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::timer::TimerHandle;

    fn seeded() -> GameState {
        GameState::new(Tuning {
            seed: Some(42),
            ..Tuning::default()
        })
    }

    #[test]
    fn test_spawn_target_ranges() {
        let mut state = seeded();
        for _ in 0..50 {
            state.spawn_target();
        }
        assert_eq!(state.store.men.len(), 50);
        for man in state.store.men.iter() {
            assert!(man.pos.x >= 0.0 && man.pos.x < 800.0 - 32.0);
            assert_eq!(man.pos.y, -100.0);
            assert!(man.speed >= 48.0 && man.speed <= 148.0);
        }
        assert_eq!(state.take_events().len(), 50);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = seeded();
        let mut b = seeded();
        for _ in 0..10 {
            a.spawn_target();
            b.spawn_target();
        }
        assert_eq!(a.store.men.as_slice(), b.store.men.as_slice());
    }

    #[test]
    fn test_end_round_resets() {
        let mut state = seeded();
        state.spawn_target();
        state.store.add_projectile(Vec2::ZERO, Vec2::ZERO);
        state.scores.score = 3;
        state.spawn.decrease();

        state.end_round();
        assert!(state.store.men.is_empty());
        assert_eq!(state.store.shots.len(), 1);
        assert_eq!(state.scores.score, 0);
        assert_eq!(state.scores.high_score, 3);
        assert_eq!(state.spawn.interval(), 2.0);
    }

    #[test]
    fn test_unknown_timer_ignored() {
        let mut state = seeded();
        state.handle_timer(&TimerFired {
            handle: TimerHandle(99),
            kind: TimerKind::Spawn,
        });
        assert!(state.store.men.is_empty());
    }

    #[test]
    fn test_new_sanitizes_tuning() {
        let state = GameState::new(Tuning {
            seed: Some(42),
            initial_spawn_interval: 0.0,
            max_men: 0,
            ..Tuning::default()
        });
        assert_eq!(state.spawn.interval(), 0.01);
        assert_eq!(state.tuning.max_men, 1);
        assert_eq!(state.store.men.capacity(), 1);
    }

    #[test]
    fn test_resize_rescales_layout() {
        let mut state = seeded();
        state.resize(1600.0, 1200.0);
        assert_eq!(state.screen(), Vec2::new(1600.0, 1200.0));
        assert_eq!(state.slingshot.layout().ball_rest, Vec2::new(700.0, 1072.0));
        assert_eq!(state.slingshot.ball_pos(), Vec2::new(700.0, 1072.0));
    }
}
