//! Host-facing game driver
//!
//! [`Game`] owns the state, the timer host and the fire queue. Each frame it
//! drains timer fires, runs the simulation step and re-arms timers whose
//! period changed. [`FrameLoop`] turns a [`Clock`] into frame deltas.

use std::sync::mpsc::Sender;

use crate::platform::{Clock, InputSource};
use crate::sim::{
    GameEvent, GameState, ManualTimers, ThreadTimers, TickInput, TimerFired, TimerHost, TimerQueue,
    tick,
};
use crate::tuning::Tuning;

pub struct Game {
    pub state: GameState,
    timers: Box<dyn TimerHost>,
    queue: TimerQueue,
}

impl Game {
    /// Game driven by frame time (deterministic for a fixed seed)
    pub fn new(tuning: Tuning) -> Self {
        Self::with_host(tuning, |tx| Box::new(ManualTimers::new(tx)))
    }

    /// Game whose timers run on background threads in wall time
    pub fn with_thread_timers(tuning: Tuning) -> Self {
        Self::with_host(tuning, |tx| Box::new(ThreadTimers::new(tx)))
    }

    /// Game with a custom timer host wired to the fire queue
    pub fn with_host(
        tuning: Tuning,
        make_host: impl FnOnce(Sender<TimerFired>) -> Box<dyn TimerHost>,
    ) -> Self {
        let queue = TimerQueue::new();
        let mut timers = make_host(queue.sender());
        let mut state = GameState::new(tuning);
        state.spawn.sync_timers(timers.as_mut());
        log::info!("Game initialized with seed: {}", state.seed);
        Self {
            state,
            timers,
            queue,
        }
    }

    /// Run one frame and return the events it produced
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        self.timers.poll(dt);
        for fired in self.queue.drain() {
            self.state.handle_timer(&fired);
        }

        tick(&mut self.state, input, dt);

        if self.state.spawn.needs_sync() {
            self.state.spawn.sync_timers(self.timers.as_mut());
        }
        self.state.take_events()
    }

    /// Follow a window resize
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }
}

/// Computes per-frame `delta` from a clock
pub struct FrameLoop<C: Clock> {
    clock: C,
    last_time: f64,
    max_delta: f32,
}

impl<C: Clock> FrameLoop<C> {
    pub fn new(clock: C, max_delta: f32) -> Self {
        let last_time = clock.now();
        Self {
            clock,
            last_time,
            max_delta,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Seconds since the previous call, capped at `max_delta`
    pub fn next_delta(&mut self) -> f32 {
        let now = self.clock.now();
        let dt = (now - self.last_time).max(0.0) as f32;
        self.last_time = now;
        if dt > self.max_delta {
            log::debug!("Frame took {:.3}s, clamping to {:.3}s", dt, self.max_delta);
            self.max_delta
        } else {
            dt
        }
    }

    /// Sample input and run one frame of `game`
    pub fn update(&mut self, game: &mut Game, input: &mut dyn InputSource) -> Vec<GameEvent> {
        let dt = self.next_delta();
        let pointer = input.sample(&game.state);
        game.frame(&TickInput { pointer }, dt)
    }
}
