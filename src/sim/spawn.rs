//! Spawn scheduling
//!
//! Two timers: the spawn timer drops a man every `interval` seconds and the
//! rate timer shrinks `interval` every fixed period. Interval changes are
//! recorded here and applied to the timer host by [`SpawnScheduler::sync_timers`]
//! (cancel and re-arm, since an armed period cannot change).

use super::timer::{TimerFired, TimerHandle, TimerHost, TimerKind};
use crate::tuning::Tuning;

/// Timers that need re-arming on the next sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rearm {
    None,
    Spawn,
    All,
}

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    interval: f32,
    initial_interval: f32,
    min_interval: f32,
    factor: f32,
    rate_period: f32,
    spawn_timer: Option<TimerHandle>,
    rate_timer: Option<TimerHandle>,
    pending: Rearm,
}

impl SpawnScheduler {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            interval: tuning.initial_spawn_interval,
            initial_interval: tuning.initial_spawn_interval,
            min_interval: tuning.min_spawn_interval,
            factor: tuning.rate_decrease_factor,
            rate_period: tuning.rate_decrease_period,
            spawn_timer: None,
            rate_timer: None,
            // Nothing armed yet
            pending: Rearm::All,
        }
    }

    /// Current seconds between spawns
    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn initial_interval(&self) -> f32 {
        self.initial_interval
    }

    /// Shrink the interval (rate timer fired). Returns the new interval.
    pub fn decrease(&mut self) -> f32 {
        self.interval = (self.interval * self.factor).max(self.min_interval);
        if self.pending == Rearm::None {
            self.pending = Rearm::Spawn;
        }
        self.interval
    }

    /// Restore the initial interval and restart both timers (round end)
    pub fn reset(&mut self) {
        self.interval = self.initial_interval;
        self.pending = Rearm::All;
    }

    /// True if timers need re-arming
    pub fn needs_sync(&self) -> bool {
        self.pending != Rearm::None
    }

    /// Classify a fire, ignoring fires from timers that were cancelled after
    /// they had already posted to the queue.
    ///
    /// Only the handle decides: a timer awaiting re-arm is still live until
    /// `sync_timers` cancels it, so its fires still count.
    pub fn accept(&self, fired: &TimerFired) -> Option<TimerKind> {
        let current = match fired.kind {
            TimerKind::Spawn => self.spawn_timer,
            TimerKind::RateDecrease => self.rate_timer,
        };
        (current == Some(fired.handle)).then_some(fired.kind)
    }

    /// Apply pending interval changes to the timer host
    pub fn sync_timers(&mut self, host: &mut dyn TimerHost) {
        match self.pending {
            Rearm::None => return,
            Rearm::Spawn => {
                self.rearm_spawn(host);
            }
            Rearm::All => {
                self.rearm_spawn(host);
                if let Some(handle) = self.rate_timer.take() {
                    host.cancel(handle);
                }
                self.rate_timer = Some(host.arm(self.rate_period, TimerKind::RateDecrease));
            }
        }
        log::debug!("Spawn timers armed at {:.4}s interval", self.interval);
        self.pending = Rearm::None;
    }

    fn rearm_spawn(&mut self, host: &mut dyn TimerHost) {
        if let Some(handle) = self.spawn_timer.take() {
            host.cancel(handle);
        }
        self.spawn_timer = Some(host.arm(self.interval, TimerKind::Spawn));
    }
}
