//! Periodic timers feeding a fire queue
//!
//! Timer callbacks never touch game state directly. A [`TimerHost`] posts a
//! [`TimerFired`] into the [`TimerQueue`] and the frame loop drains the queue
//! once per frame, so every state mutation stays on the simulation thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Which scheduler callback a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Spawn one man
    Spawn,
    /// Shrink the spawn interval
    RateDecrease,
}

/// Opaque id of an armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// One timer period elapsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub handle: TimerHandle,
    pub kind: TimerKind,
}

/// Thread-safe queue of timer fires, drained by the simulation thread
pub struct TimerQueue {
    tx: Sender<TimerFired>,
    rx: Receiver<TimerFired>,
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Sender handed to timer hosts
    pub fn sender(&self) -> Sender<TimerFired> {
        self.tx.clone()
    }

    /// Take every fire queued so far, oldest first
    pub fn drain(&self) -> Vec<TimerFired> {
        self.rx.try_iter().collect()
    }

    /// Block until a fire arrives or `timeout` passes
    pub fn recv_timeout(&self, timeout: Duration) -> Option<TimerFired> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Scheduling primitive: arm a repeating timer, cancel it by handle.
///
/// A timer's period is fixed once armed; changing it means cancel and re-arm.
pub trait TimerHost {
    fn arm(&mut self, period_secs: f32, kind: TimerKind) -> TimerHandle;

    fn cancel(&mut self, handle: TimerHandle);

    /// Advance host time by one frame. Hosts that track wall time ignore this.
    fn poll(&mut self, _dt: f32) {}
}

#[derive(Debug)]
struct ManualTimer {
    handle: TimerHandle,
    kind: TimerKind,
    period: f32,
    elapsed: f32,
}

/// Deterministic timers advanced by frame time
pub struct ManualTimers {
    timers: Vec<ManualTimer>,
    next_handle: u64,
    tx: Sender<TimerFired>,
}

impl ManualTimers {
    pub fn new(tx: Sender<TimerFired>) -> Self {
        Self {
            timers: Vec::new(),
            next_handle: 1,
            tx,
        }
    }

    /// Number of armed timers
    pub fn armed(&self) -> usize {
        self.timers.len()
    }

    /// Period of the armed timer of `kind`, if any
    pub fn period_of(&self, kind: TimerKind) -> Option<f32> {
        self.timers.iter().find(|t| t.kind == kind).map(|t| t.period)
    }
}

impl TimerHost for ManualTimers {
    fn arm(&mut self, period_secs: f32, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(ManualTimer {
            handle,
            kind,
            period: period_secs.max(f32::EPSILON),
            elapsed: 0.0,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }

    fn poll(&mut self, dt: f32) {
        for timer in &mut self.timers {
            timer.elapsed += dt;
            while timer.elapsed >= timer.period {
                timer.elapsed -= timer.period;
                // Receiver gone means the game is shutting down
                if self
                    .tx
                    .send(TimerFired {
                        handle: timer.handle,
                        kind: timer.kind,
                    })
                    .is_err()
                {
                    return;
                }
            }
        }
    }
}

/// Wall-clock timers, one sleeper thread per armed timer
pub struct ThreadTimers {
    cancels: Vec<(TimerHandle, Arc<AtomicBool>)>,
    next_handle: u64,
    tx: Sender<TimerFired>,
}

impl ThreadTimers {
    pub fn new(tx: Sender<TimerFired>) -> Self {
        Self {
            cancels: Vec::new(),
            next_handle: 1,
            tx,
        }
    }
}

impl TimerHost for ThreadTimers {
    fn arm(&mut self, period_secs: f32, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let tx = self.tx.clone();
        let period = Duration::from_secs_f32(period_secs.max(0.001));

        let spawned = thread::Builder::new()
            .name(format!("timer-{}", handle.0))
            .spawn(move || {
                loop {
                    thread::sleep(period);
                    if flag.load(Ordering::Acquire) {
                        break;
                    }
                    if tx.send(TimerFired { handle, kind }).is_err() {
                        break;
                    }
                }
            });
        if let Err(e) = spawned {
            log::error!("Failed to start {:?} timer thread: {}", kind, e);
        }

        self.cancels.push((handle, cancelled));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.cancels.retain(|(h, flag)| {
            if *h == handle {
                flag.store(true, Ordering::Release);
                false
            } else {
                true
            }
        });
    }
}

impl Drop for ThreadTimers {
    fn drop(&mut self) {
        for (_, flag) in &self.cancels {
            flag.store(true, Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_timer_fires_each_period() {
        let queue = TimerQueue::new();
        let mut timers = ManualTimers::new(queue.sender());
        let h = timers.arm(2.0, TimerKind::Spawn);

        timers.poll(1.5);
        assert!(queue.drain().is_empty());

        timers.poll(0.5);
        assert_eq!(
            queue.drain(),
            vec![TimerFired {
                handle: h,
                kind: TimerKind::Spawn
            }]
        );

        // A long frame catches up on every missed period
        timers.poll(6.0);
        assert_eq!(queue.drain().len(), 3);
    }

    #[test]
    fn test_manual_timer_cancel() {
        let queue = TimerQueue::new();
        let mut timers = ManualTimers::new(queue.sender());
        let spawn = timers.arm(1.0, TimerKind::Spawn);
        let rate = timers.arm(10.0, TimerKind::RateDecrease);
        timers.cancel(spawn);
        assert_eq!(timers.armed(), 1);

        timers.poll(10.0);
        let fired = queue.drain();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].handle, rate);
    }

    #[test]
    fn test_handles_are_unique() {
        let queue = TimerQueue::new();
        let mut timers = ManualTimers::new(queue.sender());
        let a = timers.arm(1.0, TimerKind::Spawn);
        timers.cancel(a);
        let b = timers.arm(1.0, TimerKind::Spawn);
        assert_ne!(a, b);
    }

    #[test]
    fn test_thread_timer_posts_to_queue() {
        let queue = TimerQueue::new();
        let mut timers = ThreadTimers::new(queue.sender());
        let h = timers.arm(0.01, TimerKind::RateDecrease);

        let fired = queue.recv_timeout(Duration::from_secs(2));
        assert_eq!(
            fired,
            Some(TimerFired {
                handle: h,
                kind: TimerKind::RateDecrease
            })
        );
        timers.cancel(h);
    }
}
