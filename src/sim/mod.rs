//! Simulation module
//!
//! All gameplay logic lives here:
//! - Single-threaded: every mutation happens inside `tick` or while draining
//!   timer fires on the frame thread
//! - Seeded RNG only
//! - Stable iteration order (storage order, first match wins)
//! - No rendering or platform dependencies

pub mod slingshot;
pub mod spawn;
pub mod state;
pub mod store;
pub mod tick;
pub mod timer;

pub use slingshot::{CursorHint, Launch, PointerState, Slingshot, SlingshotLayout, SlingshotState};
pub use spawn::SpawnScheduler;
pub use state::{GameEvent, GameState};
pub use store::{EntityRing, EntityStore, OverflowPolicy, Projectile, Target};
pub use tick::{TickInput, in_play_area, tick};
pub use timer::{ManualTimers, ThreadTimers, TimerFired, TimerHandle, TimerHost, TimerKind, TimerQueue};
