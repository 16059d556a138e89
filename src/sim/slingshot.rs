//! Slingshot aiming and launch
//!
//! Two states: `Idle` (ball resting in the pouch) and `Aiming` (ball follows
//! the pointer). Releasing the button while aiming launches a shot back
//! toward the anchor with speed proportional to the pull distance.

use glam::Vec2;

use crate::consts::*;
use crate::geometry::{clamp, distance, normalize, scale, subtract};
use crate::tuning::Tuning;

/// One pointer sample in virtual-screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub pos: Vec2,
    /// Primary button held
    pub button_down: bool,
}

impl PointerState {
    pub fn new(x: f32, y: f32, button_down: bool) -> Self {
        Self {
            pos: Vec2::new(x, y),
            button_down,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlingshotState {
    #[default]
    Idle,
    Aiming,
}

/// Cursor the host should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Arrow,
    /// Hovering the ball or dragging it
    Hand,
}

/// Slingshot positions for the current viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlingshotLayout {
    /// Where the ball rests between shots
    pub ball_rest: Vec2,
    /// Point the shot is pulled away from
    pub anchor: Vec2,
    /// Top-left of the slingshot sprite
    pub frame_pos: Vec2,
    /// Band attachment points on the fork
    pub band_left: Vec2,
    pub band_right: Vec2,
    /// Horizontal/vertical scale relative to the reference screen
    pub scale: Vec2,
}

impl Default for SlingshotLayout {
    fn default() -> Self {
        Self::for_viewport(REFERENCE_WIDTH, REFERENCE_HEIGHT)
    }
}

impl SlingshotLayout {
    /// Scale the reference layout to a viewport
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let ratio = Vec2::new(width / REFERENCE_WIDTH, height / REFERENCE_HEIGHT);
        let place = |(x, y): (f32, f32)| Vec2::new(x, y) * ratio;
        Self {
            ball_rest: place(BALL_REST),
            anchor: place(SLINGSHOT_ORIGIN),
            frame_pos: place(SLINGSHOT_POS),
            band_left: place(BAND_LEFT),
            band_right: place(BAND_RIGHT),
            scale: ratio,
        }
    }
}

/// A shot leaving the pouch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Playback rate for the launch sound
    pub pitch: f32,
}

#[derive(Debug, Clone)]
pub struct Slingshot {
    state: SlingshotState,
    ball_pos: Vec2,
    layout: SlingshotLayout,
    cursor: CursorHint,
}

impl Default for Slingshot {
    fn default() -> Self {
        Self::new(SlingshotLayout::default())
    }
}

impl Slingshot {
    pub fn new(layout: SlingshotLayout) -> Self {
        Self {
            state: SlingshotState::Idle,
            ball_pos: layout.ball_rest,
            layout,
            cursor: CursorHint::Arrow,
        }
    }

    pub fn state(&self) -> SlingshotState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SlingshotState::Aiming
    }

    /// Top-left of the ball sprite (resting or dragged)
    pub fn ball_pos(&self) -> Vec2 {
        self.ball_pos
    }

    pub fn layout(&self) -> &SlingshotLayout {
        &self.layout
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    /// Swap in a new layout (viewport resize); the ball snaps back to rest
    pub fn set_layout(&mut self, layout: SlingshotLayout) {
        self.layout = layout;
        self.ball_pos = layout.ball_rest;
    }

    /// Advance the state machine with this frame's pointer sample
    pub fn update(&mut self, pointer: &PointerState, tuning: &Tuning) -> Option<Launch> {
        let half = Vec2::splat(tuning.ball_half_size);

        match self.state {
            SlingshotState::Idle => {
                let hovering =
                    distance(self.layout.ball_rest + half, pointer.pos) <= tuning.grab_radius;
                self.cursor = if hovering {
                    CursorHint::Hand
                } else {
                    CursorHint::Arrow
                };
                if hovering && pointer.button_down {
                    self.state = SlingshotState::Aiming;
                    log::trace!("Slingshot grabbed at {:?}", pointer.pos);
                }
                None
            }
            SlingshotState::Aiming => {
                self.cursor = CursorHint::Hand;

                let overshoot = tuning.drag_overshoot;
                let target = pointer.pos - half;
                self.ball_pos = Vec2::new(
                    clamp(target.x, -overshoot, tuning.virtual_width + overshoot),
                    clamp(target.y, -overshoot, tuning.virtual_height + overshoot),
                );

                if pointer.button_down {
                    return None;
                }

                let launch = self.release(tuning);
                self.state = SlingshotState::Idle;
                self.ball_pos = self.layout.ball_rest;
                Some(launch)
            }
        }
    }

    fn release(&self, tuning: &Tuning) -> Launch {
        let dir = normalize(subtract(self.layout.anchor, self.ball_pos));
        let magnitude = distance(self.layout.anchor, self.ball_pos).abs() * tuning.launch_power;
        let pull = distance(self.layout.ball_rest, self.ball_pos).abs() * tuning.launch_power;

        Launch {
            pos: self.ball_pos,
            vel: scale(dir, magnitude),
            pitch: clamp(pull / tuning.pitch_divisor, tuning.pitch_min, tuning.pitch_max),
        }
    }
}
