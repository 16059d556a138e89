//! Presentation adapter contract
//!
//! The core never draws. [`draw_frame`] walks the game state and issues
//! draw calls against a [`Presenter`] supplied by the host (SDL, wgpu, a
//! terminal, or the recording [`CommandList`]).

use glam::Vec2;

use crate::consts::HUD_INSET;
use crate::sim::GameState;

/// Sprites the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Sky,
    Slingshot,
    Ball,
    Man,
}

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// `pos` is the left edge
    Left,
    /// `pos` is the right edge
    Right,
}

/// Drawing services consumed by [`draw_frame`]
pub trait Presenter {
    /// Draw a sprite with its top-left at `pos`. `size` of `None` means the
    /// sprite's natural size.
    fn draw_sprite(&mut self, id: SpriteId, pos: Vec2, size: Option<Vec2>);

    fn draw_line(&mut self, from: Vec2, to: Vec2);

    fn draw_text(&mut self, text: &str, pos: Vec2, align: TextAlign);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        id: SpriteId,
        pos: Vec2,
        size: Option<Vec2>,
    },
    Line {
        from: Vec2,
        to: Vec2,
    },
    Text {
        text: String,
        pos: Vec2,
        align: TextAlign,
    },
}

/// Presenter that records draw calls (headless hosts, tests)
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of sprites of `id` drawn
    pub fn sprite_count(&self, id: SpriteId) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { id: sprite, .. } if *sprite == id))
            .count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for CommandList {
    fn draw_sprite(&mut self, id: SpriteId, pos: Vec2, size: Option<Vec2>) {
        self.commands.push(DrawCommand::Sprite { id, pos, size });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            align,
        });
    }
}

/// Issue every draw call for one frame, back to front
pub fn draw_frame(state: &GameState, out: &mut dyn Presenter) {
    let screen = state.screen();
    let sling = &state.slingshot;
    let layout = sling.layout();

    out.draw_sprite(SpriteId::Sky, Vec2::ZERO, Some(screen));
    out.draw_sprite(SpriteId::Slingshot, layout.frame_pos, None);
    out.draw_sprite(SpriteId::Ball, sling.ball_pos(), None);

    for shot in state.store.shots.iter() {
        out.draw_sprite(SpriteId::Ball, shot.pos, None);
    }
    for man in state.store.men.iter() {
        out.draw_sprite(SpriteId::Man, man.pos, None);
    }

    out.draw_text(
        &format!("Score: {}", state.scores.score),
        Vec2::splat(HUD_INSET),
        TextAlign::Left,
    );
    if state.scores.has_high_score() {
        out.draw_text(
            &format!("Hi-Score: {}", state.scores.high_score),
            Vec2::new(screen.x - HUD_INSET, HUD_INSET),
            TextAlign::Right,
        );
    }

    // Bands run from the fork to the ball centre
    let ball_centre = sling.ball_pos() + Vec2::splat(state.tuning.ball_half_size);
    out.draw_line(layout.band_left, ball_centre);
    out.draw_line(layout.band_right, ball_centre);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(Tuning {
            seed: Some(1),
            ..Tuning::default()
        })
    }

    #[test]
    fn test_empty_frame() {
        let state = state();
        let mut out = CommandList::new();
        draw_frame(&state, &mut out);

        assert_eq!(out.sprite_count(SpriteId::Sky), 1);
        assert_eq!(out.sprite_count(SpriteId::Ball), 1);
        assert_eq!(out.sprite_count(SpriteId::Man), 0);
        assert_eq!(out.texts(), vec!["Score: 0"]);

        let lines: Vec<_> = out
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(
            lines,
            vec![
                (Vec2::new(310.0, 500.0), Vec2::new(366.0, 552.0)),
                (Vec2::new(418.0, 500.0), Vec2::new(366.0, 552.0)),
            ]
        );
    }

    #[test]
    fn test_entities_and_high_score() {
        let mut state = state();
        state.store.add_projectile(Vec2::new(10.0, 10.0), Vec2::ZERO);
        state.store.add_projectile(Vec2::new(20.0, 10.0), Vec2::ZERO);
        state.store.add_target(Vec2::new(30.0, 10.0), 50.0);
        state.scores.high_score = 12;
        state.scores.score = 3;

        let mut out = CommandList::new();
        draw_frame(&state, &mut out);

        assert_eq!(out.sprite_count(SpriteId::Ball), 3);
        assert_eq!(out.sprite_count(SpriteId::Man), 1);
        assert_eq!(out.texts(), vec!["Score: 3", "Hi-Score: 12"]);
        assert!(out.commands.contains(&DrawCommand::Text {
            text: "Hi-Score: 12".to_string(),
            pos: Vec2::new(776.0, 24.0),
            align: TextAlign::Right,
        }));
    }
}
