//! Per-frame simulation step
//!
//! Order within a frame: slingshot input, shot physics and culling, man
//! descent, round-end check, then shot/man collisions.

use glam::Vec2;

use super::slingshot::PointerState;
use super::state::{GameEvent, GameState};
use super::store::EntityStore;
use crate::geometry::distance;

/// Input for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub pointer: PointerState,
}

impl TickInput {
    pub fn pointer(x: f32, y: f32, button_down: bool) -> Self {
        Self {
            pointer: PointerState::new(x, y, button_down),
        }
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.elapsed += f64::from(dt);

    if let Some(launch) = state.slingshot.update(&input.pointer, &state.tuning) {
        state.store.add_projectile(launch.pos, launch.vel);
        log::debug!("Launched shot at {:?} vel {:?}", launch.pos, launch.vel);
        state.push_event(GameEvent::Launched {
            pos: launch.pos,
            vel: launch.vel,
            pitch: launch.pitch,
        });
    }

    update_shots(state, dt);
    update_men(state, dt);
}

/// True while `pos` is inside the screen widened by `margin` on every side
pub fn in_play_area(pos: Vec2, screen: Vec2, margin: f32) -> bool {
    !(pos.x > screen.x + margin
        || pos.x < -margin
        || pos.y > screen.y + margin
        || pos.y < -margin)
}

fn update_shots(state: &mut GameState, dt: f32) {
    let gravity = state.tuning.gravity;
    let margin = state.tuning.cull_margin;
    let screen = state.screen();

    for shot in state.store.shots.iter_mut() {
        shot.vel.y += gravity * dt;
        shot.pos += shot.vel * dt;
    }

    let culled = state
        .store
        .shots
        .retain(|shot| in_play_area(shot.pos, screen, margin));
    if culled > 0 {
        log::trace!("Culled {} shots", culled);
        state.push_event(GameEvent::ShotsCulled { count: culled });
    }
}

fn update_men(state: &mut GameState, dt: f32) {
    let ground = state.tuning.virtual_height;

    for man in state.store.men.iter_mut() {
        man.pos.y += man.speed * dt;
    }

    if state.store.men.iter().any(|man| man.pos.y > ground) {
        state.end_round();
        return;
    }

    // Shots pass through: only the man is removed, and each man can be hit
    // by at most one shot per frame.
    let hit_radius = state.tuning.hit_radius;
    let EntityStore { shots, men } = &mut state.store;
    let shots = shots.as_slice();
    let mut hits = Vec::new();
    // One pass over men in storage order; the first shot in reach counts.
    // Removal happens inside retain, so no index needs adjusting.
    men.retain(|man| {
        let hit = shots
            .iter()
            .any(|shot| distance(shot.pos, man.pos) <= hit_radius);
        if hit {
            hits.push(man.pos);
        }
        !hit
    });

    for pos in hits {
        state.scores.record_hit();
        state.push_event(GameEvent::TargetHit {
            pos,
            score: state.scores.score,
        });
    }
}
