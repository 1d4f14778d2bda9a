//! Entity spawning
//!
//! Each kind spawns when enough time has passed since its last spawn, with
//! intervals taken from the difficulty model and jitter from the run's
//! seeded RNG. Timestamps come from the host clock in milliseconds.

use glam::Vec2;
use rand::Rng;

use super::state::{Bullet, GameState, Meteor, PowerUp, PowerUpKind};
use crate::consts::*;

/// Run all three spawners for one tick at host time `now_ms`
pub(crate) fn run_spawners(state: &mut GameState, now_ms: f64) {
    let diff = state.difficulty();

    if now_ms - state.timers.bullet_ms > diff.bullet_interval_ms {
        spawn_bullets(state, now_ms);
        state.timers.bullet_ms = now_ms;
    }

    if now_ms - state.timers.meteor_ms > diff.meteor_interval_ms {
        spawn_meteor(state);
        state.timers.meteor_ms = now_ms;
    }

    if now_ms - state.timers.powerup_ms > diff.powerup_interval_ms {
        spawn_powerup(state);
        state.timers.powerup_ms = now_ms;
    }
}

/// Emit one bullet from the player's center-top, or a symmetric pair when a
/// double-shot effect is live or the weapon tier forces it
fn spawn_bullets(state: &mut GameState, now_ms: f64) {
    let center_x = state.player.center_x();
    let y = state.player.pos.y;
    let double = state.double_shot_active(now_ms) || state.difficulty().forces_double_shot();

    if double {
        let left = state.next_entity_id();
        let right = state.next_entity_id();
        state.bullets.push(Bullet {
            id: left,
            pos: Vec2::new(center_x - DOUBLE_SHOT_OFFSET, y),
        });
        state.bullets.push(Bullet {
            id: right,
            pos: Vec2::new(center_x + DOUBLE_SHOT_OFFSET, y),
        });
    } else {
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(center_x, y),
        });
    }
}

/// Drop one meteor above the field at a random x, with per-spawn jitter on
/// speed and size on top of the difficulty baseline
fn spawn_meteor(state: &mut GameState) {
    let diff = state.difficulty();
    let id = state.next_entity_id();
    let x = state.rng.random_range(0.0..FIELD_WIDTH - METEOR_SPAWN_SPAN);
    let speed = diff.meteor_speed + state.rng.random_range(0.0..1.0);
    let size = diff.meteor_size + state.rng.random_range(0.0..10.0);

    state.meteors.push(Meteor {
        id,
        pos: Vec2::new(x, METEOR_SPAWN_Y),
        speed,
        size,
    });
}

/// Drop one power-up of a uniformly random kind
fn spawn_powerup(state: &mut GameState) {
    let id = state.next_entity_id();
    let x = state.rng.random_range(0.0..FIELD_WIDTH - POWERUP_SPAWN_SPAN);
    let kind = if state.rng.random_bool(0.5) {
        PowerUpKind::DoubleShot
    } else {
        PowerUpKind::RapidFire
    };

    state.powerups.push(PowerUp {
        id,
        pos: Vec2::new(x, POWERUP_SPAWN_Y),
        kind,
    });
}
