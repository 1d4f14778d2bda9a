//! Motion integration and field culling
//!
//! Bullets rise, meteors and power-ups fall, each by their per-tick speed.
//! Anything that leaves the field (plus a margin) is dropped from its
//! collection. The player never integrates; its position comes straight
//! from the staged pointer intent, clamped to the field.

use glam::Vec2;

use super::state::GameState;
use crate::consts::*;

/// Advance every entity one tick and cull whatever left the field
pub(crate) fn integrate(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= BULLET_SPEED;
    }
    state.bullets.retain(|b| b.pos.y > BULLET_CULL_Y);

    for meteor in &mut state.meteors {
        meteor.pos.y += meteor.speed;
    }
    state
        .meteors
        .retain(|m| m.pos.y < FIELD_HEIGHT + BOTTOM_CULL_MARGIN);

    for powerup in &mut state.powerups {
        powerup.pos.y += POWERUP_FALL_SPEED;
    }
    state
        .powerups
        .retain(|p| p.pos.y < FIELD_HEIGHT + BOTTOM_CULL_MARGIN);
}

/// Clamp a desired top-left player position so the hitbox stays in-field
pub fn clamp_player_pos(pos: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(0.0, FIELD_WIDTH - PLAYER_SIZE),
        pos.y.clamp(0.0, FIELD_HEIGHT - PLAYER_SIZE),
    )
}
