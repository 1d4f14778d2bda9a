//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per scheduled frame, driven by the host's millisecond clock
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use difficulty::Difficulty;
pub use motion::clamp_player_pos;
pub use state::{
    Bullet, GameState, Meteor, Phase, Player, PowerUp, PowerUpKind, SimSnapshot,
};
pub use tick::{TickEvents, TickInput, tick};
