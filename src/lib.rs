//! Meteor Storm - an embeddable arcade mini-game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, run state)
//! - `highscore`: Single persisted high score record
//! - `settings`: Input/auto-pause preferences

pub mod highscore;
pub mod settings;
pub mod sim;

pub use highscore::HighScore;
pub use settings::Settings;
pub use sim::{GameState, Phase, SimSnapshot, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Logical play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player hitbox side length
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Fixed starting position (centered horizontally, near the bottom)
    pub const PLAYER_START_X: f32 = FIELD_WIDTH / 2.0 - PLAYER_SIZE / 2.0;
    pub const PLAYER_START_Y: f32 = FIELD_HEIGHT - 100.0;

    /// Bullet defaults - fixed upward speed, thin tall hitbox
    pub const BULLET_SPEED: f32 = 8.0;
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    /// Bullets are culled once fully above the field top
    pub const BULLET_CULL_Y: f32 = -10.0;

    /// Meteors enter above the visible field
    pub const METEOR_SPAWN_Y: f32 = -60.0;
    /// Horizontal spawn range leaves room for the widest meteor
    pub const METEOR_SPAWN_SPAN: f32 = 60.0;
    /// Meteors and power-ups are culled this far below the field bottom
    pub const BOTTOM_CULL_MARGIN: f32 = 100.0;
    /// Player-meteor checks shrink the meteor box to forgive near-misses
    pub const METEOR_HIT_INSET: f32 = 10.0;

    /// Power-up defaults - fixed slow descent, square pickup box
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    pub const POWERUP_SPAWN_Y: f32 = -40.0;
    pub const POWERUP_SPAWN_SPAN: f32 = 40.0;

    /// Score bonuses
    pub const KILL_BONUS: u32 = 15;
    pub const COLLECT_BONUS: u32 = 25;

    /// Timed effect durations (wall-clock ms)
    pub const DOUBLE_SHOT_MS: f64 = 10_000.0;
    pub const RAPID_FIRE_MS: f64 = 8_000.0;
    /// Lateral offset of each bullet from center when double-firing
    pub const DOUBLE_SHOT_OFFSET: f32 = 8.0;
}
