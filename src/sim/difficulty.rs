//! Difficulty scaling
//!
//! Every pacing parameter is a pure function of the current score. Nothing
//! here is stored on the game state; callers recompute on demand so the
//! level and weapon tier can never drift out of sync with the score.

/// Derived pacing parameters for a given score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Level climbs by one every 100 points
    pub level: u32,
    /// Weapon tier climbs by one every two levels
    pub weapon_tier: u32,
    /// Time between meteor spawns, floored at 800 ms
    pub meteor_interval_ms: f64,
    /// Base meteor descent speed (units per tick), before per-spawn jitter
    pub meteor_speed: f32,
    /// Base meteor side length, floored at 30, before per-spawn jitter
    pub meteor_size: f32,
    /// Time between shots, floored at 100 ms
    pub bullet_interval_ms: f64,
    /// Time between power-up drops, floored at 5000 ms
    pub powerup_interval_ms: f64,
}

impl Difficulty {
    /// Compute all pacing parameters for the given score.
    ///
    /// All intervals and sizes clamp to hard floors; no output can reach
    /// zero no matter how large the score grows.
    pub fn for_score(score: u32) -> Self {
        let level = score / 100 + 1;
        let weapon_tier = level / 2 + 1;
        Self {
            level,
            weapon_tier,
            meteor_interval_ms: (2000.0 - f64::from(level) * 200.0).max(800.0),
            meteor_speed: 1.0 + level as f32 * 0.3,
            meteor_size: (50.0 - level as f32 * 2.0).max(30.0),
            bullet_interval_ms: (200.0 - f64::from(weapon_tier) * 15.0).max(100.0),
            powerup_interval_ms: (10_000.0 - f64::from(level) * 500.0).max(5000.0),
        }
    }

    /// Whether the weapon tier alone forces a double shot
    pub fn forces_double_shot(&self) -> bool {
        self.weapon_tier >= 3
    }
}
