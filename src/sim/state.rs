//! Game state and core simulation types
//!
//! The whole run (player, entity collections, score, effect timers) is one
//! owned record. External events stage intent through [`super::TickInput`]
//! or call the phase-transition methods here; nothing else mutates state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::difficulty::Difficulty;
use crate::consts::*;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Menu shown, no run active
    Idle,
    /// Active gameplay; the only phase in which ticks execute
    Running,
    /// Run frozen; no simulation time advances
    Paused,
    /// Run ended by a fatal meteor hit
    GameOver,
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    DoubleShot,
    RapidFire,
}

/// The player ship - a fixed-size square tracked to the pointer
#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// Top-left corner of the hitbox
    pub pos: Vec2,
}

impl Player {
    pub fn at_start() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::square(self.pos, PLAYER_SIZE)
    }

    /// Horizontal center, where bullets originate
    pub fn center_x(&self) -> f32 {
        self.pos.x + PLAYER_SIZE / 2.0
    }
}

/// A falling meteor
#[derive(Debug, Clone, Copy)]
pub struct Meteor {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Descent speed in units per tick
    pub speed: f32,
    /// Side length of the square hitbox
    pub size: f32,
}

impl Meteor {
    pub fn hitbox(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    /// Hitbox shrunk to forgive grazing contact with the player
    pub fn forgiving_hitbox(&self) -> Aabb {
        self.hitbox().shrink(METEOR_HIT_INSET)
    }
}

/// A player bullet, rising at a fixed speed
#[derive(Debug, Clone, Copy)]
pub struct Bullet {
    pub id: u32,
    /// Top-left corner of the thin bullet box
    pub pos: Vec2,
}

impl Bullet {
    pub fn hitbox(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }
}

/// A collectible power-up, descending slower than any meteor
#[derive(Debug, Clone, Copy)]
pub struct PowerUp {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn hitbox(&self) -> Aabb {
        Aabb::square(self.pos, POWERUP_SIZE)
    }
}

/// Per-kind timestamps of the most recent spawn (host clock, ms)
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnTimers {
    pub bullet_ms: f64,
    pub meteor_ms: f64,
    pub powerup_ms: f64,
}

impl SpawnTimers {
    /// Shift all timestamps forward, used to absorb time spent paused so
    /// resuming never produces a catch-up burst of spawns.
    fn shift(&mut self, delta_ms: f64) {
        self.bullet_ms += delta_ms;
        self.meteor_ms += delta_ms;
        self.powerup_ms += delta_ms;
    }
}

/// A timed effect deadline, tagged with the run that armed it.
///
/// Deadlines are wall-clock, so an effect lapses on schedule even while the
/// run is paused. The generation tag makes a deadline from a finished run
/// inert: it can never leak into the run that follows.
#[derive(Debug, Clone, Copy)]
struct EffectTimer {
    until_ms: f64,
    generation: u64,
}

impl EffectTimer {
    fn active(&self, now_ms: f64, generation: u64) -> bool {
        self.generation == generation && now_ms < self.until_ms
    }
}

/// Currently armed power-up effects
#[derive(Debug, Clone, Copy, Default)]
struct ActiveEffects {
    double_shot: Option<EffectTimer>,
    rapid_fire: Option<EffectTimer>,
}

impl ActiveEffects {
    fn activate(&mut self, kind: PowerUpKind, now_ms: f64, generation: u64) {
        match kind {
            PowerUpKind::DoubleShot => {
                self.double_shot = Some(EffectTimer {
                    until_ms: now_ms + DOUBLE_SHOT_MS,
                    generation,
                });
            }
            PowerUpKind::RapidFire => {
                self.rapid_fire = Some(EffectTimer {
                    until_ms: now_ms + RAPID_FIRE_MS,
                    generation,
                });
            }
        }
    }

    fn clear(&mut self) {
        self.double_shot = None;
        self.rapid_fire = None;
    }
}

/// Read-only view of everything the surrounding UI may display
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimSnapshot {
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub weapon_tier: u32,
    pub double_shot: bool,
    pub rapid_fire: bool,
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducible spawning
    pub seed: u64,
    pub phase: Phase,
    pub score: u32,
    pub player: Player,
    /// Live meteors, in spawn (id) order
    pub meteors: Vec<Meteor>,
    /// Live bullets, in spawn (id) order
    pub bullets: Vec<Bullet>,
    /// Live power-ups, in spawn (id) order
    pub powerups: Vec<PowerUp>,
    pub timers: SpawnTimers,
    effects: ActiveEffects,
    /// Bumped on every `start`; invalidates effect timers from prior runs
    generation: u64,
    /// Host timestamp when the run was paused, if it is
    paused_at_ms: Option<f64>,
    next_id: u32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh state in the `Idle` phase
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: Phase::Idle,
            score: 0,
            player: Player::at_start(),
            meteors: Vec::new(),
            bullets: Vec::new(),
            powerups: Vec::new(),
            timers: SpawnTimers::default(),
            effects: ActiveEffects::default(),
            generation: 0,
            paused_at_ms: None,
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Allocate a new entity ID (unique per state, monotonically increasing)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start (or restart) a run: reset score, entities, spawn timers and the
    /// player, and bump the generation so stale effect timers cannot fire.
    pub fn start(&mut self) {
        self.score = 0;
        self.player = Player::at_start();
        self.meteors.clear();
        self.bullets.clear();
        self.powerups.clear();
        self.timers = SpawnTimers::default();
        self.effects.clear();
        self.generation += 1;
        self.paused_at_ms = None;
        self.phase = Phase::Running;
        log::info!("run started (generation {})", self.generation);
    }

    /// Toggle `Running` ⇄ `Paused`. A no-op unless a run is active. Resuming
    /// shifts the spawn timers by the pause duration: simulation time simply
    /// does not pass while paused. Effect deadlines are left untouched and
    /// keep lapsing on the wall clock.
    pub fn toggle_pause(&mut self, now_ms: f64) {
        match self.phase {
            Phase::Running => {
                self.paused_at_ms = Some(now_ms);
                self.phase = Phase::Paused;
                log::info!("paused");
            }
            Phase::Paused => {
                if let Some(paused_at) = self.paused_at_ms.take() {
                    self.timers.shift((now_ms - paused_at).max(0.0));
                }
                self.phase = Phase::Running;
                log::info!("resumed");
            }
            Phase::Idle | Phase::GameOver => {}
        }
    }

    /// Leave the game-over screen for the menu
    pub fn return_to_menu(&mut self) {
        if self.phase == Phase::GameOver {
            self.phase = Phase::Idle;
        }
    }

    /// End the run. Called by the tick body on a fatal meteor hit.
    pub(crate) fn end_run(&mut self) {
        self.phase = Phase::GameOver;
        log::info!("game over at score {}", self.score);
    }

    /// Pacing parameters for the current score
    pub fn difficulty(&self) -> Difficulty {
        Difficulty::for_score(self.score)
    }

    pub(crate) fn activate_effect(&mut self, kind: PowerUpKind, now_ms: f64) {
        self.effects.activate(kind, now_ms, self.generation);
    }

    /// Whether a collected double-shot effect is live at `now_ms`
    pub fn double_shot_active(&self, now_ms: f64) -> bool {
        self.effects
            .double_shot
            .is_some_and(|t| t.active(now_ms, self.generation))
    }

    /// Whether a collected rapid-fire effect is live at `now_ms`.
    ///
    /// Observable only; the flag never alters the bullet interval.
    pub fn rapid_fire_active(&self, now_ms: f64) -> bool {
        self.effects
            .rapid_fire
            .is_some_and(|t| t.active(now_ms, self.generation))
    }

    /// Observable outputs for the surrounding UI
    pub fn snapshot(&self, now_ms: f64, high_score: u32) -> SimSnapshot {
        let diff = self.difficulty();
        SimSnapshot {
            phase: self.phase,
            score: self.score,
            high_score,
            level: diff.level,
            weapon_tier: diff.weapon_tier,
            double_shot: self.double_shot_active(now_ms),
            rapid_fire: self.rapid_fire_active(now_ms),
        }
    }
}
