//! Per-frame simulation tick
//!
//! The host schedules one tick per display frame while the run is in the
//! `Running` phase and stops scheduling the moment it leaves it, so a tick
//! can never mutate a paused or finished run. Input handlers only stage
//! intent in [`TickInput`]; the tick applies it at the start of the frame.

use glam::Vec2;

use super::collision;
use super::motion::{self, clamp_player_pos};
use super::spawn;
use super::state::{GameState, Phase, PowerUpKind};
use crate::consts::*;

/// Staged input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest pointer position over the field, if it moved
    pub pointer: Option<Vec2>,
}

impl TickInput {
    /// Stage a pointer intent. Motion is discarded unless the run is in
    /// `Running`: while paused, on the menu, or after game over no frames
    /// execute, so anything staged there would otherwise survive until the
    /// first tick after resume/restart and teleport the player.
    pub fn stage_pointer(&mut self, phase: Phase, pos: Vec2) {
        if phase == Phase::Running {
            self.pointer = Some(pos);
        }
    }
}

/// What happened during a tick, for the host to react to
#[derive(Debug, Clone, Default)]
pub struct TickEvents {
    /// Meteors destroyed by bullets this tick
    pub kills: u32,
    /// Power-ups collected this tick
    pub collected: Vec<PowerUpKind>,
    /// The run ended this tick
    pub game_over: bool,
}

/// Advance the simulation by one frame at host time `now_ms`.
///
/// Order within the tick: apply pointer, spawn, integrate and cull, then
/// collide - bullets against meteors first, pickups second, the fatal
/// player check last, so a pickup in the final tick is still awarded.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> TickEvents {
    let mut events = TickEvents::default();

    // The host cancels scheduling on any phase change; this guard only
    // keeps a stray call from corrupting a non-running state.
    if state.phase != Phase::Running {
        return events;
    }

    if let Some(pointer) = input.pointer {
        state.player.pos = clamp_player_pos(pointer - Vec2::splat(PLAYER_SIZE / 2.0));
    }

    spawn::run_spawners(state, now_ms);
    motion::integrate(state);

    let kills = collision::resolve_bullet_meteor(&mut state.bullets, &mut state.meteors);
    if kills > 0 {
        state.score += kills * KILL_BONUS;
        events.kills = kills;
    }

    let collected = collision::resolve_player_powerups(&state.player, &mut state.powerups);
    for kind in &collected {
        state.score += COLLECT_BONUS;
        state.activate_effect(*kind, now_ms);
        log::info!("collected {kind:?}");
    }
    events.collected = collected;

    if collision::player_hit_meteor(&state.player, &state.meteors) {
        state.end_run();
        events.game_over = true;
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, Meteor, PowerUp};

    fn running_state() -> GameState {
        let mut state = GameState::new(7);
        state.start();
        state
    }

    fn meteor_on_player(state: &GameState, id: u32) -> Meteor {
        Meteor {
            id,
            // Dead center on the player; stays fatal after one tick of motion
            pos: state.player.pos,
            speed: 1.0,
            size: 40.0,
        }
    }

    #[test]
    fn ticks_are_inert_outside_running() {
        let mut state = GameState::new(7);
        let events = tick(&mut state, &TickInput::default(), 1000.0);
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.bullets.is_empty());
        assert!(!events.game_over);

        state.start();
        state.toggle_pause(0.0);
        tick(&mut state, &TickInput::default(), 1000.0);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn pointer_moves_the_player_clamped() {
        let mut state = running_state();
        let input = TickInput {
            pointer: Some(Vec2::new(-100.0, -100.0)),
        };
        tick(&mut state, &input, 1.0);
        assert_eq!(state.player.pos, Vec2::ZERO);

        let input = TickInput {
            pointer: Some(Vec2::new(10_000.0, 10_000.0)),
        };
        tick(&mut state, &input, 2.0);
        assert_eq!(
            state.player.pos,
            Vec2::new(FIELD_WIDTH - PLAYER_SIZE, FIELD_HEIGHT - PLAYER_SIZE)
        );
    }

    #[test]
    fn bullet_kill_scores_fifteen() {
        let mut state = running_state();
        state.bullets.push(Bullet {
            id: 100,
            pos: Vec2::new(100.0, 100.0 + BULLET_SPEED),
        });
        state.meteors.push(Meteor {
            id: 101,
            pos: Vec2::new(98.0, 94.0),
            speed: 1.0,
            size: 40.0,
        });

        let events = tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(events.kills, 1);
        assert_eq!(state.score, KILL_BONUS);
        assert!(state.bullets.is_empty());
        assert!(state.meteors.is_empty());
    }

    #[test]
    fn fatal_meteor_ends_the_run_and_halts_it() {
        let mut state = running_state();
        let meteor = meteor_on_player(&state, 50);
        state.meteors.push(meteor);

        let events = tick(&mut state, &TickInput::default(), 1.0);
        assert!(events.game_over);
        assert_eq!(state.phase, Phase::GameOver);

        // Later ticks are no-ops: nothing spawns, nothing moves
        let frozen = state.meteors[0].pos;
        tick(&mut state, &TickInput::default(), 5000.0);
        assert_eq!(state.meteors[0].pos, frozen);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn pickup_in_the_fatal_tick_still_pays_out() {
        let mut state = running_state();
        let meteor = meteor_on_player(&state, 50);
        state.meteors.push(meteor);
        state.powerups.push(PowerUp {
            id: 51,
            pos: state.player.pos - Vec2::splat(POWERUP_FALL_SPEED),
            kind: PowerUpKind::RapidFire,
        });

        let events = tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(events.collected, vec![PowerUpKind::RapidFire]);
        assert_eq!(state.score, COLLECT_BONUS);
        assert!(events.game_over);
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn restart_after_game_over_resets_the_run() {
        let mut state = running_state();
        state.score = 500;
        state.meteors.push(meteor_on_player(&state, 50));
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(state.phase, Phase::GameOver);

        state.start();
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.score, 0);
        assert!(state.meteors.is_empty());
        assert!(state.bullets.is_empty());
        assert!(state.powerups.is_empty());
        assert_eq!(
            state.player.pos,
            Vec2::new(PLAYER_START_X, PLAYER_START_Y)
        );
    }

    #[test]
    fn score_never_decreases_during_a_run() {
        let mut state = running_state();
        let mut last_score = 0;
        let mut now = 0.0;
        for _ in 0..600 {
            now += 1000.0 / 60.0;
            // Park the player in a corner so the run survives
            let input = TickInput {
                pointer: Some(Vec2::new(0.0, FIELD_HEIGHT)),
            };
            tick(&mut state, &input, now);
            assert!(state.score >= last_score);
            last_score = state.score;
            if state.phase != Phase::Running {
                break;
            }
        }
    }

    #[test]
    fn pointer_motion_outside_running_is_discarded() {
        let mut state = running_state();
        let mut input = TickInput::default();
        tick(&mut state, &input, 1.0);
        let parked = state.player.pos;

        // Mouse moves while paused: nothing may be staged
        state.toggle_pause(2.0);
        input.stage_pointer(state.phase, Vec2::new(50.0, 50.0));
        assert!(input.pointer.is_none());

        // The first tick after resume leaves the player where it was
        state.toggle_pause(3.0);
        tick(&mut state, &input, 4.0);
        assert_eq!(state.player.pos, parked);

        // Staging works again now that the run is live
        input.stage_pointer(state.phase, Vec2::new(50.0, 50.0));
        assert!(input.pointer.is_some());
    }

    #[test]
    fn pointer_motion_on_the_menu_is_discarded() {
        let mut state = GameState::new(7);
        let mut input = TickInput::default();
        input.stage_pointer(state.phase, Vec2::new(50.0, 50.0));
        assert!(input.pointer.is_none());

        state.start();
        state.end_run();
        input.stage_pointer(state.phase, Vec2::new(50.0, 50.0));
        assert!(input.pointer.is_none());
    }

    #[test]
    fn resume_does_not_burst_spawn_meteors() {
        let mut state = running_state();
        // Advance to just before the first meteor spawn (interval 1800 ms)
        tick(&mut state, &TickInput::default(), 1700.0);
        assert!(state.meteors.is_empty());

        // A long pause must not count against the spawn timer
        state.toggle_pause(1700.0);
        state.toggle_pause(601_700.0);
        tick(&mut state, &TickInput::default(), 601_750.0);
        assert!(state.meteors.is_empty());
    }
}
