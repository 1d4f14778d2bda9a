//! Collision detection and response
//!
//! Everything in the field is an axis-aligned box, so overlap is the strict
//! AABB test. The three checks run in a fixed order each tick (bullets
//! against meteors, then power-up pickups, then the fatal player check), so
//! a power-up grabbed on the player's last tick still pays out.

use glam::Vec2;

use super::state::{Bullet, Meteor, Player, PowerUp, PowerUpKind};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn square(pos: Vec2, side: f32) -> Self {
        Self::from_pos_size(pos, Vec2::splat(side))
    }

    /// Inset every edge by `amount`
    pub fn shrink(&self, amount: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(amount),
            max: self.max - Vec2::splat(amount),
        }
    }

    /// Strict overlap - shared edges do not count as contact
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Resolve bullet-meteor hits: each overlapping pair removes both entities.
/// Returns the number of kills; every simultaneous hit in the tick counts.
pub fn resolve_bullet_meteor(bullets: &mut Vec<Bullet>, meteors: &mut Vec<Meteor>) -> u32 {
    let mut dead_bullets: Vec<u32> = Vec::new();
    let mut dead_meteors: Vec<u32> = Vec::new();

    for bullet in bullets.iter() {
        for meteor in meteors.iter() {
            if dead_meteors.contains(&meteor.id) {
                continue;
            }
            if bullet.hitbox().overlaps(&meteor.hitbox()) {
                dead_bullets.push(bullet.id);
                dead_meteors.push(meteor.id);
                break; // one kill per bullet
            }
        }
    }

    bullets.retain(|b| !dead_bullets.contains(&b.id));
    meteors.retain(|m| !dead_meteors.contains(&m.id));
    dead_meteors.len() as u32
}

/// Remove every power-up the player overlaps and return the collected kinds
pub fn resolve_player_powerups(player: &Player, powerups: &mut Vec<PowerUp>) -> Vec<PowerUpKind> {
    let hitbox = player.hitbox();
    let mut collected = Vec::new();
    powerups.retain(|p| {
        if hitbox.overlaps(&p.hitbox()) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });
    collected
}

/// Fatal check: does the player overlap any meteor's forgiving hitbox?
pub fn player_hit_meteor(player: &Player, meteors: &[Meteor]) -> bool {
    let hitbox = player.hitbox();
    meteors
        .iter()
        .any(|m| hitbox.overlaps(&m.forgiving_hitbox()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meteor(id: u32, x: f32, y: f32, size: f32) -> Meteor {
        Meteor {
            id,
            pos: Vec2::new(x, y),
            speed: 1.0,
            size,
        }
    }

    fn bullet(id: u32, x: f32, y: f32) -> Bullet {
        Bullet {
            id,
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn bullet_inside_meteor_kills_it() {
        // Bullet box 5x10 at (100,100) against a 40-unit meteor at (98,95)
        let mut bullets = vec![bullet(1, 100.0, 100.0)];
        let mut meteors = vec![meteor(2, 98.0, 95.0, 40.0)];

        let kills = resolve_bullet_meteor(&mut bullets, &mut meteors);
        assert_eq!(kills, 1);
        assert!(bullets.is_empty());
        assert!(meteors.is_empty());
    }

    #[test]
    fn separated_boxes_do_not_collide() {
        let mut bullets = vec![bullet(1, 100.0, 100.0)];
        let mut meteors = vec![meteor(2, 300.0, 300.0, 40.0)];

        assert_eq!(resolve_bullet_meteor(&mut bullets, &mut meteors), 0);
        assert_eq!(bullets.len(), 1);
        assert_eq!(meteors.len(), 1);
    }

    #[test]
    fn touching_edges_are_not_contact() {
        let a = Aabb::square(Vec2::ZERO, 10.0);
        let b = Aabb::square(Vec2::new(10.0, 0.0), 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn one_bullet_takes_at_most_one_meteor() {
        // Two meteors stacked over the same bullet
        let mut bullets = vec![bullet(1, 100.0, 100.0)];
        let mut meteors = vec![meteor(2, 90.0, 95.0, 40.0), meteor(3, 92.0, 96.0, 40.0)];

        let kills = resolve_bullet_meteor(&mut bullets, &mut meteors);
        assert_eq!(kills, 1);
        assert!(bullets.is_empty());
        assert_eq!(meteors.len(), 1);
        assert_eq!(meteors[0].id, 3);
    }

    #[test]
    fn simultaneous_kills_all_apply() {
        let mut bullets = vec![bullet(1, 100.0, 100.0), bullet(2, 400.0, 200.0)];
        let mut meteors = vec![
            meteor(3, 95.0, 95.0, 40.0),
            meteor(4, 390.0, 190.0, 40.0),
            meteor(5, 700.0, 50.0, 40.0),
        ];

        let kills = resolve_bullet_meteor(&mut bullets, &mut meteors);
        assert_eq!(kills, 2);
        assert!(bullets.is_empty());
        assert_eq!(meteors.len(), 1);
        assert_eq!(meteors[0].id, 5);
    }

    #[test]
    fn overlapping_powerups_are_collected() {
        let player = Player {
            pos: Vec2::new(100.0, 100.0),
        };
        let mut powerups = vec![
            PowerUp {
                id: 1,
                pos: Vec2::new(110.0, 110.0),
                kind: PowerUpKind::DoubleShot,
            },
            PowerUp {
                id: 2,
                pos: Vec2::new(500.0, 500.0),
                kind: PowerUpKind::RapidFire,
            },
        ];

        let collected = resolve_player_powerups(&player, &mut powerups);
        assert_eq!(collected, vec![PowerUpKind::DoubleShot]);
        assert_eq!(powerups.len(), 1);
        assert_eq!(powerups[0].id, 2);
    }

    #[test]
    fn grazing_meteor_contact_is_forgiven() {
        let player = Player {
            pos: Vec2::new(100.0, 100.0),
        };
        // Meteor overlaps the player by 5 units, inside the 10-unit inset
        let grazing = vec![meteor(1, 135.0, 100.0, 40.0)];
        assert!(!player_hit_meteor(&player, &grazing));

        // Deeper overlap is fatal
        let fatal = vec![meteor(1, 120.0, 100.0, 40.0)];
        assert!(player_hit_meteor(&player, &fatal));
    }
}
