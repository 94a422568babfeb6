//! Random enemy spawning and enemy fire.
//!
//! Every tick each enemy size rolls against its spawn probability and, on
//! success, enters just above the top edge at a random x. Every live enemy
//! then rolls against the fire probability and drops a bullet from its
//! lower edge. All randomness comes from one seeded [`fastrand::Rng`] so a
//! run can be replayed.

use fastrand::Rng;
use glam::Vec2;

use crate::components::entitypool::{EntityPool, SpawnOptions};
use crate::resources::screensize::ScreenSize;

/// Enemy bullet speed in pixels per tick.
pub const ENEMY_BULLET_SPEED: f32 = 1.5;

/// How one enemy size enters the playfield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRule {
    /// Chance per tick, in `[0, 1]`.
    pub probability: f32,
    pub health: i32,
    /// Downward speed range in pixels per tick.
    pub speed_min: f32,
    pub speed_max: f32,
}

impl SpawnRule {
    pub fn new(probability: f32, health: i32, speed_min: f32, speed_max: f32) -> Self {
        Self {
            probability,
            health,
            speed_min,
            speed_max,
        }
    }
}

/// Sample a random f32 in the range [min, max].
#[inline]
fn random_f32_range(rng: &mut Rng, min: f32, max: f32) -> f32 {
    let range = max - min;
    if range < f32::EPSILON {
        return min;
    }
    min + rng.f32() * range
}

/// Roll once for `rule` and spawn into `pool` on success.
///
/// Returns true when an enemy was requested. A full pool still consumes the
/// roll and drops the spawn.
pub fn spawn_enemy(
    rng: &mut Rng,
    pool: &mut EntityPool,
    rule: &SpawnRule,
    screen: &ScreenSize,
) -> bool {
    if rng.f32() >= rule.probability {
        return false;
    }
    let size = pool.sprite().panel_size;
    let x = random_f32_range(rng, 0.0, (screen.w as f32 - size.x).max(0.0));
    let speed = random_f32_range(rng, rule.speed_min, rule.speed_max);
    pool.spawn(
        SpawnOptions::at(x, -size.y)
            .with_velocity(0.0, speed)
            .with_health(rule.health),
    );
    true
}

/// Let every enemy in `enemies` roll to fire into `bullets`.
///
/// Returns how many shots were requested.
pub fn enemy_fire(
    rng: &mut Rng,
    enemies: &EntityPool,
    bullets: &mut EntityPool,
    probability: f32,
) -> u32 {
    let shot = bullets.sprite().panel_size;
    let mut fired = 0;
    for i in 0..enemies.len() {
        if rng.f32() >= probability {
            continue;
        }
        let (min, max) = enemies
            .sprite()
            .panel_rect(enemies.batch.positions[i], enemies.batch.scales[i]);
        let origin = Vec2::new((min.x + max.x - shot.x) * 0.5, max.y);
        bullets.spawn(
            SpawnOptions::at(origin.x, origin.y).with_velocity(0.0, ENEMY_BULLET_SPEED),
        );
        fired += 1;
    }
    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::components::sprite::SpriteDescriptor;

    fn pool(w: f32, h: f32) -> EntityPool {
        EntityPool::new(Arc::new(SpriteDescriptor::new("test", w, h)))
    }

    #[test]
    fn test_certain_spawn_enters_above_top_edge() {
        let mut rng = Rng::with_seed(7);
        let mut enemies = pool(16.0, 16.0);
        let screen = ScreenSize::new(200, 100);
        let rule = SpawnRule::new(1.0, 3, 0.5, 1.0);
        assert!(spawn_enemy(&mut rng, &mut enemies, &rule, &screen));
        assert_eq!(enemies.len(), 1);
        let pos = enemies.batch.positions[0];
        assert_eq!(pos.y, -16.0);
        assert!(pos.x >= 0.0 && pos.x <= 184.0);
        assert!(enemies.velocities[0].y >= 0.5 && enemies.velocities[0].y <= 1.0);
        assert_eq!(enemies.healths[0], 3);
    }

    #[test]
    fn test_zero_probability_never_spawns() {
        let mut rng = Rng::with_seed(7);
        let mut enemies = pool(16.0, 16.0);
        let screen = ScreenSize::new(200, 100);
        let rule = SpawnRule::new(0.0, 1, 1.0, 1.0);
        for _ in 0..1000 {
            assert!(!spawn_enemy(&mut rng, &mut enemies, &rule, &screen));
        }
        assert!(enemies.is_empty());
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let screen = ScreenSize::new(200, 100);
        let rule = SpawnRule::new(0.5, 1, 0.5, 2.0);
        let run = |seed| {
            let mut rng = Rng::with_seed(seed);
            let mut enemies = pool(16.0, 16.0);
            for _ in 0..50 {
                spawn_enemy(&mut rng, &mut enemies, &rule, &screen);
            }
            enemies.batch.positions.to_vec()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_enemy_fire_drops_from_lower_edge() {
        let mut rng = Rng::with_seed(1);
        let mut enemies = pool(16.0, 16.0);
        let mut bullets = pool(6.0, 6.0);
        enemies.spawn(SpawnOptions::at(10.0, 20.0));
        assert_eq!(enemy_fire(&mut rng, &enemies, &mut bullets, 1.0), 1);
        assert_eq!(bullets.batch.positions[0], Vec2::new(15.0, 36.0));
        assert!(bullets.velocities[0].y > 0.0);
    }

    #[test]
    fn test_enemy_fire_zero_probability() {
        let mut rng = Rng::with_seed(1);
        let mut enemies = pool(16.0, 16.0);
        let mut bullets = pool(6.0, 6.0);
        enemies.spawn(SpawnOptions::at(10.0, 20.0));
        assert_eq!(enemy_fire(&mut rng, &enemies, &mut bullets, 0.0), 0);
        assert!(bullets.is_empty());
    }
}
