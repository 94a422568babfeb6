//! Collision resolution between entity pools.
//!
//! Both passes scan pools forward and swap-kill while iterating, following
//! each pool's [`ScanMode`](crate::components::entitypool::ScanMode).
//!
//! - [`bullets_vs_enemies`] – player bullets against a list of enemy pools.
//!   A bullet damages every enemy it overlaps in the first pool where it
//!   connects, then it is removed and not tested against the remaining pools.
//! - [`hazards_vs_player`] – any hazard pool against the player box. Hazards
//!   that touch the player are removed and the pass reports a hit.

use glam::Vec2;

use crate::components::boxcollider::box_overlap;
use crate::components::entitypool::{EntityPool, SpawnOptions};
use crate::events::collision::BulletReport;

/// An enemy pool and the points awarded per kill in it.
pub struct EnemyTarget<'a> {
    pub pool: &'a mut EntityPool,
    pub points: u32,
}

impl<'a> EnemyTarget<'a> {
    pub fn new(pool: &'a mut EntityPool, points: u32) -> Self {
        Self { pool, points }
    }
}

/// Spawn an explosion centred on `center`, scaled to cover `width` pixels.
pub fn spawn_explosion(explosions: &mut EntityPool, center: Vec2, width: f32) {
    let panel = explosions.sprite().panel_size;
    let scale = if panel.x > 0.0 {
        (width / panel.x).max(1.0)
    } else {
        1.0
    };
    let origin = center - panel * scale * 0.5;
    explosions.spawn(SpawnOptions::at(origin.x, origin.y).with_scale(scale));
}

/// Resolve player bullets against enemy pools.
///
/// Each overlap takes one point of health. Enemies reaching zero are killed,
/// replaced by an explosion and scored; survivors flash white.
pub fn bullets_vs_enemies(
    bullets: &mut EntityPool,
    targets: &mut [EnemyTarget<'_>],
    explosions: &mut EntityPool,
    shrink: f32,
) -> BulletReport {
    let mut report = BulletReport::default();
    let mut b = 0;
    while b < bullets.len() {
        let (b_min, b_max) = bullets.collision_box(b);
        let mut connected = false;

        for target in targets.iter_mut() {
            let enemies = &mut *target.pool;
            let mut e = 0;
            while e < enemies.len() {
                let (e_min, e_max) = enemies.collision_box(e);
                if !box_overlap(b_min, b_max, e_min, e_max, shrink) {
                    e += 1;
                    continue;
                }
                connected = true;
                enemies.healths[e] -= 1;
                if enemies.healths[e] <= 0 {
                    let width = enemies.sprite().panel_size.x * enemies.batch.scales[e];
                    spawn_explosion(explosions, enemies.center(e), width);
                    enemies.kill(e);
                    report.kills += 1;
                    report.points += target.points;
                    e = enemies.next_after_kill(e);
                    continue;
                }
                enemies.batch.white_outs[e] = true;
                report.hits += 1;
                e += 1;
            }
            if connected {
                break;
            }
        }

        if connected {
            bullets.kill(b);
            report.bullets_spent += 1;
            b = bullets.next_after_kill(b);
        } else {
            b += 1;
        }
    }
    report
}

/// Resolve a hazard pool against the player's collision box.
///
/// Returns true when at least one hazard touched the player.
pub fn hazards_vs_player(
    hazards: &mut EntityPool,
    player_box: (Vec2, Vec2),
    shrink: f32,
    mut explosions: Option<&mut EntityPool>,
) -> bool {
    let (p_min, p_max) = player_box;
    let mut hit = false;
    let mut i = 0;
    while i < hazards.len() {
        let (h_min, h_max) = hazards.collision_box(i);
        if !box_overlap(h_min, h_max, p_min, p_max, shrink) {
            i += 1;
            continue;
        }
        hit = true;
        if let Some(explosions) = explosions.as_deref_mut() {
            let width = hazards.sprite().panel_size.x * hazards.batch.scales[i];
            spawn_explosion(explosions, hazards.center(i), width);
        }
        hazards.kill(i);
        i = hazards.next_after_kill(i);
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::components::entitypool::ScanMode;
    use crate::components::sprite::{Animation, AnimationEnd, Panel, SpriteDescriptor};

    fn square(key: &str, size: f32) -> Arc<SpriteDescriptor> {
        Arc::new(SpriteDescriptor::new(key, size, size))
    }

    fn explosions() -> EntityPool {
        EntityPool::new(Arc::new(
            SpriteDescriptor::new("explosion", 16.0, 16.0).with_animations(vec![
                Animation::strip(Panel::new(0, 0), 4, AnimationEnd::Kill),
            ]),
        ))
    }

    #[test]
    fn test_lethal_hit_kills_enemy_and_bullet() {
        let mut bullets = EntityPool::new(square("bullet", 4.0));
        let mut enemies = EntityPool::new(square("enemy", 16.0));
        let mut booms = explosions();
        bullets.spawn(SpawnOptions::at(6.0, 6.0));
        enemies.spawn(SpawnOptions::at(0.0, 0.0).with_health(1));

        let report = bullets_vs_enemies(
            &mut bullets,
            &mut [EnemyTarget::new(&mut enemies, 10)],
            &mut booms,
            0.7,
        );
        assert_eq!(report.kills, 1);
        assert_eq!(report.points, 10);
        assert_eq!(report.bullets_spent, 1);
        assert!(bullets.is_empty());
        assert!(enemies.is_empty());
        assert_eq!(booms.len(), 1);
        // explosion is centred over the enemy
        assert_eq!(booms.center(0), Vec2::new(8.0, 8.0));
    }

    #[test]
    fn test_non_lethal_hit_flashes_enemy() {
        let mut bullets = EntityPool::new(square("bullet", 4.0));
        let mut enemies = EntityPool::new(square("enemy", 16.0));
        let mut booms = explosions();
        bullets.spawn(SpawnOptions::at(6.0, 6.0));
        enemies.spawn(SpawnOptions::at(0.0, 0.0).with_health(3));

        let report = bullets_vs_enemies(
            &mut bullets,
            &mut [EnemyTarget::new(&mut enemies, 10)],
            &mut booms,
            0.7,
        );
        assert_eq!(report.hits, 1);
        assert_eq!(report.kills, 0);
        assert!(bullets.is_empty());
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies.healths[0], 2);
        assert!(enemies.batch.white_outs[0]);
        assert!(booms.is_empty());
    }

    #[test]
    fn test_bullet_stops_at_first_pool_hit() {
        let mut bullets = EntityPool::new(square("bullet", 4.0));
        let mut small = EntityPool::new(square("small", 16.0));
        let mut large = EntityPool::new(square("large", 16.0));
        let mut booms = explosions();
        bullets.spawn(SpawnOptions::at(6.0, 6.0));
        small.spawn(SpawnOptions::at(0.0, 0.0).with_health(5));
        large.spawn(SpawnOptions::at(0.0, 0.0).with_health(5));

        bullets_vs_enemies(
            &mut bullets,
            &mut [
                EnemyTarget::new(&mut small, 10),
                EnemyTarget::new(&mut large, 50),
            ],
            &mut booms,
            0.7,
        );
        assert_eq!(small.healths[0], 4);
        assert_eq!(large.healths[0], 5);
        assert!(!large.batch.white_outs[0]);
    }

    #[test]
    fn test_bullet_damages_every_overlap_in_pool() {
        let mut bullets = EntityPool::new(square("bullet", 4.0));
        let mut enemies = EntityPool::new(square("enemy", 16.0));
        let mut booms = explosions();
        bullets.spawn(SpawnOptions::at(6.0, 6.0));
        enemies.spawn(SpawnOptions::at(0.0, 0.0).with_health(2));
        enemies.spawn(SpawnOptions::at(1.0, 1.0).with_health(2));

        let report = bullets_vs_enemies(
            &mut bullets,
            &mut [EnemyTarget::new(&mut enemies, 10)],
            &mut booms,
            0.7,
        );
        assert_eq!(report.hits, 2);
        assert_eq!(report.bullets_spent, 1);
        assert!(enemies.healths.iter().all(|h| *h == 1));
    }

    #[test]
    fn test_missing_bullet_survives() {
        let mut bullets = EntityPool::new(square("bullet", 4.0));
        let mut enemies = EntityPool::new(square("enemy", 16.0));
        let mut booms = explosions();
        bullets.spawn(SpawnOptions::at(100.0, 100.0));
        enemies.spawn(SpawnOptions::at(0.0, 0.0));

        let report = bullets_vs_enemies(
            &mut bullets,
            &mut [EnemyTarget::new(&mut enemies, 10)],
            &mut booms,
            0.7,
        );
        assert_eq!(report, BulletReport::default());
        assert_eq!(bullets.len(), 1);
    }

    #[test]
    fn test_spent_bullet_skips_swapped_bullet() {
        let mut bullets = EntityPool::new(square("bullet", 4.0));
        let mut enemies = EntityPool::new(square("enemy", 16.0));
        let mut booms = explosions();
        bullets.spawn(SpawnOptions::at(6.0, 6.0));
        bullets.spawn(SpawnOptions::at(7.0, 7.0));
        enemies.spawn(SpawnOptions::at(0.0, 0.0).with_health(5));

        let report = bullets_vs_enemies(
            &mut bullets,
            &mut [EnemyTarget::new(&mut enemies, 10)],
            &mut booms,
            0.7,
        );
        // the second bullet lands in slot 0 and waits for the next pass
        assert_eq!(report.bullets_spent, 1);
        assert_eq!(bullets.len(), 1);
        assert_eq!(enemies.healths[0], 4);
    }

    #[test]
    fn test_spent_bullet_revisit_checks_swapped_bullet() {
        let mut bullets = EntityPool::new(square("bullet", 4.0)).with_scan_mode(ScanMode::Revisit);
        let mut enemies = EntityPool::new(square("enemy", 16.0));
        let mut booms = explosions();
        bullets.spawn(SpawnOptions::at(6.0, 6.0));
        bullets.spawn(SpawnOptions::at(7.0, 7.0));
        enemies.spawn(SpawnOptions::at(0.0, 0.0).with_health(5));

        let report = bullets_vs_enemies(
            &mut bullets,
            &mut [EnemyTarget::new(&mut enemies, 10)],
            &mut booms,
            0.7,
        );
        assert_eq!(report.bullets_spent, 2);
        assert!(bullets.is_empty());
        assert_eq!(enemies.healths[0], 3);
    }

    #[test]
    fn test_hazard_hits_player_and_is_removed() {
        let mut hazards = EntityPool::new(square("enemy_bullet", 6.0));
        let mut booms = explosions();
        hazards.spawn(SpawnOptions::at(5.0, 5.0));
        hazards.spawn(SpawnOptions::at(200.0, 200.0));
        let player_box = (Vec2::ZERO, Vec2::splat(16.0));

        assert!(hazards_vs_player(
            &mut hazards,
            player_box,
            0.8,
            Some(&mut booms)
        ));
        assert_eq!(hazards.len(), 1);
        assert_eq!(hazards.batch.positions[0], Vec2::splat(200.0));
        assert_eq!(booms.len(), 1);
    }

    #[test]
    fn test_hazard_miss_reports_nothing() {
        let mut hazards = EntityPool::new(square("enemy_bullet", 6.0));
        hazards.spawn(SpawnOptions::at(100.0, 100.0));
        let player_box = (Vec2::ZERO, Vec2::splat(16.0));
        assert!(!hazards_vs_player(&mut hazards, player_box, 0.8, None));
        assert_eq!(hazards.len(), 1);
    }

    #[test]
    fn test_shrink_forgives_grazing_hazard() {
        let mut hazards = EntityPool::new(square("enemy_bullet", 6.0));
        // overlaps the raw player box by one pixel
        hazards.spawn(SpawnOptions::at(15.0, 15.0));
        let player_box = (Vec2::ZERO, Vec2::splat(16.0));
        assert!(!hazards_vs_player(&mut hazards, player_box, 0.8, None));
    }
}
