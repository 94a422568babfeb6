//! The player ship.
//!
//! The player is a single entity outside the entity pools. It carries its
//! own one-slot [`DrawBatch`] so the renderer draws it exactly like a pool,
//! through the [`Drawable`] trait.

use std::sync::Arc;

use glam::Vec2;

use crate::components::drawbatch::{BatchView, DrawBatch, Drawable};
use crate::components::sprite::SpriteDescriptor;
use crate::resources::input::InputIntents;
use crate::resources::screensize::ScreenSize;
use crate::resources::spritestore::{PLAYER_IDLE, PLAYER_LEFT, PLAYER_RIGHT};

/// Player state.
#[derive(Debug, Clone)]
pub struct Player {
    descriptor: Arc<SpriteDescriptor>,
    pub batch: DrawBatch<1>,
    pub velocity: Vec2,
    /// Pixels per tick.
    pub speed: f32,
    pub animation: usize,
    pub lives: u32,
    /// Ticks until the next shot is allowed.
    pub fire_cooldown: u32,
    /// Ticks of remaining invulnerability.
    pub invulnerable: u32,
}

impl Player {
    /// Create a player centred horizontally near the bottom of `screen`.
    pub fn new(
        descriptor: Arc<SpriteDescriptor>,
        screen: &ScreenSize,
        lives: u32,
        speed: f32,
    ) -> Self {
        let mut batch = DrawBatch::new();
        let size = descriptor.panel_size;
        let start = Vec2::new(
            (screen.w as f32 - size.x) * 0.5,
            screen.h as f32 - size.y * 2.0,
        );
        batch.push(start, descriptor.panel(PLAYER_IDLE, 0), 1.0, 1.0);
        Self {
            descriptor,
            batch,
            velocity: Vec2::ZERO,
            speed,
            animation: PLAYER_IDLE,
            lives,
            fire_cooldown: 0,
            invulnerable: 0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.batch.positions.first().copied().unwrap_or_default()
    }

    pub fn set_position(&mut self, position: Vec2) {
        if let Some(p) = self.batch.positions.first_mut() {
            *p = position;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Turn intents into velocity and pick the banking animation.
    pub fn steer(&mut self, input: &InputIntents) {
        let dir = Vec2::new(input.axis_x(), input.axis_y()).normalize_or_zero();
        self.velocity = dir * self.speed;
        let animation = match input.axis_x() {
            x if x < 0.0 => PLAYER_LEFT,
            x if x > 0.0 => PLAYER_RIGHT,
            _ => PLAYER_IDLE,
        };
        if animation != self.animation && self.descriptor.animation(animation).is_some() {
            self.animation = animation;
            if let Some(panel) = self.batch.panels.first_mut() {
                *panel = self.descriptor.panel(animation, 0);
            }
        }
    }

    /// One simulation tick: move inside the playfield and count down timers.
    pub fn integrate(&mut self, screen: &ScreenSize) {
        let max = Vec2::new(screen.w as f32, screen.h as f32) - self.descriptor.panel_size;
        let next = (self.position() + self.velocity).clamp(Vec2::ZERO, max.max(Vec2::ZERO));
        self.set_position(next);
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
        self.invulnerable = self.invulnerable.saturating_sub(1);
        // blink while invulnerable
        if let Some(a) = self.batch.alphas.first_mut() {
            *a = if self.invulnerable > 0 && (self.invulnerable / 8) % 2 == 1 {
                0.3
            } else {
                1.0
            };
        }
    }

    /// Consume the fire cooldown. Returns true when a shot should be spawned.
    pub fn try_fire(&mut self, cooldown: u32) -> bool {
        if self.fire_cooldown > 0 || !self.is_alive() {
            return false;
        }
        self.fire_cooldown = cooldown;
        true
    }

    /// Where a shot of `shot_size` leaves the ship: centred, at the nose.
    pub fn muzzle(&self, shot_size: Vec2) -> Vec2 {
        let size = self.descriptor.panel_size;
        self.position() + Vec2::new((size.x - shot_size.x) * 0.5, -shot_size.y)
    }

    pub fn collision_box(&self) -> (Vec2, Vec2) {
        self.descriptor.collision.world(self.position(), 1.0)
    }

    /// Apply one hit. Returns true if the hit landed (not invulnerable).
    pub fn damage(&mut self, invulnerable_ticks: u32) -> bool {
        if self.invulnerable > 0 || !self.is_alive() {
            return false;
        }
        self.lives -= 1;
        self.invulnerable = invulnerable_ticks;
        if let Some(w) = self.batch.white_outs.first_mut() {
            *w = true;
        }
        true
    }
}

impl Drawable for Player {
    fn descriptor(&self) -> &SpriteDescriptor {
        &self.descriptor
    }

    /// A dead player draws nothing.
    fn batch(&self) -> BatchView<'_> {
        let view = self.batch.view();
        if self.is_alive() {
            view
        } else {
            BatchView {
                positions: &view.positions[..0],
                panels: &view.panels[..0],
                scales: &view.scales[..0],
                alphas: &view.alphas[..0],
                white_outs: &view.white_outs[..0],
            }
        }
    }
}
