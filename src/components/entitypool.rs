//! Fixed-capacity, column-wise pool of live entities of one kind.
//!
//! An [`EntityPool`] stores entity data as parallel columns: the render
//! columns live in an embedded [`DrawBatch`], the simulation columns
//! (velocity, animation, tick, health) live next to it. Slots `[0, len)` are
//! live; nothing past `len` is ever read.
//!
//! # Removal
//!
//! [`EntityPool::kill`] swap-removes: the last live entity is moved into the
//! killed slot and the length drops by one. Forward scans that kill while
//! iterating follow the pool's [`ScanMode`]:
//!
//! - [`ScanMode::SkipSwapped`] moves on to the next index after a kill, so the
//!   entity swapped into the killed slot is not examined again in that pass.
//! - [`ScanMode::Revisit`] re-examines the killed slot, so every entity is
//!   processed exactly once per pass.
//!
//! # Capacity
//!
//! Spawning into a full pool is a silent drop. Out-of-range indices passed to
//! [`EntityPool::kill`] or [`EntityPool::set_animation`] are ignored.

use std::sync::Arc;

use arrayvec::ArrayVec;
use glam::Vec2;
use log::debug;

use crate::components::drawbatch::{BatchView, DrawBatch, Drawable};
use crate::components::sprite::{AnimationEnd, SpriteDescriptor};
use crate::resources::fontstore::GlyphMap;
use crate::resources::screensize::ScreenSize;

/// Hard upper bound on entities per pool.
pub const MAX_ENTITIES: usize = 256;

/// Horizontal advance between glyphs, as a fraction of the scaled panel width.
pub const TEXT_SPACING: f32 = 0.75;

/// How a forward scan continues after killing the entity at the current index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Continue with the next index; the swapped-in entity waits for the next pass.
    #[default]
    SkipSwapped,
    /// Stay on the same index and process the swapped-in entity right away.
    Revisit,
}

/// Initial state for a spawned entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOptions {
    pub position: Vec2,
    pub velocity: Vec2,
    pub animation: usize,
    /// Values `<= 0` fall back to 1.0.
    pub scale: f32,
    /// 0.0 is fully opaque, 1.0 fully transparent.
    pub transparency: f32,
    pub health: i32,
}

impl Default for SpawnOptions {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            animation: 0,
            scale: 1.0,
            transparency: 0.0,
            health: 1,
        }
    }
}

impl SpawnOptions {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Self::default()
        }
    }
    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Vec2::new(vx, vy);
        self
    }
    pub fn with_animation(mut self, animation: usize) -> Self {
        self.animation = animation;
        self
    }
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency;
        self
    }
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }
}

/// Placement of a line of text spawned with [`EntityPool::spawn_from_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOptions {
    pub position: Vec2,
    pub scale: f32,
    pub transparency: f32,
    /// Empty the pool before spawning.
    pub reset: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: 1.0,
            transparency: 0.0,
            reset: false,
        }
    }
}

/// Live entities of one kind, stored column-wise.
#[derive(Debug, Clone)]
pub struct EntityPool {
    descriptor: Arc<SpriteDescriptor>,
    capacity: usize,
    scan_mode: ScanMode,
    /// Extra margin past the playfield before an entity is culled.
    pub kill_buffer: f32,
    pub batch: DrawBatch<MAX_ENTITIES>,
    pub velocities: ArrayVec<Vec2, MAX_ENTITIES>,
    pub animations: ArrayVec<usize, MAX_ENTITIES>,
    pub ticks: ArrayVec<usize, MAX_ENTITIES>,
    pub healths: ArrayVec<i32, MAX_ENTITIES>,
}

impl EntityPool {
    /// Empty pool holding up to [`MAX_ENTITIES`] entities.
    pub fn new(descriptor: Arc<SpriteDescriptor>) -> Self {
        Self {
            descriptor,
            capacity: MAX_ENTITIES,
            scan_mode: ScanMode::default(),
            kill_buffer: 0.0,
            batch: DrawBatch::new(),
            velocities: ArrayVec::new(),
            animations: ArrayVec::new(),
            ticks: ArrayVec::new(),
            healths: ArrayVec::new(),
        }
    }

    /// Lower the capacity. Values above [`MAX_ENTITIES`] are clamped.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.min(MAX_ENTITIES);
        self
    }

    pub fn with_scan_mode(mut self, scan_mode: ScanMode) -> Self {
        self.scan_mode = scan_mode;
        self
    }

    pub fn with_kill_buffer(mut self, kill_buffer: f32) -> Self {
        self.kill_buffer = kill_buffer;
        self
    }

    pub fn len(&self) -> usize {
        self.batch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.scan_mode
    }

    pub fn sprite(&self) -> &Arc<SpriteDescriptor> {
        &self.descriptor
    }

    /// Index a forward scan should visit after killing slot `i`.
    pub fn next_after_kill(&self, i: usize) -> usize {
        match self.scan_mode {
            ScanMode::SkipSwapped => i + 1,
            ScanMode::Revisit => i,
        }
    }

    /// Append a new entity. Drops the request when the pool is full or the
    /// animation index is unknown.
    pub fn spawn(&mut self, options: SpawnOptions) {
        if self.is_full() {
            debug!(
                "spawn dropped: pool '{}' at capacity {}",
                self.descriptor.tex_key, self.capacity
            );
            return;
        }
        if self.descriptor.animation(options.animation).is_none() {
            debug!(
                "spawn dropped: pool '{}' has no animation {}",
                self.descriptor.tex_key, options.animation
            );
            return;
        }
        let scale = if options.scale > 0.0 { options.scale } else { 1.0 };
        let alpha = (1.0 - options.transparency).clamp(0.0, 1.0);
        let panel = self.descriptor.panel(options.animation, 0);
        if !self.batch.push(options.position, panel, scale, alpha) {
            return;
        }
        self.velocities.push(options.velocity);
        self.animations.push(options.animation);
        self.ticks.push(0);
        self.healths.push(options.health);
    }

    /// Swap-remove the entity at `i`. No-op when `i >= len`.
    pub fn kill(&mut self, i: usize) {
        if i >= self.len() {
            return;
        }
        self.batch.swap_remove(i);
        self.velocities.swap_remove(i);
        self.animations.swap_remove(i);
        self.ticks.swap_remove(i);
        self.healths.swap_remove(i);
    }

    /// Remove every entity.
    pub fn clear(&mut self) {
        self.batch.clear();
        self.velocities.clear();
        self.animations.clear();
        self.ticks.clear();
        self.healths.clear();
    }

    /// Switch entity `i` to `animation`, restarting it at tick 0.
    ///
    /// Setting the animation that is already playing keeps its progress.
    pub fn set_animation(&mut self, i: usize, animation: usize) {
        if i >= self.len() || self.animations[i] == animation {
            return;
        }
        if self.descriptor.animation(animation).is_none() {
            return;
        }
        self.animations[i] = animation;
        self.ticks[i] = 0;
        self.batch.panels[i] = self.descriptor.panel(animation, 0);
    }

    /// Advance every live entity's animation by one step.
    ///
    /// Entities whose animation ends with [`AnimationEnd::Kill`] are removed
    /// when their tick reaches the frame count.
    pub fn update_animations(&mut self) {
        let descriptor = Arc::clone(&self.descriptor);
        let mut i = 0;
        while i < self.len() {
            let Some(anim) = descriptor.animation(self.animations[i]) else {
                i += 1;
                continue;
            };
            self.ticks[i] += 1;
            if self.ticks[i] >= anim.frame_count() {
                match anim.end {
                    AnimationEnd::Kill => {
                        self.kill(i);
                        i = self.next_after_kill(i);
                        continue;
                    }
                    AnimationEnd::Loop => self.ticks[i] = 0,
                }
            }
            self.batch.panels[i] = anim.panel_at(self.ticks[i]);
            i += 1;
        }
    }

    /// One simulation tick: move and cull everything that left the playfield
    /// by more than the kill buffer. Hit flashes are left alone.
    pub fn integrate(&mut self, screen: &ScreenSize) {
        let mut i = 0;
        while i < self.len() {
            self.batch.positions[i] += self.velocities[i];
            if self.is_outside(i, screen) {
                self.kill(i);
                i = self.next_after_kill(i);
                continue;
            }
            i += 1;
        }
    }

    fn is_outside(&self, i: usize, screen: &ScreenSize) -> bool {
        let (min, max) = self
            .descriptor
            .panel_rect(self.batch.positions[i], self.batch.scales[i]);
        let buffer = self.kill_buffer;
        max.x + buffer < 0.0
            || max.y + buffer < 0.0
            || min.x - buffer > screen.w as f32
            || min.y - buffer > screen.h as f32
    }

    /// Spawn one entity per mapped character of `text`.
    ///
    /// Characters without a glyph still advance the cursor. Spawning stops at
    /// the first character that no longer fits in the pool.
    pub fn spawn_from_text(&mut self, text: &str, options: TextOptions, font: &impl GlyphMap) {
        if options.reset {
            self.clear();
        }
        let scale = if options.scale > 0.0 { options.scale } else { 1.0 };
        let advance = self.descriptor.panel_size.x * scale * TEXT_SPACING;
        for (index, ch) in text.chars().enumerate() {
            let Some(animation) = font.glyph(ch) else {
                continue;
            };
            if self.is_full() {
                break;
            }
            self.spawn(
                SpawnOptions::at(options.position.x + index as f32 * advance, options.position.y)
                    .with_animation(animation)
                    .with_scale(scale)
                    .with_transparency(options.transparency),
            );
        }
    }

    /// World-space collision box of entity `i`.
    pub fn collision_box(&self, i: usize) -> (Vec2, Vec2) {
        self.descriptor
            .collision
            .world(self.batch.positions[i], self.batch.scales[i])
    }

    /// Centre of entity `i`'s scaled panel.
    pub fn center(&self, i: usize) -> Vec2 {
        self.batch.positions[i] + self.descriptor.panel_size * self.batch.scales[i] * 0.5
    }

    /// Set every live entity's alpha.
    pub fn set_alpha(&mut self, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        for a in self.batch.alphas.iter_mut() {
            *a = alpha;
        }
    }
}

impl Drawable for EntityPool {
    fn descriptor(&self) -> &SpriteDescriptor {
        &self.descriptor
    }

    fn batch(&self) -> BatchView<'_> {
        self.batch.view()
    }
}
