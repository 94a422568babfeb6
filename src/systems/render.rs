//! Render hand-off.
//!
//! The simulation does not talk to a graphics API. Once per frame it hands
//! every non-empty batch to a [`Renderer`] together with the batch's
//! [`SpriteDescriptor`]; a backend uploads the per-instance records and
//! issues one instanced draw call per batch. [`HeadlessRenderer`] records
//! what would have been drawn.

use glam::Vec2;

use crate::components::drawbatch::{BatchView, Drawable, InstanceData};
use crate::components::sprite::{Panel, SpriteDescriptor};

/// Backend receiving one instanced batch per call.
pub trait Renderer {
    fn begin_frame(&mut self) {}
    fn draw_batch(&mut self, sprite: &SpriteDescriptor, batch: BatchView<'_>);
    fn end_frame(&mut self) {}
}

/// Pixel offset of `panel` inside the sprite sheet.
pub fn panel_source(sprite: &SpriteDescriptor, panel: Panel) -> Vec2 {
    Vec2::new(panel.col as f32, panel.row as f32) * sprite.panel_size
}

/// Draw `drawables` in order, skipping empty batches.
///
/// Returns the number of draw calls issued.
pub fn render_pass(renderer: &mut impl Renderer, drawables: &[&dyn Drawable]) -> usize {
    renderer.begin_frame();
    let mut calls = 0;
    for drawable in drawables {
        let batch = drawable.batch();
        if batch.is_empty() {
            continue;
        }
        renderer.draw_batch(drawable.descriptor(), batch);
        calls += 1;
    }
    renderer.end_frame();
    calls
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub tex_key: String,
    pub instances: Vec<InstanceData>,
    /// Sheet pixel offset of each instance's panel.
    pub sources: Vec<Vec2>,
}

/// Renderer that keeps the last frame's draw calls in memory.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub total_draw_calls: u64,
    pub total_instances: u64,
    pub last_frame: Vec<DrawCall>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances drawn last frame with texture `tex_key`.
    pub fn instances_of(&self, tex_key: &str) -> usize {
        self.last_frame
            .iter()
            .filter(|call| call.tex_key == tex_key)
            .map(|call| call.instances.len())
            .sum()
    }
}

impl Renderer for HeadlessRenderer {
    fn begin_frame(&mut self) {
        self.last_frame.clear();
    }

    fn draw_batch(&mut self, sprite: &SpriteDescriptor, batch: BatchView<'_>) {
        let instances: Vec<InstanceData> = batch.instances().collect();
        let sources = instances
            .iter()
            .map(|inst| panel_source(sprite, inst.panel))
            .collect();
        self.total_draw_calls += 1;
        self.total_instances += instances.len() as u64;
        self.last_frame.push(DrawCall {
            tex_key: sprite.tex_key.clone(),
            instances,
            sources,
        });
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::components::entitypool::{EntityPool, SpawnOptions};

    #[test]
    fn test_empty_pools_are_skipped() {
        let mut full = EntityPool::new(Arc::new(SpriteDescriptor::new("full", 8.0, 8.0)));
        let empty = EntityPool::new(Arc::new(SpriteDescriptor::new("empty", 8.0, 8.0)));
        full.spawn(SpawnOptions::at(1.0, 2.0));
        full.spawn(SpawnOptions::at(3.0, 4.0));

        let mut renderer = HeadlessRenderer::new();
        let calls = render_pass(&mut renderer, &[&empty, &full]);
        assert_eq!(calls, 1);
        assert_eq!(renderer.last_frame.len(), 1);
        assert_eq!(renderer.instances_of("full"), 2);
        assert_eq!(renderer.instances_of("empty"), 0);
        assert_eq!(renderer.frames, 1);
    }

    #[test]
    fn test_last_frame_is_replaced() {
        let mut pool = EntityPool::new(Arc::new(SpriteDescriptor::new("pool", 8.0, 8.0)));
        pool.spawn(SpawnOptions::default());
        let mut renderer = HeadlessRenderer::new();
        render_pass(&mut renderer, &[&pool]);
        render_pass(&mut renderer, &[&pool]);
        assert_eq!(renderer.last_frame.len(), 1);
        assert_eq!(renderer.total_draw_calls, 2);
        assert_eq!(renderer.total_instances, 2);
    }

    #[test]
    fn test_panel_source_offset() {
        let sprite = SpriteDescriptor::new("sheet", 16.0, 8.0);
        assert_eq!(panel_source(&sprite, Panel::new(2, 3)), Vec2::new(32.0, 24.0));
    }

    #[test]
    fn test_draw_call_records_sources() {
        use crate::components::sprite::{Animation, AnimationEnd};

        let sprite = SpriteDescriptor::new("strip", 16.0, 8.0).with_animations(vec![
            Animation::strip(Panel::new(0, 1), 3, AnimationEnd::Loop),
        ]);
        let mut pool = EntityPool::new(Arc::new(sprite));
        pool.spawn(SpawnOptions::default());
        pool.update_animations();

        let mut renderer = HeadlessRenderer::new();
        render_pass(&mut renderer, &[&pool]);
        assert_eq!(renderer.last_frame[0].sources, vec![Vec2::new(16.0, 8.0)]);
    }
}
