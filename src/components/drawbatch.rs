//! Column storage shared by everything the renderer draws.
//!
//! [`DrawBatch`] holds the per-instance columns a renderer needs (position,
//! panel, scale, alpha, white-out) in fixed-capacity arrays. It is embedded
//! as a field in both [`EntityPool`](crate::components::entitypool::EntityPool)
//! and [`Player`](crate::components::player::Player); the renderer only ever
//! sees the read-only [`BatchView`] handed out through [`Drawable`].

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::components::sprite::{Panel, SpriteDescriptor};

/// Render columns for up to `N` instances.
#[derive(Debug, Clone, Default)]
pub struct DrawBatch<const N: usize> {
    pub positions: ArrayVec<Vec2, N>,
    pub panels: ArrayVec<Panel, N>,
    pub scales: ArrayVec<f32, N>,
    pub alphas: ArrayVec<f32, N>,
    pub white_outs: ArrayVec<bool, N>,
}

impl<const N: usize> DrawBatch<N> {
    pub fn new() -> Self {
        Self {
            positions: ArrayVec::new(),
            panels: ArrayVec::new(),
            scales: ArrayVec::new(),
            alphas: ArrayVec::new(),
            white_outs: ArrayVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.positions.is_full()
    }

    /// Append one instance. Returns `false` when the batch is full.
    pub fn push(&mut self, position: Vec2, panel: Panel, scale: f32, alpha: f32) -> bool {
        if self.is_full() {
            return false;
        }
        self.positions.push(position);
        self.panels.push(panel);
        self.scales.push(scale);
        self.alphas.push(alpha);
        self.white_outs.push(false);
        true
    }

    /// Move the last instance into slot `i` and shrink by one.
    pub fn swap_remove(&mut self, i: usize) {
        if i >= self.len() {
            return;
        }
        self.positions.swap_remove(i);
        self.panels.swap_remove(i);
        self.scales.swap_remove(i);
        self.alphas.swap_remove(i);
        self.white_outs.swap_remove(i);
    }

    pub fn clear_white_outs(&mut self) {
        self.white_outs.fill(false);
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.panels.clear();
        self.scales.clear();
        self.alphas.clear();
        self.white_outs.clear();
    }

    pub fn view(&self) -> BatchView<'_> {
        BatchView {
            positions: &self.positions,
            panels: &self.panels,
            scales: &self.scales,
            alphas: &self.alphas,
            white_outs: &self.white_outs,
        }
    }
}

/// Borrowed, read-only slices over the live instances of a batch.
#[derive(Debug, Clone, Copy)]
pub struct BatchView<'a> {
    pub positions: &'a [Vec2],
    pub panels: &'a [Panel],
    pub scales: &'a [f32],
    pub alphas: &'a [f32],
    pub white_outs: &'a [bool],
}

impl<'a> BatchView<'a> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Per-instance records in upload order.
    pub fn instances(&self) -> impl Iterator<Item = InstanceData> + 'a {
        let view = *self;
        (0..view.len()).map(move |i| InstanceData {
            position: view.positions[i],
            panel: view.panels[i],
            scale: view.scales[i],
            alpha: view.alphas[i],
            white_out: if view.white_outs[i] { 1.0 } else { 0.0 },
        })
    }
}

/// One instance as uploaded to the GPU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceData {
    pub position: Vec2,
    pub panel: Panel,
    pub scale: f32,
    pub alpha: f32,
    /// 1.0 while flashing white, 0.0 otherwise.
    pub white_out: f32,
}

/// Anything that can be drawn as a single instanced batch.
pub trait Drawable {
    fn descriptor(&self) -> &SpriteDescriptor;
    fn batch(&self) -> BatchView<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut batch: DrawBatch<2> = DrawBatch::new();
        assert!(batch.push(Vec2::ZERO, Panel::default(), 1.0, 1.0));
        assert!(batch.push(Vec2::ONE, Panel::default(), 1.0, 1.0));
        assert!(!batch.push(Vec2::ONE, Panel::default(), 1.0, 1.0));
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_swap_remove_moves_last_into_slot() {
        let mut batch: DrawBatch<4> = DrawBatch::new();
        for i in 0..3 {
            batch.push(Vec2::splat(i as f32), Panel::new(i, 0), 1.0, 1.0);
        }
        batch.white_outs[2] = true;
        batch.swap_remove(0);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.positions[0], Vec2::splat(2.0));
        assert_eq!(batch.panels[0], Panel::new(2, 0));
        assert!(batch.white_outs[0]);
        assert_eq!(batch.positions[1], Vec2::splat(1.0));
    }

    #[test]
    fn test_swap_remove_out_of_range_is_noop() {
        let mut batch: DrawBatch<4> = DrawBatch::new();
        batch.push(Vec2::ZERO, Panel::default(), 1.0, 1.0);
        batch.swap_remove(3);
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_clear_white_outs_keeps_instances() {
        let mut batch: DrawBatch<4> = DrawBatch::new();
        batch.push(Vec2::ZERO, Panel::default(), 1.0, 1.0);
        batch.push(Vec2::ONE, Panel::default(), 1.0, 1.0);
        batch.white_outs[1] = true;
        batch.clear_white_outs();
        assert_eq!(batch.len(), 2);
        assert!(batch.white_outs.iter().all(|w| !w));
    }

    #[test]
    fn test_instances_encode_white_out() {
        let mut batch: DrawBatch<2> = DrawBatch::new();
        batch.push(Vec2::new(3.0, 4.0), Panel::new(1, 2), 2.0, 0.5);
        batch.white_outs[0] = true;
        let inst: Vec<_> = batch.view().instances().collect();
        assert_eq!(inst.len(), 1);
        assert_eq!(inst[0].position, Vec2::new(3.0, 4.0));
        assert_eq!(inst[0].panel, Panel::new(1, 2));
        assert_eq!(inst[0].white_out, 1.0);
        assert_eq!(inst[0].alpha, 0.5);
    }
}
