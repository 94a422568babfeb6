//! Static sprite metadata shared by every entity of a kind.
//!
//! A [`SpriteDescriptor`] describes one sprite sheet: the size of a single
//! panel, how many panels the sheet holds, the animations available to
//! entities of this kind and the collision box used for hit tests.
//!
//! Descriptors are immutable once built and are shared through `Arc` by the
//! pools and the player; entities never own one.

use arrayvec::ArrayVec;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Maximum number of frames a single animation can hold.
pub const MAX_FRAMES: usize = 32;

/// Sprite-sheet panel address, in panels (not pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Panel {
    pub col: u16,
    pub row: u16,
}

impl Panel {
    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

/// What happens when an animation runs past its last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationEnd {
    /// Wrap back to the first frame.
    #[default]
    Loop,
    /// Remove the entity from its pool.
    Kill,
}

/// Ordered list of panels played one per animation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub frames: ArrayVec<Panel, MAX_FRAMES>,
    #[serde(default)]
    pub end: AnimationEnd,
}

impl Animation {
    /// Build an animation from a list of panels.
    ///
    /// Panels past [`MAX_FRAMES`] are ignored. An empty list is replaced by a
    /// single `(0, 0)` panel so the animation always has a frame to show.
    pub fn new(frames: impl IntoIterator<Item = Panel>, end: AnimationEnd) -> Self {
        let mut list: ArrayVec<Panel, MAX_FRAMES> = frames.into_iter().take(MAX_FRAMES).collect();
        if list.is_empty() {
            list.push(Panel::default());
        }
        Self { frames: list, end }
    }

    /// Single-panel looping animation.
    pub fn still(panel: Panel) -> Self {
        Self::new([panel], AnimationEnd::Loop)
    }

    /// A horizontal strip of `count` panels starting at `first`.
    pub fn strip(first: Panel, count: u16, end: AnimationEnd) -> Self {
        Self::new(
            (0..count).map(|i| Panel::new(first.col + i, first.row)),
            end,
        )
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Panel shown at `tick`; ticks past the end show the last frame.
    pub fn panel_at(&self, tick: usize) -> Panel {
        let last = self.frames.len().saturating_sub(1);
        self.frames
            .get(tick.min(last))
            .copied()
            .unwrap_or_default()
    }
}

/// Collision box corners, relative to the entity origin, in unscaled pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl CollisionBox {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// World-space (min, max) for an entity at `position` drawn at `scale`.
    pub fn world(&self, position: Vec2, scale: f32) -> (Vec2, Vec2) {
        let p0 = position + self.min * scale;
        let p1 = position + self.max * scale;
        (p0.min(p1), p0.max(p1))
    }
}

/// Shape, animation and collision metadata for one entity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Texture key handed to the renderer.
    pub tex_key: String,
    /// Size of one panel in pixels.
    pub panel_size: Vec2,
    /// Sheet size in panels (columns, rows).
    pub sheet_panels: (u16, u16),
    pub animations: Vec<Animation>,
    pub collision: CollisionBox,
}

impl SpriteDescriptor {
    /// Create a descriptor whose collision box covers the whole panel.
    pub fn new(tex_key: impl Into<String>, panel_w: f32, panel_h: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            panel_size: Vec2::new(panel_w, panel_h),
            sheet_panels: (1, 1),
            animations: vec![Animation::still(Panel::default())],
            collision: CollisionBox::new(Vec2::ZERO, Vec2::new(panel_w, panel_h)),
        }
    }

    pub fn with_sheet(mut self, cols: u16, rows: u16) -> Self {
        self.sheet_panels = (cols, rows);
        self
    }

    /// Replace the animation list. An empty list keeps the previous one.
    pub fn with_animations(mut self, animations: Vec<Animation>) -> Self {
        if !animations.is_empty() {
            self.animations = animations;
        }
        self
    }

    pub fn with_collision(mut self, min: Vec2, max: Vec2) -> Self {
        self.collision = CollisionBox::new(min, max);
        self
    }

    /// Restore the non-empty invariants after deserialization.
    pub fn normalized(mut self) -> Self {
        for anim in &mut self.animations {
            if anim.frames.is_empty() {
                anim.frames.push(Panel::default());
            }
        }
        if self.animations.is_empty() {
            self.animations.push(Animation::still(Panel::default()));
        }
        self
    }

    pub fn animation(&self, index: usize) -> Option<&Animation> {
        self.animations.get(index)
    }

    /// Panel for `animation` at `tick`, or the default panel for unknown animations.
    pub fn panel(&self, animation: usize, tick: usize) -> Panel {
        self.animations
            .get(animation)
            .map(|a| a.panel_at(tick))
            .unwrap_or_default()
    }

    /// Panel rectangle in world space for an entity at `position` and `scale`.
    pub fn panel_rect(&self, position: Vec2, scale: f32) -> (Vec2, Vec2) {
        (position, position + self.panel_size * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_never_empty() {
        let anim = Animation::new(std::iter::empty(), AnimationEnd::Kill);
        assert_eq!(anim.frame_count(), 1);
        assert_eq!(anim.panel_at(0), Panel::default());
    }

    #[test]
    fn test_animation_caps_frames() {
        let anim = Animation::strip(Panel::new(0, 0), 40, AnimationEnd::Loop);
        assert_eq!(anim.frame_count(), MAX_FRAMES);
    }

    #[test]
    fn test_strip_panels_advance_columns() {
        let anim = Animation::strip(Panel::new(2, 3), 3, AnimationEnd::Loop);
        assert_eq!(anim.panel_at(0), Panel::new(2, 3));
        assert_eq!(anim.panel_at(2), Panel::new(4, 3));
        // past the end holds the last frame
        assert_eq!(anim.panel_at(9), Panel::new(4, 3));
    }

    #[test]
    fn test_collision_box_world_scaled() {
        let cb = CollisionBox::new(Vec2::new(2.0, 2.0), Vec2::new(6.0, 10.0));
        let (min, max) = cb.world(Vec2::new(100.0, 50.0), 2.0);
        assert_eq!(min, Vec2::new(104.0, 54.0));
        assert_eq!(max, Vec2::new(112.0, 70.0));
    }

    #[test]
    fn test_descriptor_deserializes_from_json() {
        let json = r#"{
            "tex_key": "enemy",
            "panel_size": [16.0, 16.0],
            "sheet_panels": [4, 1],
            "animations": [
                { "frames": [{ "col": 0, "row": 0 }, { "col": 1, "row": 0 }] },
                { "frames": [{ "col": 2, "row": 0 }], "end": "Kill" }
            ],
            "collision": { "min": [2.0, 2.0], "max": [14.0, 14.0] }
        }"#;
        let desc: SpriteDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(desc.animations.len(), 2);
        assert_eq!(desc.animations[0].end, AnimationEnd::Loop);
        assert_eq!(desc.animations[1].end, AnimationEnd::Kill);
        assert_eq!(desc.panel(0, 1), Panel::new(1, 0));
    }

    #[test]
    fn test_normalized_fills_empty_animations() {
        let json = r#"{
            "tex_key": "bad",
            "panel_size": [8.0, 8.0],
            "sheet_panels": [1, 1],
            "animations": [{ "frames": [] }],
            "collision": { "min": [0.0, 0.0], "max": [8.0, 8.0] }
        }"#;
        let desc: SpriteDescriptor = serde_json::from_str(json).unwrap();
        let desc = desc.normalized();
        assert_eq!(desc.animations[0].frame_count(), 1);
    }
}
