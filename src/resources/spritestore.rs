//! Sprite descriptor registry.
//!
//! Central store of the [`SpriteDescriptor`]s used by the game, keyed by
//! string IDs. [`SpriteStore::builtin`] provides the default sheet layout;
//! [`SpriteStore::load_json`] replaces or adds descriptors from a JSON file
//! shaped as `{ "key": SpriteDescriptor, ... }`.

use std::path::Path;
use std::sync::Arc;

use glam::Vec2;
use log::info;
use rustc_hash::FxHashMap;

use crate::components::sprite::{Animation, AnimationEnd, Panel, SpriteDescriptor};
use crate::resources::fontstore::FONT_CHARSET;

pub const PLAYER: &str = "player";
pub const PLAYER_BULLET: &str = "player_bullet";
pub const ENEMY_BULLET: &str = "enemy_bullet";
pub const ENEMY_SMALL: &str = "enemy_small";
pub const ENEMY_MEDIUM: &str = "enemy_medium";
pub const ENEMY_LARGE: &str = "enemy_large";
pub const EXPLOSION: &str = "explosion";
pub const FONT: &str = "font";

/// Player animation indices.
pub const PLAYER_IDLE: usize = 0;
pub const PLAYER_LEFT: usize = 1;
pub const PLAYER_RIGHT: usize = 2;

/// Registry of shared sprite descriptors.
#[derive(Debug, Clone, Default)]
pub struct SpriteStore {
    sprites: FxHashMap<String, Arc<SpriteDescriptor>>,
}

impl SpriteStore {
    pub fn new() -> Self {
        Self {
            sprites: FxHashMap::default(),
        }
    }

    /// Descriptors for every entity kind the game spawns.
    pub fn builtin() -> Self {
        let mut store = Self::new();

        store.insert(
            PLAYER,
            SpriteDescriptor::new(PLAYER, 16.0, 16.0)
                .with_sheet(3, 1)
                .with_animations(vec![
                    Animation::still(Panel::new(0, 0)),
                    Animation::still(Panel::new(1, 0)),
                    Animation::still(Panel::new(2, 0)),
                ])
                .with_collision(Vec2::new(3.0, 2.0), Vec2::new(13.0, 15.0)),
        );
        store.insert(
            PLAYER_BULLET,
            SpriteDescriptor::new(PLAYER_BULLET, 4.0, 8.0)
                .with_sheet(2, 1)
                .with_animations(vec![Animation::strip(
                    Panel::new(0, 0),
                    2,
                    AnimationEnd::Loop,
                )]),
        );
        store.insert(
            ENEMY_BULLET,
            SpriteDescriptor::new(ENEMY_BULLET, 6.0, 6.0)
                .with_sheet(2, 1)
                .with_animations(vec![Animation::strip(
                    Panel::new(0, 0),
                    2,
                    AnimationEnd::Loop,
                )]),
        );
        store.insert(
            ENEMY_SMALL,
            SpriteDescriptor::new(ENEMY_SMALL, 16.0, 16.0)
                .with_sheet(2, 1)
                .with_animations(vec![Animation::strip(
                    Panel::new(0, 0),
                    2,
                    AnimationEnd::Loop,
                )])
                .with_collision(Vec2::new(2.0, 2.0), Vec2::new(14.0, 14.0)),
        );
        store.insert(
            ENEMY_MEDIUM,
            SpriteDescriptor::new(ENEMY_MEDIUM, 32.0, 16.0)
                .with_sheet(2, 1)
                .with_animations(vec![Animation::strip(
                    Panel::new(0, 0),
                    2,
                    AnimationEnd::Loop,
                )])
                .with_collision(Vec2::new(2.0, 1.0), Vec2::new(30.0, 15.0)),
        );
        store.insert(
            ENEMY_LARGE,
            SpriteDescriptor::new(ENEMY_LARGE, 32.0, 32.0)
                .with_sheet(2, 1)
                .with_animations(vec![Animation::strip(
                    Panel::new(0, 0),
                    2,
                    AnimationEnd::Loop,
                )])
                .with_collision(Vec2::new(2.0, 4.0), Vec2::new(30.0, 28.0)),
        );
        store.insert(
            EXPLOSION,
            SpriteDescriptor::new(EXPLOSION, 16.0, 16.0)
                .with_sheet(5, 1)
                .with_animations(vec![Animation::strip(
                    Panel::new(0, 0),
                    5,
                    AnimationEnd::Kill,
                )]),
        );

        // One still animation per glyph, laid out 16 glyphs per row.
        let glyphs = (0..FONT_CHARSET.chars().count() as u16)
            .map(|i| Animation::still(Panel::new(i % 16, i / 16)))
            .collect();
        store.insert(
            FONT,
            SpriteDescriptor::new(FONT, 8.0, 8.0)
                .with_sheet(16, 3)
                .with_animations(glyphs),
        );

        store
    }

    pub fn insert(&mut self, key: impl Into<String>, descriptor: SpriteDescriptor) {
        self.sprites.insert(key.into(), Arc::new(descriptor));
    }

    pub fn get(&self, key: &str) -> Option<Arc<SpriteDescriptor>> {
        self.sprites.get(key).cloned()
    }

    /// Descriptor for `key`, or a 1x1 placeholder when missing.
    pub fn get_or_placeholder(&self, key: &str) -> Arc<SpriteDescriptor> {
        self.get(key)
            .unwrap_or_else(|| Arc::new(SpriteDescriptor::new(key, 1.0, 1.0)))
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Merge descriptors from JSON text. Returns how many were loaded.
    pub fn merge_json(&mut self, text: &str) -> Result<usize, String> {
        let parsed: FxHashMap<String, SpriteDescriptor> =
            serde_json::from_str(text).map_err(|e| format!("Failed to parse sprites: {}", e))?;
        let count = parsed.len();
        for (key, descriptor) in parsed {
            self.insert(key, descriptor.normalized());
        }
        Ok(count)
    }

    /// Merge descriptors from a JSON file.
    pub fn load_json(&mut self, path: impl AsRef<Path>) -> Result<usize, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read sprite file {}: {}", path.display(), e))?;
        let count = self.merge_json(&text)?;
        info!("Loaded {} sprite descriptors from {}", count, path.display());
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_every_kind() {
        let store = SpriteStore::builtin();
        for key in [
            PLAYER,
            PLAYER_BULLET,
            ENEMY_BULLET,
            ENEMY_SMALL,
            ENEMY_MEDIUM,
            ENEMY_LARGE,
            EXPLOSION,
            FONT,
        ] {
            assert!(store.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_font_has_one_animation_per_glyph() {
        let store = SpriteStore::builtin();
        let font = store.get(FONT).unwrap();
        assert_eq!(font.animations.len(), FONT_CHARSET.chars().count());
    }

    #[test]
    fn test_explosion_ends_with_kill() {
        let store = SpriteStore::builtin();
        let explosion = store.get(EXPLOSION).unwrap();
        assert_eq!(explosion.animations[0].end, AnimationEnd::Kill);
    }

    #[test]
    fn test_merge_json_overrides() {
        let mut store = SpriteStore::builtin();
        let count = store
            .merge_json(
                r#"{ "player": {
                    "tex_key": "hero",
                    "panel_size": [24.0, 24.0],
                    "sheet_panels": [1, 1],
                    "animations": [],
                    "collision": { "min": [0.0, 0.0], "max": [24.0, 24.0] }
                } }"#,
            )
            .unwrap();
        assert_eq!(count, 1);
        let player = store.get(PLAYER).unwrap();
        assert_eq!(player.tex_key, "hero");
        assert_eq!(player.animations.len(), 1);
    }

    #[test]
    fn test_merge_json_rejects_garbage() {
        let mut store = SpriteStore::new();
        assert!(store.merge_json("not json").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_placeholder_for_missing_key() {
        let store = SpriteStore::new();
        let desc = store.get_or_placeholder("nothing");
        assert_eq!(desc.panel_size, Vec2::ONE);
    }
}
