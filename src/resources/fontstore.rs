//! Glyph lookup for text entities.
//!
//! Text is drawn with an ordinary entity pool whose descriptor holds one
//! animation per glyph. A [`GlyphMap`] turns a character into that animation
//! index, or `None` when the font has no glyph for it.

use rustc_hash::FxHashMap;

/// Characters covered by the built-in font, in sheet order.
pub const FONT_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!?.:-";

/// Maps a character to an animation index of the font descriptor.
pub trait GlyphMap {
    fn glyph(&self, c: char) -> Option<usize>;
}

impl<F> GlyphMap for F
where
    F: Fn(char) -> Option<usize>,
{
    fn glyph(&self, c: char) -> Option<usize> {
        self(c)
    }
}

/// Table-driven glyph map.
#[derive(Debug, Clone, Default)]
pub struct FontStore {
    glyphs: FxHashMap<char, usize>,
}

impl FontStore {
    /// Create an empty font store.
    pub fn new() -> Self {
        Self {
            glyphs: FxHashMap::default(),
        }
    }

    /// Map each character of `charset` to its position in the string.
    pub fn from_charset(charset: &str) -> Self {
        let mut store = Self::new();
        for (index, c) in charset.chars().enumerate() {
            store.add(c, index);
        }
        store
    }

    /// Add a glyph for `c`.
    pub fn add(&mut self, c: char, animation: usize) {
        self.glyphs.insert(c, animation);
    }

    /// Get the number of mapped glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphMap for FontStore {
    /// Lowercase letters fall back to their uppercase glyph.
    fn glyph(&self, c: char) -> Option<usize> {
        self.glyphs
            .get(&c)
            .or_else(|| self.glyphs.get(&c.to_ascii_uppercase()))
            .copied()
    }
}
