//! Playfield size resource.
//!
//! Stores the dimensions of the simulated playfield in pixels. Entity pools
//! cull against it and the player is clamped inside it.

/// Playfield size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}
