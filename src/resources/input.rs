//! Decoded player input.
//!
//! The platform layer turns keyboard or controller state into an
//! [`InputIntents`] value once per frame; the simulation only ever sees these
//! intents.

/// Directional and fire intents for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntents {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire is held.
    pub fire: bool,
    /// Fire went down this frame.
    pub fire_pressed: bool,
}

impl InputIntents {
    /// Horizontal axis in `{-1, 0, 1}`; opposite directions cancel.
    pub fn axis_x(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }

    /// Vertical axis in `{-1, 0, 1}`, positive downwards.
    pub fn axis_y(&self) -> f32 {
        (self.down as i8 - self.up as i8) as f32
    }

    /// Advance edge state: `fire_pressed` is true only when fire is held now
    /// and was not held in `previous`.
    pub fn with_edges_from(mut self, previous: &InputIntents) -> Self {
        self.fire_pressed = self.fire && !previous.fire;
        self
    }
}
