//! High-level game state.
//!
//! Tracks which screen the game is on, any pending transition requested
//! during a tick, and the score of the current run. The orchestrator applies
//! a pending transition at the end of the frame so every system in the frame
//! sees the same screen.

use log::info;

/// Screens the game cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Title,
    Ready,
    Playing,
    GameOver,
}

/// Representation of a requested next screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NextScreen {
    #[default]
    Unchanged,
    Pending(Screen),
}

/// Authoritative current screen plus run score.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    current: Screen,
    next: NextScreen,
    pub score: u32,
    /// Best score since start-up.
    pub hiscore: u32,
}

impl GameState {
    /// Create a new state on the title screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only access to the current screen.
    pub fn get(&self) -> Screen {
        self.current
    }

    pub fn next(&self) -> NextScreen {
        self.next
    }

    /// Request a transition to `next`. Requesting the current screen is
    /// ignored.
    pub fn request(&mut self, next: Screen) {
        if next != self.current {
            self.next = NextScreen::Pending(next);
        }
    }

    /// Apply a pending transition. Returns the screen entered, if any.
    pub fn apply_pending(&mut self) -> Option<Screen> {
        let NextScreen::Pending(next) = self.next else {
            return None;
        };
        info!("Screen change: {:?} -> {:?}", self.current, next);
        self.current = next;
        self.next = NextScreen::Unchanged;
        Some(next)
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.hiscore = self.hiscore.max(self.score);
    }

    /// Zero the run score, keeping the best score.
    pub fn reset_score(&mut self) {
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_title() {
        let state = GameState::new();
        assert_eq!(state.get(), Screen::Title);
        assert_eq!(state.next(), NextScreen::Unchanged);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_transition_applies_once() {
        let mut state = GameState::new();
        state.request(Screen::Ready);
        assert_eq!(state.get(), Screen::Title);
        assert_eq!(state.apply_pending(), Some(Screen::Ready));
        assert_eq!(state.get(), Screen::Ready);
        assert_eq!(state.apply_pending(), None);
    }

    #[test]
    fn test_request_current_is_ignored() {
        let mut state = GameState::new();
        state.request(Screen::Title);
        assert_eq!(state.apply_pending(), None);
    }

    #[test]
    fn test_hiscore_survives_reset() {
        let mut state = GameState::new();
        state.add_score(150);
        state.reset_score();
        state.add_score(10);
        assert_eq!(state.score, 10);
        assert_eq!(state.hiscore, 150);
    }
}
