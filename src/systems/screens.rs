//! Title, ready and game-over screens.
//!
//! Each non-playing screen is driven by its own [`EventSequence`]. The
//! active event picks a [`Caption`], which is laid out into the text pool
//! with [`EntityPool::spawn_from_text`]; the text alpha follows the active
//! event's progress so captions fade in or out without extra timers.
//!
//! | screen    | events                        | on completion |
//! |-----------|-------------------------------|---------------|
//! | Title     | ShowTitle, Blink (looping)    | never         |
//! | Ready     | Ready, Go                     | Playing       |
//! | GameOver  | ShowGameOver, ShowScore       | Title         |

use glam::Vec2;
use smallvec::{SmallVec, smallvec};

use crate::components::entitypool::{EntityPool, TEXT_SPACING, TextOptions};
use crate::components::eventsequence::{EventSequence, SequenceEvent};
use crate::resources::fontstore::GlyphMap;
use crate::resources::gamestate::Screen;
use crate::resources::screensize::ScreenSize;

/// Scale applied to caption glyphs.
pub const TEXT_SCALE: f32 = 2.0;
/// Line height as a multiple of the scaled glyph height.
const LINE_SPACING: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleStep {
    ShowTitle,
    Blink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadyStep {
    Ready,
    Go,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverStep {
    ShowGameOver,
    ShowScore,
}

pub fn title_sequence() -> EventSequence<TitleStep> {
    EventSequence::new([
        SequenceEvent::new(0.0, 1500.0, TitleStep::ShowTitle),
        SequenceEvent::new(0.0, 900.0, TitleStep::Blink),
    ])
    .with_looping(true)
}

pub fn ready_sequence() -> EventSequence<ReadyStep> {
    EventSequence::new([
        SequenceEvent::new(0.0, 1000.0, ReadyStep::Ready),
        SequenceEvent::new(100.0, 600.0, ReadyStep::Go),
    ])
}

pub fn game_over_sequence() -> EventSequence<GameOverStep> {
    EventSequence::new([
        SequenceEvent::new(0.0, 1500.0, GameOverStep::ShowGameOver),
        SequenceEvent::new(100.0, 2000.0, GameOverStep::ShowScore),
    ])
}

/// Text currently wanted on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caption {
    Title,
    TitlePrompt,
    Ready,
    Go,
    GameOver,
    Score(u32),
}

impl Caption {
    pub fn lines(&self) -> SmallVec<[String; 2]> {
        match self {
            Caption::Title => smallvec!["SKYRAID".to_string()],
            Caption::TitlePrompt => smallvec!["SKYRAID".to_string(), "PRESS FIRE".to_string()],
            Caption::Ready => smallvec!["READY".to_string()],
            Caption::Go => smallvec!["GO!".to_string()],
            Caption::GameOver => smallvec!["GAME OVER".to_string()],
            Caption::Score(score) => {
                smallvec!["GAME OVER".to_string(), format!("SCORE: {}", score)]
            }
        }
    }
}

/// The three screen sequences and the caption on display.
#[derive(Debug, Clone)]
pub struct Screens {
    pub title: EventSequence<TitleStep>,
    pub ready: EventSequence<ReadyStep>,
    pub game_over: EventSequence<GameOverStep>,
    shown: Option<Caption>,
}

impl Default for Screens {
    fn default() -> Self {
        Self::new()
    }
}

impl Screens {
    pub fn new() -> Self {
        Self {
            title: title_sequence(),
            ready: ready_sequence(),
            game_over: game_over_sequence(),
            shown: None,
        }
    }

    pub fn shown(&self) -> Option<Caption> {
        self.shown
    }

    /// Start the sequence of `screen` and stop the others.
    pub fn enter(&mut self, screen: Screen) {
        self.title.stop();
        self.ready.stop();
        self.game_over.stop();
        match screen {
            Screen::Title => self.title.start(),
            Screen::Ready => self.ready.start(),
            Screen::GameOver => self.game_over.start(),
            Screen::Playing => {}
        }
    }

    /// Advance the sequence of `screen` and return the caption it wants with
    /// its alpha.
    pub fn advance(&mut self, screen: Screen, dt_ms: f32, score: u32) -> Option<(Caption, f32)> {
        match screen {
            Screen::Title => {
                self.title.advance(dt_ms);
                let alpha = self.title.alpha();
                match self.title.active()? {
                    TitleStep::ShowTitle => Some((Caption::Title, alpha)),
                    TitleStep::Blink => Some((Caption::TitlePrompt, 1.0 - alpha)),
                }
            }
            Screen::Ready => {
                self.ready.advance(dt_ms);
                let alpha = self.ready.alpha();
                match self.ready.active()? {
                    ReadyStep::Ready => Some((Caption::Ready, alpha)),
                    ReadyStep::Go => Some((Caption::Go, 1.0 - alpha)),
                }
            }
            Screen::GameOver => {
                self.game_over.advance(dt_ms);
                let alpha = self.game_over.alpha();
                match self.game_over.active()? {
                    GameOverStep::ShowGameOver => Some((Caption::GameOver, alpha)),
                    GameOverStep::ShowScore => Some((Caption::Score(score), 1.0 - alpha)),
                }
            }
            Screen::Playing => None,
        }
    }

    /// True once the one-shot sequence of `screen` has run out.
    pub fn is_finished(&self, screen: Screen) -> bool {
        match screen {
            Screen::Ready => self.ready.is_complete(),
            Screen::GameOver => self.game_over.is_complete(),
            Screen::Title | Screen::Playing => false,
        }
    }

    /// Bring the text pool in line with `wanted`.
    ///
    /// Glyphs are respawned only when the caption changes; alpha is applied
    /// every call.
    pub fn show(
        &mut self,
        text: &mut EntityPool,
        wanted: Option<(Caption, f32)>,
        screen: &ScreenSize,
        font: &impl GlyphMap,
    ) {
        let caption = wanted.map(|(caption, _)| caption);
        if caption != self.shown {
            text.clear();
            if let Some(caption) = caption {
                layout_caption(text, &caption, screen, font);
            }
            self.shown = caption;
        }
        if let Some((_, alpha)) = wanted {
            text.set_alpha(alpha);
        }
    }
}

/// Spawn the lines of `caption` centred on the playfield.
fn layout_caption(
    text: &mut EntityPool,
    caption: &Caption,
    screen: &ScreenSize,
    font: &impl GlyphMap,
) {
    let glyph = text.sprite().panel_size * TEXT_SCALE;
    let lines = caption.lines();
    let line_height = glyph.y * LINE_SPACING;
    let block_height = line_height * (lines.len() as f32 - 1.0) + glyph.y;
    let top = (screen.h as f32 - block_height) * 0.5;
    for (row, line) in lines.iter().enumerate() {
        let chars = line.chars().count() as f32;
        let width = glyph.x * TEXT_SPACING * (chars - 1.0).max(0.0) + glyph.x;
        text.spawn_from_text(
            line,
            TextOptions {
                position: Vec2::new(
                    (screen.w as f32 - width) * 0.5,
                    top + row as f32 * line_height,
                ),
                scale: TEXT_SCALE,
                transparency: 0.0,
                reset: false,
            },
            font,
        );
    }
}
