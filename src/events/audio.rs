//! Audio messages.
//!
//! The simulation never waits on audio: it fires [`AudioCmd`]s through an
//! [`AudioSink`](crate::resources::audio::AudioSink) and forgets about them.

/// Sound handles the game can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Shot,
    EnemyHit,
    Explosion,
    PlayerHit,
    GameOver,
    TitleMusic,
}

impl Sound {
    /// Asset key of the sound for the playback backend.
    pub fn key(&self) -> &'static str {
        match self {
            Sound::Shot => "shot",
            Sound::EnemyHit => "enemy_hit",
            Sound::Explosion => "explosion",
            Sound::PlayerHit => "player_hit",
            Sound::GameOver => "game_over",
            Sound::TitleMusic => "title_music",
        }
    }
}

/// Commands sent *to* the audio thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioCmd {
    Play { sound: Sound, looped: bool },
    StopAll,
    Shutdown,
}
