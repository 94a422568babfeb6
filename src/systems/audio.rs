//! Audio thread.
//!
//! The playback backend lives outside the simulation core. [`audio_thread`]
//! is the consumer end of the [`AudioBridge`](crate::resources::audio::AudioBridge)
//! channel: it drains [`AudioCmd`]s, tracks which looped sounds are playing
//! and logs each trigger, until it receives [`AudioCmd::Shutdown`] or the
//! channel closes.

use crossbeam_channel::Receiver;
use log::debug;
use rustc_hash::FxHashSet;

use crate::events::audio::{AudioCmd, Sound};

/// Run the audio loop. Returns the number of play commands handled.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>) -> usize {
    debug!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut looping: FxHashSet<Sound> = FxHashSet::default();
    let mut played = 0;

    // recv blocks; a closed channel ends the loop like Shutdown does
    while let Ok(cmd) = rx_cmd.recv() {
        match cmd {
            AudioCmd::Play { sound, looped } => {
                if looped && !looping.insert(sound) {
                    continue; // already looping
                }
                played += 1;
                debug!("[audio] play '{}' looped={}", sound.key(), looped);
            }
            AudioCmd::StopAll => {
                looping.clear();
                debug!("[audio] stop all");
            }
            AudioCmd::Shutdown => break,
        }
    }
    played
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_counts_plays_until_shutdown() {
        let (tx, rx) = unbounded();
        tx.send(AudioCmd::Play {
            sound: Sound::Shot,
            looped: false,
        })
        .unwrap();
        tx.send(AudioCmd::StopAll).unwrap();
        tx.send(AudioCmd::Play {
            sound: Sound::TitleMusic,
            looped: true,
        })
        .unwrap();
        tx.send(AudioCmd::Shutdown).unwrap();
        tx.send(AudioCmd::Play {
            sound: Sound::Shot,
            looped: false,
        })
        .unwrap();
        assert_eq!(audio_thread(rx), 2);
    }

    #[test]
    fn test_repeated_loop_is_not_counted() {
        let (tx, rx) = unbounded();
        for _ in 0..3 {
            tx.send(AudioCmd::Play {
                sound: Sound::TitleMusic,
                looped: true,
            })
            .unwrap();
        }
        tx.send(AudioCmd::StopAll).unwrap();
        tx.send(AudioCmd::Play {
            sound: Sound::TitleMusic,
            looped: true,
        })
        .unwrap();
        tx.send(AudioCmd::Shutdown).unwrap();
        assert_eq!(audio_thread(rx), 2);
    }

    #[test]
    fn test_closed_channel_ends_loop() {
        let (tx, rx) = unbounded::<AudioCmd>();
        drop(tx);
        assert_eq!(audio_thread(rx), 0);
    }
}
