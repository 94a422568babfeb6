//! Bridge between the simulation and the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and get an [`AudioBridge`]. Call [`shutdown_audio`] during teardown to
//! stop the thread.

use crossbeam_channel::{Sender, unbounded};
use log::debug;

use crate::events::audio::{AudioCmd, Sound};
use crate::systems::audio::audio_thread;

/// Fire-and-forget sound trigger.
pub trait AudioSink {
    fn play(&mut self, sound: Sound, looped: bool);
    fn stop_all(&mut self) {}
}

/// Discards every sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: Sound, _looped: bool) {}
}

impl AudioSink for Sender<AudioCmd> {
    fn play(&mut self, sound: Sound, looped: bool) {
        // ignore send error on shutdown
        let _ = self.send(AudioCmd::Play { sound, looped });
    }

    fn stop_all(&mut self) {
        let _ = self.send(AudioCmd::StopAll);
    }
}

/// Owner of the audio thread and its command channel.
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (simulation -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

impl AudioSink for AudioBridge {
    fn play(&mut self, sound: Sound, looped: bool) {
        self.tx_cmd.play(sound, looped);
    }

    fn stop_all(&mut self) {
        self.tx_cmd.stop_all();
    }
}

/// Spawn the audio thread and return the bridge to it.
pub fn setup_audio() -> AudioBridge {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let handle = std::thread::spawn(move || {
        let played = audio_thread(rx_cmd);
        debug!("[audio] thread exiting after {} sounds", played);
    });
    AudioBridge { tx_cmd, handle }
}

/// Request shutdown of the audio thread and join it.
pub fn shutdown_audio(bridge: AudioBridge) {
    let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
    let _ = bridge.handle.join();
}
