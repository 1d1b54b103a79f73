//! Audio thread and the systems bridging it with the client world.
//!
//! - [`audio_thread`] runs on its own OS thread, owns the [`AudioDevice`] and
//!   processes [`AudioCmd`] messages, emitting [`AudioMessage`] responses.
//! - [`forward_audio_cmds`] hands ECS `AudioCmd` messages to the thread.
//! - [`poll_audio_messages`] drains the thread's responses into the ECS
//!   message queue each tick.
//!
//! See also: [`crate::events::audio`] and [`crate::resources::audio`].

use crate::components::stableid::StableId;
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use crate::resources::soundregistry::SoundInstance;
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info};
use rustc_hash::FxHashSet;

/// Output device driven by the audio thread.
pub trait AudioDevice {
    fn play(&mut self, instance: &SoundInstance) -> Result<(), String>;
    fn stop(&mut self, instance: &SoundInstance);
}

/// Device that only logs what it would play. Used by the headless binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudioDevice;

impl AudioDevice for LogAudioDevice {
    fn play(&mut self, instance: &SoundInstance) -> Result<(), String> {
        info!(
            "[audio] play '{}' engine={} volume={} pitch={}",
            instance.sound_id, instance.engine, instance.volume, instance.pitch
        );
        Ok(())
    }

    fn stop(&mut self, instance: &SoundInstance) {
        info!("[audio] stop '{}' engine={}", instance.sound_id, instance.engine);
    }
}

/// Drain pending messages from the audio thread into `Messages<AudioMessage>`.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut events: ResMut<Messages<AudioMessage>>) {
    events.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // ignore send error on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd so same-tick readers can observe writes.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

/// Entry point of the dedicated audio thread.
///
/// Blocks on the command channel and keeps track of which (sound, engine)
/// pairs are playing so a stop for something that is not playing is not
/// forwarded to the device. Returns after [`AudioCmd::Shutdown`] or when
/// every sender is gone, stopping whatever is still playing.
pub fn audio_thread(
    rx_cmd: Receiver<AudioCmd>,
    tx_msg: Sender<AudioMessage>,
    mut device: Box<dyn AudioDevice + Send>,
) {
    debug!(
        "[audio] thread starting (id={:?})",
        std::thread::current().id()
    );

    let mut playing: FxHashSet<(String, StableId)> = FxHashSet::default();
    let mut handles: Vec<SoundInstance> = Vec::new();

    for cmd in rx_cmd.iter() {
        match cmd {
            AudioCmd::PlaySound { instance } => {
                let key = (instance.sound_id.clone(), instance.engine);
                match device.play(&instance) {
                    Ok(()) => {
                        if playing.insert(key) {
                            handles.push(instance.clone());
                        }
                        let _ = tx_msg.send(AudioMessage::SoundStarted {
                            sound: instance.sound_id,
                            engine: instance.engine,
                        });
                    }
                    Err(error) => {
                        let _ = tx_msg.send(AudioMessage::SoundFailed {
                            sound: instance.sound_id,
                            engine: instance.engine,
                            error,
                        });
                    }
                }
            }
            AudioCmd::StopSound { instance } => {
                let key = (instance.sound_id.clone(), instance.engine);
                if playing.remove(&key) {
                    device.stop(&instance);
                    handles.retain(|h| !(h.sound_id == instance.sound_id && h.engine == instance.engine));
                    let _ = tx_msg.send(AudioMessage::SoundStopped {
                        sound: instance.sound_id,
                        engine: instance.engine,
                    });
                }
            }
            AudioCmd::Shutdown => {
                debug!("[audio] shutdown requested");
                break;
            }
        }
    }

    for instance in handles.drain(..) {
        device.stop(&instance);
    }
    debug!(
        "[audio] thread exiting (id={:?})",
        std::thread::current().id()
    );
}
