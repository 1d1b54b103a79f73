//! Audio commands and messages exchanged with the audio thread.
//!
//! [`AudioSink`] is the play/stop seam the sound registry talks to. The ECS
//! implementations write [`AudioCmd`] messages which
//! [`crate::systems::audio::forward_audio_cmds`] hands to the audio thread.

use bevy_ecs::message::{Message, MessageWriter, Messages};

use crate::components::stableid::StableId;
use crate::resources::soundregistry::SoundInstance;

/// Commands sent *to* the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioCmd {
    PlaySound { instance: SoundInstance },
    StopSound { instance: SoundInstance },
    Shutdown,
}

/// Messages sent *back* from the audio thread
#[derive(Message, Debug, Clone, PartialEq)]
pub enum AudioMessage {
    SoundStarted { sound: String, engine: StableId },
    SoundStopped { sound: String, engine: StableId },
    SoundFailed { sound: String, engine: StableId, error: String },
}

/// Backend side effects requested by the sound registry.
pub trait AudioSink {
    fn play(&mut self, instance: &SoundInstance);
    fn stop(&mut self, instance: &SoundInstance);
}

impl AudioSink for Messages<AudioCmd> {
    fn play(&mut self, instance: &SoundInstance) {
        self.write(AudioCmd::PlaySound {
            instance: instance.clone(),
        });
    }

    fn stop(&mut self, instance: &SoundInstance) {
        self.write(AudioCmd::StopSound {
            instance: instance.clone(),
        });
    }
}

impl AudioSink for MessageWriter<'_, AudioCmd> {
    fn play(&mut self, instance: &SoundInstance) {
        self.write(AudioCmd::PlaySound {
            instance: instance.clone(),
        });
    }

    fn stop(&mut self, instance: &SoundInstance) {
        self.write(AudioCmd::StopSound {
            instance: instance.clone(),
        });
    }
}

impl AudioSink for Vec<AudioCmd> {
    fn play(&mut self, instance: &SoundInstance) {
        self.push(AudioCmd::PlaySound {
            instance: instance.clone(),
        });
    }

    fn stop(&mut self, instance: &SoundInstance) {
        self.push(AudioCmd::StopSound {
            instance: instance.clone(),
        });
    }
}
