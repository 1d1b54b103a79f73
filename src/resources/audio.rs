//! ECS resources that bridge the client world with the background audio thread.
//!
//! Use [`setup_audio`] once during initialization to spawn the audio thread
//! and insert the [`AudioBridge`] and message resources. Call
//! [`shutdown_audio`] during teardown to stop the thread.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::systems::audio::{AudioDevice, LogAudioDevice, audio_thread};
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Shared bridge between the ECS world and the audio thread.
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn the audio thread with the logging device.
pub fn setup_audio(world: &mut World) {
    setup_audio_with(world, Box::new(LogAudioDevice));
}

/// Spawn the audio thread driving `device` and register bridge resources.
///
/// Creates the command/message channels, spawns the thread running
/// [`audio_thread`], inserts [`AudioBridge`] and initializes
/// `Messages<AudioMessage>` and `Messages<AudioCmd>`.
pub fn setup_audio_with(world: &mut World, device: Box<dyn AudioDevice + Send>) {
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || audio_thread(rx_cmd, tx_msg, device));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.insert_resource(Messages::<AudioMessage>::default());
    if !world.contains_resource::<Messages<AudioCmd>>() {
        world.insert_resource(Messages::<AudioCmd>::default());
    }
}

/// Request shutdown of the audio thread and join it.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
