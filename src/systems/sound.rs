//! Client-side handling of replicated sound requests.

use bevy_ecs::prelude::*;
use log::warn;

use crate::events::audio::{AudioCmd, AudioSink};
use crate::events::sound::{EngineSound, SoundRequest};
use crate::resources::soundregistry::{SoundInstance, SoundInstanceRegistry, StartOutcome};

/// Apply one request to the registry.
pub fn apply_sound_request(
    registry: &mut SoundInstanceRegistry,
    request: &SoundRequest,
    sink: &mut impl AudioSink,
) {
    match request.cue {
        EngineSound::Play(identifier) => {
            let instance = SoundInstance::for_engine(request.engine, identifier);
            if registry.start(identifier, instance, sink) == StartOutcome::Rejected {
                warn!("{:?} rejected for engine {}", identifier, request.engine);
            }
        }
        EngineSound::Stop(identifier) => {
            registry.stop_identifier(identifier, request.engine, sink);
        }
        EngineSound::StopAll => {
            registry.stop_all_for_engine(request.engine, sink);
        }
    }
}

/// Advance the `SoundRequest` queue so freshly replicated requests are readable.
pub fn update_sound_requests(mut msgs: ResMut<Messages<SoundRequest>>) {
    msgs.update();
}

/// Feed replicated requests into the session's registry.
pub fn sound_request_system(
    mut requests: MessageReader<SoundRequest>,
    registry: Option<ResMut<SoundInstanceRegistry>>,
    mut audio: MessageWriter<AudioCmd>,
) {
    let Some(mut registry) = registry else {
        // no session: drop the requests
        requests.clear();
        return;
    };
    for request in requests.read() {
        apply_sound_request(&mut registry, request, &mut audio);
    }
}
