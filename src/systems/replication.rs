//! Server -> client replication of sound requests.
//!
//! The server and client worlds never share components. Sound requests leave
//! the server as a JSON batch and are written into the client's
//! `Messages<SoundRequest>` on the other side.

use bevy_ecs::prelude::*;
use log::{debug, error};

use crate::events::sound::SoundRequest;

/// Drain pending requests from `world` into a wire batch.
pub fn encode_sound_requests(world: &mut World) -> Result<Vec<u8>, serde_json::Error> {
    let batch: Vec<SoundRequest> = match world.get_resource_mut::<Messages<SoundRequest>>() {
        Some(mut messages) => messages.drain().collect(),
        None => Vec::new(),
    };
    serde_json::to_vec(&batch)
}

/// Decode a wire batch into `world`'s request queue. Returns the count.
pub fn decode_sound_requests(world: &mut World, bytes: &[u8]) -> Result<usize, serde_json::Error> {
    let batch: Vec<SoundRequest> = serde_json::from_slice(bytes)?;
    if !world.contains_resource::<Messages<SoundRequest>>() {
        world.insert_resource(Messages::<SoundRequest>::default());
    }
    let mut messages = world.resource_mut::<Messages<SoundRequest>>();
    let count = batch.len();
    for request in batch {
        messages.write(request);
    }
    Ok(count)
}

/// Move this tick's sound requests from `server` to `client`.
pub fn replicate_sound_requests(server: &mut World, client: &mut World) -> usize {
    let replicated = encode_sound_requests(server)
        .and_then(|bytes| decode_sound_requests(client, &bytes));
    match replicated {
        Ok(count) => {
            if count > 0 {
                debug!("replicated {} sound requests", count);
            }
            count
        }
        Err(e) => {
            error!("sound request replication failed: {}", e);
            0
        }
    }
}
