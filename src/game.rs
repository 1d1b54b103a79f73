//! World setup, spawning helpers and schedules.
//!
//! The simulation runs two worlds: the *server* world owns engines, boats and
//! couplings; the *client* world owns the sound registry and the audio
//! bridge. [`run_tick`] advances both and replicates sound requests between
//! them.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;

use crate::components::boat::{Boat, BoatKind};
use crate::components::boatengine::BoatEngine;
use crate::components::equipment::Equipment;
use crate::components::player::Player;
use crate::components::stableid::StableId;
use crate::components::worldposition::WorldPosition;
use crate::events::audio::AudioCmd;
use crate::events::interaction::interaction_observer;
use crate::events::removal::{remove_boat_observer, remove_engine_observer};
use crate::events::sound::SoundRequest;
use crate::resources::audio::AudioBridge;
use crate::resources::engineconfig::EngineConfig;
use crate::resources::soundregistry::begin_client_session;
use crate::resources::worldside::WorldSide;
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_bevy_audio_cmds, update_bevy_audio_messages,
};
use crate::systems::coupling::{coupling_integrity_system, hooked_engine_follow_system};
use crate::systems::engine::{boat_engine_tick_system, submersion_system};
use crate::systems::replication::replicate_sound_requests;
use crate::systems::sound::{sound_request_system, update_sound_requests};

/// Server world with config, message queues and observers in place.
pub fn setup_server_world(config: EngineConfig) -> World {
    let mut world = World::new();
    world.insert_resource(config);
    world.insert_resource(WorldSide::Server);
    world.insert_resource(Messages::<SoundRequest>::default());
    world.spawn(Observer::new(interaction_observer));
    world.spawn(Observer::new(remove_engine_observer));
    world.spawn(Observer::new(remove_boat_observer));
    // observers must exist before the first interaction is triggered
    world.flush();
    world
}

/// Client world with a fresh sound session. The audio thread is not started;
/// call [`crate::resources::audio::setup_audio`] for that.
pub fn setup_client_world(config: &EngineConfig) -> World {
    let mut world = World::new();
    world.insert_resource(WorldSide::Client);
    world.insert_resource(Messages::<SoundRequest>::default());
    world.insert_resource(Messages::<AudioCmd>::default());
    begin_client_session(&mut world, config.sound_keying);
    world
}

pub fn server_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            coupling_integrity_system,
            hooked_engine_follow_system,
            submersion_system,
            boat_engine_tick_system,
        )
            .chain(),
    );
    schedule
}

pub fn client_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            update_sound_requests,
            sound_request_system,
            // audio systems must be together
            update_bevy_audio_cmds,
            forward_audio_cmds.run_if(resource_exists::<AudioBridge>),
            poll_audio_messages.run_if(resource_exists::<AudioBridge>),
            update_bevy_audio_messages.run_if(resource_exists::<AudioBridge>),
        )
            .chain(),
    );
    schedule
}

/// One simulation tick across both worlds.
pub fn run_tick(
    server: &mut World,
    client: &mut World,
    server_schedule: &mut Schedule,
    client_schedule: &mut Schedule,
) {
    server_schedule.run(server);
    replicate_sound_requests(server, client);
    client_schedule.run(client);
    server.clear_trackers();
    client.clear_trackers();
}

pub fn spawn_boat(world: &mut World, position: WorldPosition, kind: BoatKind) -> Entity {
    world.spawn((StableId::new(), position, Boat::new(kind))).id()
}

/// Spawn a stopped, empty engine tuned by the world's [`EngineConfig`].
pub fn spawn_boat_engine(world: &mut World, position: WorldPosition) -> Entity {
    let config = world.get_resource::<EngineConfig>().cloned().unwrap_or_default();
    world
        .spawn((
            StableId::new(),
            position,
            BoatEngine::new(&config),
            Equipment::default(),
        ))
        .id()
}

pub fn spawn_player(world: &mut World, position: WorldPosition, sneaking: bool) -> Entity {
    world.spawn((position, Player { sneaking })).id()
}
