//! Engine and boat removal.
//!
//! Removing an engine always produces its item first. If the item cannot be
//! built the engine, its link and its boat are left untouched and the error
//! is returned, so no equipment is silently lost.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::boatengine::BoatEngine;
use crate::components::coupling::EngineCoupler;
use crate::components::droppeditem::DroppedItem;
use crate::components::stableid::StableId;
use crate::components::worldposition::WorldPosition;
use crate::events::sound::{EngineSound, SoundRequest};
use crate::persistence::{PersistError, item_from_engine_entity};
use crate::resources::engineconfig::EngineConfig;
use crate::systems::coupling::unhook;
use crate::systems::lookup::find_engine_by_id;

/// Remove `engine`, dropping its item where it stood.
///
/// Returns the dropped item entity.
pub fn remove_boat_engine(world: &mut World, engine: Entity) -> Result<Entity, PersistError> {
    let item = item_from_engine_entity(world, engine)?;
    let position = world
        .get::<WorldPosition>(engine)
        .copied()
        .unwrap_or_default();

    unhook(world, engine);

    let id = world.get::<StableId>(engine).copied();
    let cues = match world.get_mut::<BoatEngine>(engine) {
        Some(mut state) => {
            state.stop();
            state.take_sound_cues()
        }
        None => Default::default(),
    };
    if let (Some(id), Some(mut requests)) =
        (id, world.get_resource_mut::<Messages<SoundRequest>>())
    {
        let stops_all = cues.contains(&EngineSound::StopAll);
        for cue in cues {
            requests.write(SoundRequest { engine: id, cue });
        }
        // a stopped engine queues nothing, its sounds still have to go
        if !stops_all {
            requests.write(SoundRequest {
                engine: id,
                cue: EngineSound::StopAll,
            });
        }
    }

    world.despawn(engine);
    let dropped = world.spawn((DroppedItem { item }, position)).id();
    info!("removed engine {:?}, dropped item {:?}", engine, dropped);
    Ok(dropped)
}

/// Remove `boat` together with the engine hooked onto it, if any.
///
/// The engine is looked up by its stable id in a box around the boat. Returns
/// the dropped engine item, if an engine was found.
pub fn remove_boat(world: &mut World, boat: Entity) -> Result<Option<Entity>, PersistError> {
    let engine_id = world.get::<EngineCoupler>(boat).map(|c| c.engine_id);
    let boat_pos = world.get::<WorldPosition>(boat).copied().unwrap_or_default();
    let size = world
        .get_resource::<EngineConfig>()
        .map(|c| c.removal_search_size)
        .unwrap_or_else(|| EngineConfig::new().removal_search_size);

    let dropped = match engine_id.and_then(|id| find_engine_by_id(world, id, boat_pos, size)) {
        Some(engine) => Some(remove_boat_engine(world, engine)?),
        None => None,
    };
    world.despawn(boat);
    info!("removed boat {:?}", boat);
    Ok(dropped)
}
