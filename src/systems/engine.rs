//! Engine tick system.
//!
//! Advances every engine's state machine once per tick and turns the queued
//! sound cues into [`SoundRequest`] messages for the client.

use bevy_ecs::prelude::*;
use log::info;

use crate::components::boatengine::BoatEngine;
use crate::components::capabilities::{Drivable, Soundful};
use crate::components::stableid::StableId;
use crate::components::worldposition::WorldPosition;
use crate::events::sound::SoundRequest;
use crate::resources::waterlevel::WaterLevel;

/// Tick one engine and forward its sound cues.
pub fn drive<E: Drivable + Soundful>(
    engine: &mut E,
    id: StableId,
    requests: &mut impl Extend<SoundRequest>,
) {
    if let Some(reason) = engine.tick() {
        info!("engine {} stopped: {:?}", id, reason);
    }
    requests.extend(
        engine
            .take_sound_cues()
            .into_iter()
            .map(|cue| SoundRequest { engine: id, cue }),
    );
}

pub fn boat_engine_tick_system(
    mut engines: Query<(&StableId, &mut BoatEngine)>,
    mut requests: MessageWriter<SoundRequest>,
) {
    let mut batch: Vec<SoundRequest> = Vec::new();
    for (id, mut engine) in engines.iter_mut() {
        drive(engine.as_mut(), *id, &mut batch);
    }
    requests.write_batch(batch);
}

/// Flags engines below the water surface as submerged.
pub fn submersion_system(
    water: Option<Res<WaterLevel>>,
    mut engines: Query<(&WorldPosition, &mut BoatEngine)>,
) {
    let Some(water) = water else {
        return;
    };
    for (pos, mut engine) in engines.iter_mut() {
        let submerged = water.is_submerged(pos);
        if engine.is_submerged() != submerged {
            engine.set_submerged(submerged);
        }
    }
}
