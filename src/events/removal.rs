//! Removal requests for engines and boats.
//!
//! Triggering one of these events queues the matching function from
//! [`crate::systems::removal`]. Failures are logged; callers that need the
//! result call those functions directly.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::error;

use crate::systems::removal::{remove_boat, remove_boat_engine};

#[derive(Event, Debug, Clone, Copy)]
pub struct RemoveEngineEvent {
    pub engine: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct RemoveBoatEvent {
    pub boat: Entity,
}

pub fn remove_engine_observer(trigger: On<RemoveEngineEvent>, mut commands: Commands) {
    let engine = trigger.event().engine;
    commands.queue(move |world: &mut World| {
        if let Err(e) = remove_boat_engine(world, engine) {
            error!("could not remove engine {:?}: {}", engine, e);
        }
    });
}

pub fn remove_boat_observer(trigger: On<RemoveBoatEvent>, mut commands: Commands) {
    let boat = trigger.event().boat;
    commands.queue(move |world: &mut World| {
        if let Err(e) = remove_boat(world, boat) {
            error!("could not remove boat {:?}: {}", boat, e);
        }
    });
}
