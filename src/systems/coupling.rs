//! Engine <-> boat coupling.
//!
//! [`hook_onto`] and [`unhook`] are the only places that insert or remove the
//! coupling components, and they always touch both sides. A boat holds at
//! most one engine and an engine at most one boat: hooking onto a new boat
//! drops the old link first, and hooking onto a boat that already carries
//! another engine unhooks that engine.
//!
//! The lock flag is not checked here. Interaction code consults
//! [`is_locked`] before calling [`hook_onto`].
//!
//! # Related
//!
//! - [`hooked_engine_follow_system`] keeps hooked engines at their boat's stern
//! - [`coupling_integrity_system`] drops links whose boat disappeared

use bevy_ecs::prelude::*;
use log::{debug, info, warn};

use crate::components::boat::Boat;
use crate::components::boatengine::BoatEngine;
use crate::components::coupling::{EngineCoupler, HookedBoat};
use crate::components::stableid::StableId;
use crate::components::worldposition::WorldPosition;
use crate::resources::engineconfig::EngineConfig;

/// Link `engine` to `boat`, replacing any existing links on either side.
///
/// Returns `false` (and changes nothing) if either entity is not what it
/// should be.
pub fn hook_onto(world: &mut World, engine: Entity, boat: Entity) -> bool {
    let Some(engine_id) = stable_id_with::<BoatEngine>(world, engine) else {
        warn!("hook_onto: {:?} is not an engine", engine);
        return false;
    };
    let Some(boat_id) = stable_id_with::<Boat>(world, boat) else {
        warn!("hook_onto: {:?} is not a boat", boat);
        return false;
    };

    unhook(world, engine);
    if let Some(other) = world.get::<EngineCoupler>(boat).map(|c| c.engine) {
        unhook(world, other);
        // coupler without a matching engine side
        world.entity_mut(boat).remove::<EngineCoupler>();
    }

    world
        .entity_mut(engine)
        .insert(HookedBoat { boat, boat_id });
    world
        .entity_mut(boat)
        .insert(EngineCoupler { engine, engine_id });
    info!("hooked engine {} onto boat {}", engine_id, boat_id);
    true
}

/// Remove `engine`'s link on both sides. Returns whether a link existed.
pub fn unhook(world: &mut World, engine: Entity) -> bool {
    let Ok(mut engine_ref) = world.get_entity_mut(engine) else {
        return false;
    };
    let Some(hooked) = engine_ref.take::<HookedBoat>() else {
        return false;
    };
    if let Ok(mut boat_ref) = world.get_entity_mut(hooked.boat) {
        if boat_ref
            .get::<EngineCoupler>()
            .is_some_and(|c| c.engine == engine)
        {
            boat_ref.remove::<EngineCoupler>();
        }
    }
    debug!("unhooked engine {:?} from boat {}", engine, hooked.boat_id);
    true
}

/// Boat `engine` is hooked onto, if any.
pub fn hooked_boat(world: &World, engine: Entity) -> Option<Entity> {
    world.get::<HookedBoat>(engine).map(|h| h.boat)
}

/// Engine hooked onto `boat`, if any.
pub fn coupled_engine(world: &World, boat: Entity) -> Option<Entity> {
    world.get::<EngineCoupler>(boat).map(|c| c.engine)
}

pub fn is_locked(world: &World, engine: Entity) -> bool {
    world.get::<BoatEngine>(engine).is_some_and(|e| e.is_locked())
}

/// Flip the lock flag. Returns the new value, or `None` for a non-engine.
pub fn toggle_lock(world: &mut World, engine: Entity) -> Option<bool> {
    let mut state = world.get_mut::<BoatEngine>(engine)?;
    let locked = state.toggle_lock();
    info!("engine {:?} locked: {}", engine, locked);
    Some(locked)
}

fn stable_id_with<T: Component>(world: &World, entity: Entity) -> Option<StableId> {
    let entity_ref = world.get_entity(entity).ok()?;
    if !entity_ref.contains::<T>() {
        return None;
    }
    entity_ref.get::<StableId>().copied()
}

/// Keeps hooked engines at their boat's stern, arm turned with the boat.
pub fn hooked_engine_follow_system(
    config: Res<EngineConfig>,
    mut engines: Query<(&HookedBoat, &mut WorldPosition, &mut BoatEngine)>,
    boats: Query<(&WorldPosition, &Boat), Without<BoatEngine>>,
) {
    for (hooked, mut engine_pos, mut engine) in engines.iter_mut() {
        if let Ok((boat_pos, boat)) = boats.get(hooked.boat) {
            let (dx, dz) = boat.stern_offset(config.mount_distance);
            *engine_pos = boat_pos.offset(dx, 0.0, dz);
            engine.arm_rotation.yaw = boat.yaw;
        }
    }
}

/// Drops engine-side links whose boat no longer exists, and boat-side links
/// whose engine no longer exists.
pub fn coupling_integrity_system(
    mut commands: Commands,
    engines: Query<(Entity, &HookedBoat)>,
    boats: Query<(Entity, &EngineCoupler)>,
    boat_exists: Query<(), With<Boat>>,
    engine_exists: Query<(), With<BoatEngine>>,
) {
    for (engine, hooked) in engines.iter() {
        if boat_exists.get(hooked.boat).is_err() {
            warn!("engine {:?} lost its boat {}", engine, hooked.boat_id);
            commands.entity(engine).remove::<HookedBoat>();
        }
    }
    for (boat, coupler) in boats.iter() {
        if engine_exists.get(coupler.engine).is_err() {
            warn!("boat {:?} lost its engine {}", boat, coupler.engine_id);
            commands.entity(boat).remove::<EngineCoupler>();
        }
    }
}
