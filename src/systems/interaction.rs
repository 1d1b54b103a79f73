//! Interaction gate: maps a player action on an engine to engine operations.
//!
//! This is the only place that consults the lock flag before coupling.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::boatengine::BoatEngine;
use crate::components::player::Player;
use crate::components::worldposition::WorldPosition;
use crate::events::interaction::{ActionResult, EngineAction};
use crate::resources::engineconfig::EngineConfig;
use crate::resources::worldside::WorldSide;
use crate::systems::coupling::{hook_onto, is_locked, toggle_lock};
use crate::systems::lookup::find_boat_near;

pub fn handle_interaction(
    world: &mut World,
    action: EngineAction,
    actor: Entity,
    target: Entity,
) -> ActionResult {
    if world
        .get_resource::<WorldSide>()
        .is_some_and(|side| side.is_client())
    {
        return ActionResult::Pass;
    }
    if world.get::<BoatEngine>(target).is_none() {
        return ActionResult::Pass;
    }
    let config = world.get_resource::<EngineConfig>().cloned().unwrap_or_default();

    match action {
        EngineAction::Couple => couple(world, actor, target, &config),
        EngineAction::Refuel => {
            let Some(mut engine) = world.get_mut::<BoatEngine>(target) else {
                return ActionResult::Pass;
            };
            let leftover = engine.fuel.fill_up(config.max_fuel);
            info!("Filled up fuel. {} was left over", leftover);
            ActionResult::Success
        }
        EngineAction::ToggleEngine => {
            let Some(mut engine) = world.get_mut::<BoatEngine>(target) else {
                return ActionResult::Pass;
            };
            if engine.is_running() {
                engine.stop();
            } else {
                engine.start();
            }
            info!("Engine is running: {}", engine.is_running());
            ActionResult::Success
        }
        EngineAction::ThrottleUp | EngineAction::ThrottleDown => {
            let Some(mut engine) = world.get_mut::<BoatEngine>(target) else {
                return ActionResult::Pass;
            };
            let level = if action == EngineAction::ThrottleUp {
                engine.increase_power()
            } else {
                engine.decrease_power()
            };
            debug!("power level now {}", level);
            ActionResult::Success
        }
    }
}

fn couple(world: &mut World, actor: Entity, engine: Entity, config: &EngineConfig) -> ActionResult {
    let sneaking = world.get::<Player>(actor).is_some_and(|p| p.sneaking);
    if sneaking {
        toggle_lock(world, engine);
        return ActionResult::Pass;
    }
    if is_locked(world, engine) {
        debug!("engine {:?} is locked, not hooking", engine);
        return ActionResult::Pass;
    }
    let Some(actor_pos) = world.get::<WorldPosition>(actor).copied() else {
        return ActionResult::Pass;
    };
    match find_boat_near(world, actor_pos, config.coupling_search_radius) {
        Some(boat) if hook_onto(world, engine, boat) => ActionResult::Success,
        _ => ActionResult::Pass,
    }
}
