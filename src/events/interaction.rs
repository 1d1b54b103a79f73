//! Player interactions with an engine.
//!
//! The host decides which tool was used on which entity and triggers an
//! [`InteractionEvent`]; [`interaction_observer`] queues
//! [`handle_interaction`](crate::systems::interaction::handle_interaction),
//! which dispatches to the engine operations.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::systems::interaction::handle_interaction;

/// What the player did to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineAction {
    /// Coupling tool: hook onto a nearby boat, or toggle the lock when sneaking.
    Couple,
    /// Fuel item: fill the tank.
    Refuel,
    /// Ignition item: start a stopped engine, stop a running one.
    ToggleEngine,
    ThrottleUp,
    ThrottleDown,
}

/// Outcome reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    /// The action was consumed.
    Success,
    /// Nothing happened; the host may run its default behaviour.
    Pass,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct InteractionEvent {
    pub action: EngineAction,
    pub actor: Entity,
    pub target: Entity,
}

pub fn interaction_observer(trigger: On<InteractionEvent>, mut commands: Commands) {
    let event = *trigger.event();
    commands.queue(move |world: &mut World| {
        let result = handle_interaction(world, event.action, event.actor, event.target);
        debug!("{:?} on {:?}: {:?}", event.action, event.target, result);
    });
}
