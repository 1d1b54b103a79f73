//! Engine <-> boat coupling records.
//!
//! A link is stored on both sides: the engine carries [`HookedBoat`] and the
//! boat carries [`EngineCoupler`]. Both are only ever inserted and removed
//! together by [`crate::systems::coupling`], which keeps at most one link per
//! engine and per boat.
//!
//! The [`StableId`] copies let the link be written into persisted items and
//! resolved again after entity handles have changed.

use bevy_ecs::prelude::{Component, Entity};

use crate::components::stableid::StableId;

/// Engine side of a coupling.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookedBoat {
    pub boat: Entity,
    pub boat_id: StableId,
}

/// Boat side of a coupling.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineCoupler {
    pub engine: Entity,
    pub engine_id: StableId,
}
