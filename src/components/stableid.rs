//! Stable identity shared by the server and client worlds.
//!
//! `bevy_ecs` [`Entity`](bevy_ecs::prelude::Entity) handles are local to one
//! world, so anything that crosses a world boundary (sound requests, coupling
//! records in persisted items) refers to entities by [`StableId`] instead.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StableId(pub Uuid);

impl StableId {
    /// Fresh random id.
    pub fn new() -> Self {
        StableId(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for StableId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
