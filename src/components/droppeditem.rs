//! Items lying in the world, such as the item a removed engine turns into.

use bevy_ecs::prelude::Component;

use crate::persistence::EngineItem;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct DroppedItem {
    pub item: EngineItem,
}
