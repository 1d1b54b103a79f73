//! Items worn and held by a boat engine (fuel cans, propellers, trims).

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

pub const ARMOR_SLOTS: usize = 4;
pub const HAND_SLOTS: usize = 2;

/// A stack of items. The default stack is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStack {
    pub id: String,
    pub count: u32,
}

impl ItemStack {
    pub fn new(id: impl Into<String>, count: u32) -> Self {
        Self {
            id: id.into(),
            count,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty() || self.count == 0
    }
}

#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct Equipment {
    pub armor: [ItemStack; ARMOR_SLOTS],
    pub held: [ItemStack; HAND_SLOTS],
}

impl Equipment {
    /// Fill armor slots from `items`, padding with empty stacks and dropping
    /// anything past the last slot.
    pub fn set_armor(&mut self, items: impl IntoIterator<Item = ItemStack>) {
        fill_slots(&mut self.armor, items);
    }

    pub fn set_held(&mut self, items: impl IntoIterator<Item = ItemStack>) {
        fill_slots(&mut self.held, items);
    }
}

fn fill_slots(slots: &mut [ItemStack], items: impl IntoIterator<Item = ItemStack>) {
    let mut items = items.into_iter();
    for slot in slots.iter_mut() {
        *slot = items.next().unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_padded_and_truncated() {
        let mut eq = Equipment::default();
        eq.set_held(vec![
            ItemStack::new("boatism:propeller", 1),
            ItemStack::new("boatism:fuel_can", 2),
            ItemStack::new("minecraft:stick", 3),
        ]);
        assert_eq!(eq.held[1].id, "boatism:fuel_can");

        eq.set_armor(vec![ItemStack::new("boatism:hull_plate", 1)]);
        assert!(!eq.armor[0].is_empty());
        assert!(eq.armor[1..].iter().all(ItemStack::is_empty));
    }
}
