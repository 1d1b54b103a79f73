//! The acting player in an interaction.

use bevy_ecs::prelude::Component;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Player {
    /// Sneak-using the coupling tool toggles the lock instead of hooking.
    pub sneaking: bool,
}
