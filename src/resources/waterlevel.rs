use bevy_ecs::prelude::Resource;

use crate::components::worldposition::WorldPosition;

/// Height of the water surface engines float on.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct WaterLevel {
    pub surface_y: f32,
}

impl WaterLevel {
    pub fn new(surface_y: f32) -> Self {
        Self { surface_y }
    }

    pub fn is_submerged(&self, pos: &WorldPosition) -> bool {
        pos.y < self.surface_y
    }
}
