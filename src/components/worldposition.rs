//! World-space position and axis-aligned search volumes.
//!
//! [`WorldPosition`] is the pivot of every simulated entity (engines, boats,
//! players, dropped items). [`SearchBox`] is the volume used by the entity
//! lookups in [`crate::systems::lookup`].

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPosition {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Position offset by the given deltas.
    pub fn offset(&self, dx: f32, dy: f32, dz: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// Axis-aligned box used to search for nearby entities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchBox {
    pub min: WorldPosition,
    pub max: WorldPosition,
}

impl SearchBox {
    /// Box reaching `half_extent` blocks from `center` along every axis.
    pub fn around(center: WorldPosition, half_extent: f32) -> Self {
        let h = half_extent.abs();
        Self {
            min: center.offset(-h, -h, -h),
            max: center.offset(h, h, h),
        }
    }

    /// Box of total edge length `size` centered on `center`.
    pub fn of_size(center: WorldPosition, size: f32) -> Self {
        Self::around(center, size / 2.0)
    }

    pub fn contains(&self, pos: &WorldPosition) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn around_includes_edges() {
        let b = SearchBox::around(WorldPosition::new(0.0, 64.0, 0.0), 5.0);
        assert!(b.contains(&WorldPosition::new(5.0, 69.0, -5.0)));
        assert!(!b.contains(&WorldPosition::new(5.1, 64.0, 0.0)));
    }

    #[test]
    fn of_size_uses_half_extent() {
        let b = SearchBox::of_size(WorldPosition::default(), 10.0);
        assert!(b.contains(&WorldPosition::new(4.9, 0.0, 0.0)));
        assert!(!b.contains(&WorldPosition::new(0.0, -5.5, 0.0)));
    }
}
