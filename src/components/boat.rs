//! Towed vehicles an engine can be hooked onto.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoatKind {
    Boat,
    ChestBoat,
}

/// A boat. `yaw` is the heading in degrees; 0 faces +Z.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Boat {
    pub kind: BoatKind,
    pub yaw: f32,
}

impl Boat {
    pub fn new(kind: BoatKind) -> Self {
        Self { kind, yaw: 0.0 }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    /// Horizontal offset of a point `distance` blocks behind the boat's pivot.
    pub fn stern_offset(&self, distance: f32) -> (f32, f32) {
        let rad = self.yaw.to_radians();
        (rad.sin() * distance, -rad.cos() * distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stern_is_behind_heading() {
        let (dx, dz) = Boat::new(BoatKind::Boat).stern_offset(2.0);
        assert!(dx.abs() < 1e-6);
        assert!((dz + 2.0).abs() < 1e-6);

        let (dx, dz) = Boat::new(BoatKind::Boat).with_yaw(90.0).stern_offset(2.0);
        assert!((dx - 2.0).abs() < 1e-5);
        assert!(dz.abs() < 1e-5);
    }
}
