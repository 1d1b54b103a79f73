//! Overheat accumulation for a boat engine.
//!
//! Heat builds up one step per tick while the engine runs above water and
//! bleeds off while it is stopped or submerged. The value is clamped to
//! `0..=max_overheat`; reaching the maximum forces the engine to stop.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermalModel {
    overheat: i32,
    max_overheat: i32,
    heat_step: i32,
    cool_step: i32,
}

impl ThermalModel {
    pub fn new(max_overheat: i32, heat_step: i32, cool_step: i32) -> Self {
        Self {
            overheat: 0,
            max_overheat: max_overheat.max(1),
            heat_step: heat_step.max(0),
            cool_step: cool_step.max(0),
        }
    }

    pub fn overheat(&self) -> i32 {
        self.overheat
    }

    pub fn max_overheat(&self) -> i32 {
        self.max_overheat
    }

    /// Overwrite the accumulated heat, clamped to bounds.
    pub fn set(&mut self, overheat: i32) {
        self.overheat = overheat.clamp(0, self.max_overheat);
    }

    pub fn is_overheated(&self) -> bool {
        self.overheat >= self.max_overheat
    }

    /// Heat as a fraction of the maximum, in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        self.overheat as f32 / self.max_overheat as f32
    }

    /// Advance one tick.
    pub fn tick(&mut self, running: bool, submerged: bool) {
        if running && !submerged {
            self.set(self.overheat.saturating_add(self.heat_step));
        } else {
            self.set(self.overheat.saturating_sub(self.cool_step));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heats_while_running_up_to_max() {
        let mut t = ThermalModel::new(3, 2, 1);
        t.tick(true, false);
        assert_eq!(t.overheat(), 2);
        assert!(!t.is_overheated());
        t.tick(true, false);
        assert_eq!(t.overheat(), 3);
        assert!(t.is_overheated());
        t.tick(true, false);
        assert_eq!(t.overheat(), 3);
    }

    #[test]
    fn cools_when_stopped_or_submerged() {
        let mut t = ThermalModel::new(10, 1, 2);
        t.set(5);
        t.tick(true, true);
        assert_eq!(t.overheat(), 3);
        t.tick(false, false);
        assert_eq!(t.overheat(), 1);
        t.tick(false, false);
        assert_eq!(t.overheat(), 0);
    }

    #[test]
    fn set_clamps() {
        let mut t = ThermalModel::new(10, 1, 1);
        t.set(99);
        assert_eq!(t.overheat(), 10);
        t.set(-4);
        assert_eq!(t.overheat(), 0);
        assert_eq!(t.fraction(), 0.0);
    }
}
