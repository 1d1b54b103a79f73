//! Fuel tank of a boat engine.
//!
//! [`FuelStore`] is plain value state owned by
//! [`BoatEngine`](crate::components::boatengine::BoatEngine). The level is
//! always kept inside `0.0..=max_fuel`; refills report the overflow instead of
//! failing and consumption reports how much was actually taken.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelStore {
    fuel: f32,
    max_fuel: f32,
}

impl FuelStore {
    /// Empty tank holding at most `max_fuel`.
    pub fn new(max_fuel: f32) -> Self {
        Self {
            fuel: 0.0,
            max_fuel: non_negative(max_fuel),
        }
    }

    /// Same tank with its level set (clamped) to `fuel`.
    pub fn with_fuel(mut self, fuel: f32) -> Self {
        self.set(fuel);
        self
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    pub fn max_fuel(&self) -> f32 {
        self.max_fuel
    }

    pub fn is_empty(&self) -> bool {
        self.fuel <= 0.0
    }

    /// Overwrite the level, clamped to the tank bounds.
    pub fn set(&mut self, fuel: f32) {
        self.fuel = non_negative(fuel).min(self.max_fuel);
    }

    /// Add `amount` and return the part that did not fit.
    pub fn fill_up(&mut self, amount: f32) -> f32 {
        let total = self.fuel + non_negative(amount);
        if total > self.max_fuel {
            self.fuel = self.max_fuel;
            total - self.max_fuel
        } else {
            self.fuel = total;
            0.0
        }
    }

    /// Take up to `amount` out of the tank and return what was taken.
    pub fn consume(&mut self, amount: f32) -> f32 {
        let consumed = non_negative(amount).min(self.fuel);
        self.fuel -= consumed;
        if self.fuel < 0.0 {
            self.fuel = 0.0;
        }
        consumed
    }
}

// NaN and negative amounts count as nothing
fn non_negative(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_up_reports_overflow() {
        let mut tank = FuelStore::new(20.0);
        assert_eq!(tank.fill_up(10.0), 0.0);
        assert_eq!(tank.fuel(), 10.0);
        assert_eq!(tank.fill_up(15.0), 5.0);
        assert_eq!(tank.fuel(), 20.0);
    }

    #[test]
    fn fill_up_conserves_fuel() {
        for start in [0.0_f32, 3.5, 12.0, 20.0] {
            for amount in [0.0_f32, 1.0, 8.5, 40.0] {
                let mut tank = FuelStore::new(20.0).with_fuel(start);
                let leftover = tank.fill_up(amount);
                assert!(tank.fuel() <= tank.max_fuel());
                assert!(leftover >= 0.0);
                assert!((tank.fuel() + leftover - (start + amount)).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn consume_never_goes_negative() {
        let mut tank = FuelStore::new(20.0).with_fuel(4.0);
        assert_eq!(tank.consume(1.5), 1.5);
        assert_eq!(tank.consume(10.0), 2.5);
        assert_eq!(tank.fuel(), 0.0);
        assert!(tank.is_empty());
        assert_eq!(tank.consume(1.0), 0.0);
    }

    #[test]
    fn garbage_amounts_are_ignored() {
        let mut tank = FuelStore::new(20.0).with_fuel(5.0);
        assert_eq!(tank.fill_up(-3.0), 0.0);
        assert_eq!(tank.fill_up(f32::NAN), 0.0);
        assert_eq!(tank.consume(-2.0), 0.0);
        assert_eq!(tank.fuel(), 5.0);
    }

    #[test]
    fn set_clamps_to_bounds() {
        let mut tank = FuelStore::new(20.0);
        tank.set(50.0);
        assert_eq!(tank.fuel(), 20.0);
        tank.set(-1.0);
        assert_eq!(tank.fuel(), 0.0);
    }
}
