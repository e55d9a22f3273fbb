//! The astronaut's oxygen supply.

use crate::constants::OXYGEN_MAX;

/// Oxygen level, always within `[0, OXYGEN_MAX]`.
///
/// Zero is terminal: once [`Oxygen::drain`] reports depletion, refills are
/// ignored until the session is rebuilt with [`Oxygen::full`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oxygen(f32);

impl Default for Oxygen {
    fn default() -> Self {
        Self::full()
    }
}

impl Oxygen {
    /// A full tank.
    #[inline]
    pub fn full() -> Self {
        Self(OXYGEN_MAX)
    }

    /// Current level.
    #[inline]
    pub fn level(self) -> f32 {
        self.0
    }

    /// Level as a fraction of a full tank, for bar widths.
    #[inline]
    pub fn fraction(self) -> f32 {
        self.0 / OXYGEN_MAX
    }

    /// Level rounded to a whole percentage for display.
    #[inline]
    pub fn percent(self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }

    #[inline]
    pub fn is_depleted(self) -> bool {
        self.0 <= 0.0
    }

    /// At or below `threshold` the HUD warns.
    #[inline]
    pub fn is_low(self, threshold: f32) -> bool {
        self.0 <= threshold
    }

    /// Remove `amount`, flooring at zero.  Returns `true` when this drain
    /// emptied the tank.
    pub fn drain(&mut self, amount: f32) -> bool {
        if self.is_depleted() {
            return false;
        }
        self.0 = (self.0 - amount).max(0.0);
        self.is_depleted()
    }

    /// Add `amount`, capped at a full tank.  No effect once depleted.
    pub fn refill(&mut self, amount: f32) {
        if self.is_depleted() {
            return;
        }
        self.0 = (self.0 + amount).min(OXYGEN_MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refill_is_capped_at_full() {
        let mut o2 = Oxygen::full();
        o2.drain(2.0);
        o2.refill(5.0);
        assert_eq!(o2.level(), OXYGEN_MAX);
    }

    #[test]
    fn drain_floors_at_zero_and_reports_once() {
        let mut o2 = Oxygen::full();
        o2.drain(99.0);
        assert!(o2.drain(5.0), "draining past zero must report depletion");
        assert_eq!(o2.level(), 0.0);
        assert!(!o2.drain(5.0), "already empty: no second depletion");
    }

    #[test]
    fn depleted_tank_ignores_refills() {
        let mut o2 = Oxygen::full();
        o2.drain(OXYGEN_MAX);
        o2.refill(5.0);
        assert!(o2.is_depleted());
    }

    #[test]
    fn half_steps_reach_zero_exactly() {
        let mut o2 = Oxygen::full();
        let mut drains = 0;
        while !o2.drain(0.5) {
            drains += 1;
        }
        assert_eq!(drains + 1, 200);
        assert_eq!(o2.level(), 0.0);
    }

    #[test]
    fn low_threshold_is_inclusive() {
        let mut o2 = Oxygen::full();
        o2.drain(70.0);
        assert!(o2.is_low(30.0));
        assert_eq!(o2.percent(), 30);
    }
}
