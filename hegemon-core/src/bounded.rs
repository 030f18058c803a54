use crate::defines;
use crate::fixed::Fixed;
use serde::{Deserialize, Serialize};

/// A value clamped to a Fixed-point range.
/// Used for morale (0.3 to 1.2); the bounds travel with the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundedFixed {
    value: Fixed,
    min: Fixed,
    max: Fixed,
}

impl BoundedFixed {
    pub const fn new(value: Fixed, min: Fixed, max: Fixed) -> Self {
        let value = if value.raw() < min.raw() {
            min
        } else if value.raw() > max.raw() {
            max
        } else {
            value
        };
        Self { value, min, max }
    }

    pub fn get(&self) -> Fixed {
        self.value
    }

    pub fn min(&self) -> Fixed {
        self.min
    }

    pub fn max(&self) -> Fixed {
        self.max
    }

    pub fn set(&mut self, value: Fixed) {
        self.value = value.max(self.min).min(self.max);
    }

    /// Raise by `delta`, capped at the upper bound.
    pub fn raise(&mut self, delta: Fixed) {
        self.value = (self.value + delta).min(self.max);
    }

    /// Lower by `delta`, but never below `floor`.
    ///
    /// The floor wins over the subtraction: a value already below `floor`
    /// is lifted up to it. Battle morale penalties rely on exactly this
    /// (a light-loss penalty cannot leave morale under 0.5).
    pub fn lower_to(&mut self, delta: Fixed, floor: Fixed) {
        self.value = (self.value - delta).max(floor).min(self.max);
    }
}

/// Morale multiplier on troop effectiveness: starts at 1.0, bounded [0.3, 1.2].
pub const fn new_morale() -> BoundedFixed {
    BoundedFixed::new(
        Fixed::ONE,
        defines::combat::MORALE_MIN,
        defines::combat::MORALE_MAX,
    )
}
