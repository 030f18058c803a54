//! Game mechanic constants (defines).
//!
//! Every tuning value the simulation depends on lives here, grouped by the
//! system that consumes it. Fixed-point constants are written as raw scaled
//! values (scale 10000).

use crate::fixed::Fixed;

/// Economy constants
pub mod economy {
    /// Treasury income per owned province per tick
    pub const INCOME_PER_PROVINCE: i64 = 2;

    /// Cost of raising a new army
    pub const RECRUIT_COST: i64 = 50;

    /// Men in a freshly raised army
    pub const RECRUIT_SIZE: i64 = 1000;
}

/// Combat constants
pub mod combat {
    use super::Fixed;

    /// Winner casualty scaling: rate = loser strength / winner strength × 0.3
    pub const CASUALTY_FACTOR: Fixed = Fixed::from_raw(3000);

    /// Winner casualties never exceed half the army
    pub const MAX_CASUALTY_RATE: Fixed = Fixed::from_raw(5000);

    /// No army is ever ground below this many men by battle
    pub const MIN_SURVIVORS: i64 = 100;

    /// Casualty rate above which a victory still breaks morale (0.3)
    pub const HEAVY_LOSS_RATE: Fixed = Fixed::from_raw(3000);

    /// Casualty rate above which a victory dents morale (0.1)
    pub const LIGHT_LOSS_RATE: Fixed = Fixed::from_raw(1000);

    /// Morale lost after a heavy-loss victory, floored at 0.3
    pub const HEAVY_MORALE_PENALTY: Fixed = Fixed::from_raw(3000);
    pub const HEAVY_MORALE_FLOOR: Fixed = Fixed::from_raw(3000);

    /// Morale lost after a moderate-loss victory, floored at 0.5
    pub const LIGHT_MORALE_PENALTY: Fixed = Fixed::from_raw(1000);
    pub const LIGHT_MORALE_FLOOR: Fixed = Fixed::from_raw(5000);

    /// Morale gained after a clean victory
    pub const MORALE_REWARD: Fixed = Fixed::from_raw(1000);

    /// Morale bounds (0.3 to 1.2)
    pub const MORALE_MIN: Fixed = Fixed::from_raw(3000);
    pub const MORALE_MAX: Fixed = Fixed::from_raw(12000);
}

/// Movement constants
pub mod movement {
    /// Ticks an army spends in transit between adjacent provinces
    pub const TRANSIT_TICKS: u32 = 3;
}

/// Conquest constants
pub mod conquest {
    /// Consecutive unopposed ticks required to flip a province
    pub const OCCUPATION_TICKS: u8 = 2;
}

/// AI decision constants
pub mod ai {
    use super::Fixed;

    /// The AI only acts on ticks divisible by this cadence
    pub const DECISION_CADENCE: u64 = 2;

    /// Chance per decision tick that a nation raises a new army
    pub const RECRUIT_CHANCE: f64 = 0.1;

    /// A move order is only issued when the best target scores above this
    pub const TARGET_SCORE_THRESHOLD: i32 = 5;

    /// Target owned by somebody (worth taking from them)
    pub const CLAIMED_BONUS: i32 = 15;

    /// Target owned by nobody (free land)
    pub const NEUTRAL_BONUS: i32 = 10;

    /// Target has no defenders at all
    pub const UNDEFENDED_BONUS: i32 = 20;

    /// Attacker clearly outmatches the defenders (> 1.2×)
    pub const SUPERIOR_BONUS: i32 = 10;

    /// Attacker merely edges out the defenders
    pub const EDGE_BONUS: i32 = 5;

    /// Attacker is the weaker side
    pub const OUTMATCHED_PENALTY: i32 = -10;

    /// Strength ratio that counts as clear superiority
    pub const SUPERIORITY_RATIO: Fixed = Fixed::from_raw(12000);

    /// Per-capital pull: max(0, CAPITAL_PULL − Manhattan distance)
    pub const CAPITAL_PULL: i32 = 10;
}

/// Victory constants
pub mod victory {
    /// Provinces required to win: ceil(3n/4) of the total.
    ///
    /// 20 provinces → 15, 49 provinces → 37.
    pub const fn supermajority(total: usize) -> usize {
        (3 * total + 3) / 4
    }
}
