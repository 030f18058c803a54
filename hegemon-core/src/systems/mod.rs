//! Per-tick resolution systems, invoked in fixed pipeline order.

pub mod combat;
pub mod conquest;
pub mod income;
pub mod movement;
pub mod victory;

pub use combat::run_combat_tick;
pub use conquest::run_conquest_tick;
pub use income::run_income_tick;
pub use movement::run_movement_tick;
pub use victory::run_victory_tick;
