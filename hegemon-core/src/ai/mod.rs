//! AI decision-making subsystem.
//!
//! Each non-human nation is driven by a [`Commander`]: given a read-only
//! view of the world it returns [`Command`]s, which the engine pushes
//! through the same validation as player input. A commander that wants
//! something illegal simply has its order rejected.
//!
//! # Determinism
//!
//! Commanders must be deterministic given the same RNG seed. The built-in
//! [`GreedyCommander`] holds a `StdRng` seeded at construction; two runs
//! with the same seed and the same player inputs replay identically.

pub mod greedy;

pub use greedy::GreedyCommander;

use crate::defines::ai as defines;
use crate::input::Command;
use crate::state::WorldState;
use crate::step::execute_command;
use tracing::instrument;

/// Decision-making seam for nation AI.
pub trait Commander: Send {
    fn name(&self) -> &'static str;

    /// Choose commands for one nation this decision tick. May return an
    /// empty list to pass.
    fn plan(&mut self, state: &WorldState, nation: &str) -> Vec<Command>;
}

/// Runs AI decisions for every non-human nation.
///
/// Only fires on ticks divisible by the decision cadence. Nations are
/// processed in sorted-tag order; each nation's orders are applied before
/// the next nation plans, exactly as a sequential pass over the world.
#[instrument(skip_all, name = "ai")]
pub fn run_ai_tick(state: &mut WorldState, commander: &mut dyn Commander) {
    if state.tick % defines::DECISION_CADENCE != 0 {
        return;
    }

    for tag in state.sorted_tags() {
        if state.nations[&tag].is_human {
            continue;
        }

        let commands = commander.plan(state, &tag);
        for cmd in &commands {
            if let Err(e) = execute_command(state, &tag, cmd) {
                log::debug!("{} order from {} rejected: {}", commander.name(), tag, e);
            }
        }
    }
}
