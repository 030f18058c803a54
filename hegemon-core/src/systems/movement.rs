use crate::state::{Activity, ArmyId, ProvinceId, WorldState};
use rayon::prelude::*;
use tracing::instrument;

/// Result of advancing a single army's transit
struct MovementResult {
    army_id: ArmyId,
    destination: ProvinceId,
    ticks_remaining: u32,
    arrived: bool,
}

/// Advance one army's countdown (pure function, no mutation)
fn process_army_movement(
    army_id: ArmyId,
    destination: ProvinceId,
    ticks_remaining: u32,
) -> MovementResult {
    let remaining = ticks_remaining.saturating_sub(1);
    MovementResult {
        army_id,
        destination,
        ticks_remaining: remaining,
        arrived: remaining == 0,
    }
}

/// Runs the movement countdown for all armies in transit.
///
/// Arrivals relocate and go idle before combat reads locations, so within a
/// tick movement strictly precedes battle resolution.
#[instrument(skip_all, name = "movement")]
pub fn run_movement_tick(state: &mut WorldState) {
    // PHASE 1: Extract in-transit armies
    let inputs: Vec<_> = state
        .armies
        .iter()
        .filter_map(|(&army_id, army)| match army.activity {
            Activity::Moving {
                destination,
                ticks_remaining,
            } => Some((army_id, destination, ticks_remaining)),
            _ => None,
        })
        .collect();

    if inputs.is_empty() {
        return;
    }

    // PHASE 2: Count down in parallel (each army is independent)
    let results: Vec<MovementResult> = {
        let _span = tracing::info_span!("armies_parallel", count = inputs.len()).entered();
        inputs
            .into_par_iter()
            .map(|(id, dest, ticks)| process_army_movement(id, dest, ticks))
            .collect()
    };

    // PHASE 3: Apply relocations and updated countdowns
    for result in results {
        if let Some(army) = state.armies.get_mut(&result.army_id) {
            if result.arrived {
                log::trace!(
                    "army {} arrived at province {} from {}",
                    result.army_id,
                    result.destination,
                    army.location
                );
                army.location = result.destination;
                army.activity = Activity::Idle;
            } else {
                army.activity = Activity::Moving {
                    destination: result.destination,
                    ticks_remaining: result.ticks_remaining,
                };
            }
        }
    }
}
