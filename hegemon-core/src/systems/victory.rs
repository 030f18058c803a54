use crate::state::WorldState;
use tracing::instrument;

/// Checks for supermajority territorial control, last in the pipeline.
///
/// Setting the game-over flag also forces the pause flag, so every later
/// `step_world` call is a no-op until an external reset.
#[instrument(skip_all, name = "victory")]
pub fn run_victory_tick(state: &mut WorldState) {
    let threshold = state.victory_threshold();
    let counts = state.owned_province_counts();

    for tag in state.sorted_tags() {
        let held = counts.get(&tag).copied().unwrap_or(0);
        if held >= threshold {
            log::info!(
                "{} controls {}/{} provinces and wins on tick {}",
                tag,
                held,
                state.provinces.len(),
                state.tick
            );
            state.winner = Some(tag);
            state.game_over = true;
            state.paused = true;
            break;
        }
    }
}
