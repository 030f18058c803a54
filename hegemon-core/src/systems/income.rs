use crate::defines::economy as defines;
use crate::state::{Tag, WorldState};
use std::collections::HashMap;
use tracing::instrument;

/// Accrues treasury income from owned provinces.
///
/// Runs after movement, combat and conquest: a province taken earlier this
/// tick already pays its new owner this tick.
#[instrument(skip_all, name = "income")]
pub fn run_income_tick(state: &mut WorldState) {
    // Aggregate per nation, then apply.
    let mut deltas: HashMap<Tag, i64> = HashMap::new();
    for province in state.provinces.values() {
        if let Some(owner) = &province.owner {
            *deltas.entry(owner.clone()).or_insert(0) += defines::INCOME_PER_PROVINCE;
        }
    }

    for (tag, delta) in deltas {
        if let Some(nation) = state.nations.get_mut(&tag) {
            nation.treasury += delta;
            log::trace!("{} collects {} (treasury {})", tag, delta, nation.treasury);
        }
    }
}
