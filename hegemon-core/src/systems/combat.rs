use crate::defines::combat as defines;
use crate::fixed::Fixed;
use crate::state::{ArmyId, ProvinceId, Tag, WorldState};
use rustc_hash::FxHashMap;
use tracing::instrument;

/// One nation's side of a battle, in the order sides were encountered.
struct Side {
    nation: Tag,
    armies: Vec<ArmyId>,
    effective: Fixed,
    men: i64,
}

/// Runs battle resolution for every province hosting more than one nation.
///
/// Armies are grouped by current location: in-transit armies still stand
/// at their origin and fight there. Grouping walks armies in ascending id
/// order, so side order (and therefore the tie-break) is stable.
#[instrument(skip_all, name = "combat")]
pub fn run_combat_tick(state: &mut WorldState) {
    let mut by_location: FxHashMap<ProvinceId, Vec<ArmyId>> = FxHashMap::default();
    for id in state.sorted_army_ids() {
        by_location.entry(state.armies[&id].location).or_default().push(id);
    }

    let mut contested: Vec<ProvinceId> = by_location
        .iter()
        .filter(|(_, ids)| {
            ids.iter()
                .any(|id| state.armies[id].owner != state.armies[&ids[0]].owner)
        })
        .map(|(&pid, _)| pid)
        .collect();
    contested.sort_unstable();

    for province in contested {
        resolve_battle(state, province, &by_location[&province]);
    }
}

/// Resolve one multi-nation battle to a winner, casualties, and ownership.
fn resolve_battle(state: &mut WorldState, province: ProvinceId, army_ids: &[ArmyId]) {
    let sides = collect_sides(state, army_ids);
    debug_assert!(sides.len() >= 2);

    // The strongest effective strength wins; on an exact tie the side
    // encountered first in grouping order keeps the win. Known quirk of
    // the resolution order, kept deliberately.
    let mut winner_idx = 0;
    for (i, side) in sides.iter().enumerate() {
        if side.effective > sides[winner_idx].effective {
            winner_idx = i;
        }
    }

    let winner_effective = sides[winner_idx].effective;
    let mut losing_effective = Fixed::ZERO;
    let mut men_destroyed = 0i64;
    for (i, side) in sides.iter().enumerate() {
        if i == winner_idx {
            continue;
        }
        losing_effective += side.effective;
        men_destroyed += side.men;
        for id in &side.armies {
            state.armies.remove(id);
        }
    }

    // Winner casualties scale with how close the fight was, capped at half.
    let casualty_rate = if winner_effective > Fixed::ZERO {
        losing_effective
            .div(winner_effective)
            .mul(defines::CASUALTY_FACTOR)
            .min(defines::MAX_CASUALTY_RATE)
    } else {
        Fixed::ZERO
    };

    let survival = Fixed::ONE - casualty_rate;
    for id in &sides[winner_idx].armies {
        if let Some(army) = state.armies.get_mut(id) {
            army.strength = Fixed::from_int(army.strength)
                .mul(survival)
                .to_int()
                .max(defines::MIN_SURVIVORS);

            if casualty_rate > defines::HEAVY_LOSS_RATE {
                army.morale
                    .lower_to(defines::HEAVY_MORALE_PENALTY, defines::HEAVY_MORALE_FLOOR);
            } else if casualty_rate > defines::LIGHT_LOSS_RATE {
                army.morale
                    .lower_to(defines::LIGHT_MORALE_PENALTY, defines::LIGHT_MORALE_FLOOR);
            } else {
                army.morale.raise(defines::MORALE_REWARD);
            }
        }
    }

    // The battlefield falls to the winner regardless of who held it before.
    let winner = sides[winner_idx].nation.clone();
    if let Some(p) = state.provinces.get_mut(&province) {
        p.owner = Some(winner.clone());
    }

    log::debug!(
        "battle at province {}: {} wins (effective {}), {} men destroyed, casualty rate {}",
        province,
        winner,
        winner_effective,
        men_destroyed,
        casualty_rate
    );
}

/// Group a province's armies into per-nation sides, preserving the order
/// nations were first encountered.
fn collect_sides(state: &WorldState, army_ids: &[ArmyId]) -> Vec<Side> {
    let mut sides: Vec<Side> = Vec::new();
    for &id in army_ids {
        let army = &state.armies[&id];
        match sides.iter_mut().find(|s| s.nation == army.owner) {
            Some(side) => {
                side.armies.push(id);
                side.effective += army.effective_strength();
                side.men += army.strength;
            }
            None => sides.push(Side {
                nation: army.owner.clone(),
                armies: vec![id],
                effective: army.effective_strength(),
                men: army.strength,
            }),
        }
    }
    sides
}
