use crate::defines::conquest as defines;
use crate::state::{Activity, WorldState};
use tracing::instrument;

/// Runs occupation tracking for every province independently.
///
/// Conquest is the slow path to territory: a lone army sitting on a foreign
/// province accrues progress each tick and flips it on reaching the
/// threshold. Any contention or friendliness discards accrued progress;
/// cross-nation contact never reaches here because combat already resolved
/// it earlier in the same tick.
#[instrument(skip_all, name = "conquest")]
pub fn run_conquest_tick(state: &mut WorldState) {
    for province_id in state.sorted_province_ids() {
        let present = state.present_armies(province_id);

        match present.as_slice() {
            [] => {}

            [lone] => {
                let army_id = *lone;
                let owner_matches = {
                    let army = &state.armies[&army_id];
                    state.provinces[&province_id].owner.as_deref() == Some(army.owner.as_str())
                };

                if owner_matches {
                    // Standing on home ground: nothing to conquer.
                    reset_progress(state, army_id);
                } else {
                    let progress = match state.armies[&army_id].activity {
                        Activity::Occupying { progress } => progress,
                        _ => 0,
                    } + 1;

                    if progress >= defines::OCCUPATION_TICKS {
                        let occupier = state.armies[&army_id].owner.clone();
                        if let Some(p) = state.provinces.get_mut(&province_id) {
                            log::debug!(
                                "province {} occupied by {} (was {:?})",
                                province_id,
                                occupier,
                                p.owner
                            );
                            p.owner = Some(occupier);
                        }
                        reset_progress(state, army_id);
                    } else if let Some(army) = state.armies.get_mut(&army_id) {
                        army.activity = Activity::Occupying { progress };
                    }
                }
            }

            // Several armies sharing the province (same nation by now), and
            // a crowd cannot occupy.
            crowd => {
                for &army_id in crowd {
                    reset_progress(state, army_id);
                }
            }
        }
    }
}

fn reset_progress(state: &mut WorldState, army_id: crate::state::ArmyId) {
    if let Some(army) = state.armies.get_mut(&army_id) {
        if matches!(army.activity, Activity::Occupying { .. }) {
            army.activity = Activity::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::WorldStateBuilder;

    fn lone_invader() -> WorldState {
        WorldStateBuilder::new()
            .with_nation("RED", false)
            .with_nation("BLU", false)
            .with_grid(3, 1)
            .with_owner(0, "BLU")
            .with_army(1, "RED", 0, 1000)
            .build()
    }

    #[test]
    fn test_occupation_flips_on_second_tick() {
        let mut state = lone_invader();

        run_conquest_tick(&mut state);
        assert_eq!(state.provinces[&0].owner.as_deref(), Some("BLU"));
        assert_eq!(state.armies[&1].activity, Activity::Occupying { progress: 1 });

        run_conquest_tick(&mut state);
        assert_eq!(state.provinces[&0].owner.as_deref(), Some("RED"));
        assert_eq!(state.armies[&1].activity, Activity::Idle);
    }

    #[test]
    fn test_unowned_province_is_conquered_too() {
        let mut state = WorldStateBuilder::new()
            .with_nation("RED", false)
            .with_grid(3, 1)
            .with_army(1, "RED", 0, 1000)
            .build();

        run_conquest_tick(&mut state);
        run_conquest_tick(&mut state);

        assert_eq!(state.provinces[&0].owner.as_deref(), Some("RED"));
    }

    #[test]
    fn test_friendly_ground_resets_progress() {
        let mut state = lone_invader();

        run_conquest_tick(&mut state);
        assert_eq!(state.armies[&1].activity, Activity::Occupying { progress: 1 });

        // The province flips to RED by other means (battle elsewhere on it).
        state.provinces.get_mut(&0).unwrap().owner = Some("RED".into());

        run_conquest_tick(&mut state);
        assert_eq!(state.armies[&1].activity, Activity::Idle);

        // Back under BLU, the count starts over from scratch.
        state.provinces.get_mut(&0).unwrap().owner = Some("BLU".into());
        run_conquest_tick(&mut state);
        assert_eq!(state.armies[&1].activity, Activity::Occupying { progress: 1 });
    }

    #[test]
    fn test_company_resets_everyones_progress() {
        let mut state = lone_invader();
        run_conquest_tick(&mut state);

        // A second RED army arrives on the same province.
        let mut state = {
            let mut s = state.clone();
            s.spawn_army("RED", 0, 1000);
            s
        };

        run_conquest_tick(&mut state);
        for army in state.armies.values() {
            assert_eq!(army.activity, Activity::Idle);
        }

        // Even after the crowd disperses, progress restarts at 1.
        let second_id = state
            .sorted_army_ids()
            .into_iter()
            .find(|id| *id != 1)
            .unwrap();
        state.armies.remove(&second_id);
        run_conquest_tick(&mut state);
        assert_eq!(state.armies[&1].activity, Activity::Occupying { progress: 1 });
        assert_eq!(state.provinces[&0].owner.as_deref(), Some("BLU"));
    }

    #[test]
    fn test_armies_in_transit_do_not_occupy() {
        let mut state = lone_invader();
        state.armies.get_mut(&1).unwrap().activity = Activity::Moving {
            destination: 1,
            ticks_remaining: 2,
        };

        run_conquest_tick(&mut state);

        assert!(state.armies[&1].activity.is_moving());
        assert_eq!(state.provinces[&0].owner.as_deref(), Some("BLU"));
    }

    #[test]
    fn test_empty_province_is_untouched() {
        let mut state = WorldStateBuilder::new()
            .with_nation("RED", false)
            .with_grid(3, 1)
            .with_owner(2, "RED")
            .build();
        let before = state.checksum();

        run_conquest_tick(&mut state);

        assert_eq!(state.checksum(), before);
    }
}
