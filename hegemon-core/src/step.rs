use crate::ai::{run_ai_tick, Commander};
use crate::defines;
use crate::input::{Command, PlayerInputs};
use crate::state::{Activity, ArmyId, ProvinceId, Tag, WorldState};
use crate::systems::{
    run_combat_tick, run_conquest_tick, run_income_tick, run_movement_tick, run_victory_tick,
};
use thiserror::Error;

/// Why a command was rejected. Rejection is the only failure the core
/// reports: the command is dropped, state is untouched, the tick goes on.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ActionError {
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: i64, available: i64 },
    #[error("province {0} does not exist")]
    UnknownProvince(ProvinceId),
    #[error("army {0} does not exist")]
    UnknownArmy(ArmyId),
    #[error("province {to} is not adjacent to {from}")]
    NotAdjacent { from: ProvinceId, to: ProvinceId },
    #[error("province {0} is not owned by {1}")]
    NotOwned(ProvinceId, Tag),
    #[error("no armies of {1} free to move at province {0}")]
    NoIdleArmies(ProvinceId, Tag),
    #[error("army {0} is not commanded by {1}")]
    NotArmyOwner(ArmyId, Tag),
    #[error("army {0} is already in transit")]
    ArmyInTransit(ArmyId),
}

/// Advance the world by one tick.
///
/// The pipeline runs in fixed order (movement, combat, conquest, income,
/// AI, victory) and each stage sees the fully-resolved output of the
/// stages before it. A paused or finished game returns an unchanged clone:
/// the tick is a complete no-op.
pub fn step_world(
    state: &WorldState,
    inputs: &[PlayerInputs],
    commander: &mut dyn Commander,
) -> WorldState {
    if state.paused || state.game_over {
        return state.clone();
    }

    let mut next = state.clone();
    next.tick = state.tick + 1;

    for player_input in inputs {
        for cmd in &player_input.commands {
            if let Err(e) = execute_command(&mut next, &player_input.nation, cmd) {
                log::warn!("rejected command from {}: {}", player_input.nation, e);
            }
        }
    }

    run_movement_tick(&mut next);
    run_combat_tick(&mut next);
    run_conquest_tick(&mut next);
    run_income_tick(&mut next);
    run_ai_tick(&mut next, commander);
    run_victory_tick(&mut next);

    next
}

/// Validate and apply a single command. Total over all inputs: every
/// invalid request maps to an [`ActionError`] and leaves state unchanged.
pub fn execute_command(
    state: &mut WorldState,
    nation: &str,
    cmd: &Command,
) -> Result<(), ActionError> {
    match cmd {
        Command::MoveAll { from, to } => {
            let origin = state
                .provinces
                .get(from)
                .ok_or(ActionError::UnknownProvince(*from))?;
            if !origin.neighbors.contains(to) {
                return Err(ActionError::NotAdjacent {
                    from: *from,
                    to: *to,
                });
            }

            let movers: Vec<ArmyId> = state
                .sorted_army_ids()
                .into_iter()
                .filter(|id| {
                    let a = &state.armies[id];
                    a.owner == nation && a.location == *from && !a.activity.is_moving()
                })
                .collect();
            if movers.is_empty() {
                return Err(ActionError::NoIdleArmies(*from, nation.to_string()));
            }

            for id in movers {
                if let Some(army) = state.armies.get_mut(&id) {
                    army.activity = Activity::Moving {
                        destination: *to,
                        ticks_remaining: defines::movement::TRANSIT_TICKS,
                    };
                    log::debug!("{} army {} marching {} -> {}", nation, id, from, to);
                }
            }
            Ok(())
        }

        Command::MoveArmy { army, destination } => {
            let location = {
                let a = state
                    .armies
                    .get(army)
                    .ok_or(ActionError::UnknownArmy(*army))?;
                if a.owner != nation {
                    return Err(ActionError::NotArmyOwner(*army, nation.to_string()));
                }
                if a.activity.is_moving() {
                    return Err(ActionError::ArmyInTransit(*army));
                }
                a.location
            };
            if !state.are_adjacent(location, *destination) {
                return Err(ActionError::NotAdjacent {
                    from: location,
                    to: *destination,
                });
            }

            if let Some(a) = state.armies.get_mut(army) {
                a.activity = Activity::Moving {
                    destination: *destination,
                    ticks_remaining: defines::movement::TRANSIT_TICKS,
                };
                log::debug!(
                    "{} army {} marching {} -> {}",
                    nation,
                    army,
                    location,
                    destination
                );
            }
            Ok(())
        }

        Command::Recruit { province } => {
            let owned = state
                .provinces
                .get(province)
                .ok_or(ActionError::UnknownProvince(*province))?
                .owner
                .as_deref()
                == Some(nation);
            if !owned {
                return Err(ActionError::NotOwned(*province, nation.to_string()));
            }

            let cost = defines::economy::RECRUIT_COST;
            let treasury = state.nations.get(nation).map(|n| n.treasury).unwrap_or(0);
            if treasury < cost {
                return Err(ActionError::InsufficientFunds {
                    required: cost,
                    available: treasury,
                });
            }

            // Deduction and creation are one step; no path leaves the
            // treasury charged without an army or vice versa.
            if let Some(n) = state.nations.get_mut(nation) {
                n.treasury -= cost;
            }
            let id = state.spawn_army(nation, *province, defines::economy::RECRUIT_SIZE);
            log::debug!("{} raised army {} at province {}", nation, id, province);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::GreedyCommander;
    use crate::testing::WorldStateBuilder;

    #[test]
    fn test_step_world_advances_tick() {
        let state = WorldStateBuilder::new()
            .with_nation("RED", false)
            .with_grid(3, 3)
            .build();

        let mut ai = GreedyCommander::new(0);
        let next = step_world(&state, &[], &mut ai);
        assert_eq!(next.tick, 1);
    }

    #[test]
    fn test_paused_tick_is_a_no_op() {
        let mut state = WorldStateBuilder::new()
            .with_nation("RED", false)
            .with_grid(3, 3)
            .with_owner(0, "RED")
            .with_army(1, "RED", 0, 1000)
            .build();
        state.paused = true;

        let mut ai = GreedyCommander::new(0);
        let next = step_world(&state, &[], &mut ai);

        assert_eq!(next.tick, 0);
        assert_eq!(next.checksum(), state.checksum());
    }

    #[test]
    fn test_game_over_tick_is_a_no_op() {
        let mut state = WorldStateBuilder::new()
            .with_nation("RED", false)
            .with_grid(3, 3)
            .build();
        state.game_over = true;
        state.winner = Some("RED".into());

        let mut ai = GreedyCommander::new(0);
        let next = step_world(&state, &[], &mut ai);
        assert_eq!(next.checksum(), state.checksum());
    }

    #[test]
    fn test_move_all_rejects_non_adjacent() {
        // Provinces 0 and 8 sit in opposite corners of the 3x3 grid.
        let state = WorldStateBuilder::new()
            .with_nation("RED", true)
            .with_grid(3, 3)
            .with_army(1, "RED", 0, 1000)
            .build();
        let before = state.checksum();

        let mut next = state.clone();
        let err = execute_command(&mut next, "RED", &Command::MoveAll { from: 0, to: 8 });
        assert_eq!(err, Err(ActionError::NotAdjacent { from: 0, to: 8 }));
        assert_eq!(next.checksum(), before);
    }

    #[test]
    fn test_move_all_rejects_when_nothing_can_march() {
        let state = WorldStateBuilder::new()
            .with_nation("RED", true)
            .with_grid(3, 3)
            .build();

        let mut next = state.clone();
        let err = execute_command(&mut next, "RED", &Command::MoveAll { from: 0, to: 1 });
        assert_eq!(err, Err(ActionError::NoIdleArmies(0, "RED".into())));
    }

    #[test]
    fn test_move_all_marches_every_free_army() {
        let mut state = WorldStateBuilder::new()
            .with_nation("RED", true)
            .with_grid(3, 3)
            .with_army(1, "RED", 0, 1000)
            .with_army(2, "RED", 0, 1000)
            .with_army(3, "RED", 1, 1000)
            .build();

        execute_command(&mut state, "RED", &Command::MoveAll { from: 0, to: 1 }).unwrap();

        assert!(state.armies[&1].activity.is_moving());
        assert!(state.armies[&2].activity.is_moving());
        assert_eq!(state.armies[&3].activity, Activity::Idle);
    }

    #[test]
    fn test_recruit_deducts_and_spawns_atomically() {
        let mut state = WorldStateBuilder::new()
            .with_nation("RED", true)
            .with_grid(3, 3)
            .with_owner(0, "RED")
            .build();
        state.nations.get_mut("RED").unwrap().treasury = 60;

        execute_command(&mut state, "RED", &Command::Recruit { province: 0 }).unwrap();

        assert_eq!(state.nations["RED"].treasury, 10);
        assert_eq!(state.armies.len(), 1);
        let army = state.armies.values().next().unwrap();
        assert_eq!(army.strength, defines::economy::RECRUIT_SIZE);
        assert_eq!(army.location, 0);
    }

    #[test]
    fn test_recruit_rejected_without_funds() {
        let mut state = WorldStateBuilder::new()
            .with_nation("RED", true)
            .with_grid(3, 3)
            .with_owner(0, "RED")
            .build();
        state.nations.get_mut("RED").unwrap().treasury = 49;
        let before = state.checksum();

        let err = execute_command(&mut state, "RED", &Command::Recruit { province: 0 });
        assert_eq!(
            err,
            Err(ActionError::InsufficientFunds {
                required: 50,
                available: 49
            })
        );
        assert_eq!(state.checksum(), before);
    }

    #[test]
    fn test_recruit_rejected_on_foreign_soil() {
        let mut state = WorldStateBuilder::new()
            .with_nation("RED", true)
            .with_nation("BLU", false)
            .with_grid(3, 3)
            .with_owner(0, "BLU")
            .build();
        state.nations.get_mut("RED").unwrap().treasury = 100;

        let err = execute_command(&mut state, "RED", &Command::Recruit { province: 0 });
        assert_eq!(err, Err(ActionError::NotOwned(0, "RED".into())));
    }

    #[test]
    fn test_determinism_over_many_ticks() {
        let build = || {
            WorldStateBuilder::new()
                .with_nation("RED", false)
                .with_nation("BLU", false)
                .with_grid(5, 5)
                .with_owner(0, "RED")
                .with_owner(24, "BLU")
                .with_capital(0)
                .with_capital(24)
                .with_army(1, "RED", 0, 1000)
                .with_army(2, "BLU", 24, 1000)
                .build()
        };

        let mut a = build();
        let mut b = build();
        let mut ai_a = GreedyCommander::new(99);
        let mut ai_b = GreedyCommander::new(99);

        for _ in 0..60 {
            a = step_world(&a, &[], &mut ai_a);
            b = step_world(&b, &[], &mut ai_b);
        }

        assert_eq!(a.checksum(), b.checksum());

        let sorted_counts = |s: &WorldState| {
            let mut counts: Vec<_> = s.owned_province_counts().into_iter().collect();
            counts.sort();
            counts
        };
        assert_eq!(sorted_counts(&a), sorted_counts(&b));
    }
}
