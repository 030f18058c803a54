use crate::ai::Commander;
use crate::defines::ai as defines;
use crate::defines::economy;
use crate::fixed::Fixed;
use crate::input::Command;
use crate::state::{Army, ProvinceId, WorldState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A seeded, score-driven commander.
///
/// Each decision tick a nation may raise one army (a dice roll against the
/// recruit chance, paid from treasury) and orders every free army at the
/// best-scoring neighboring province, if any neighbor is worth the march.
pub struct GreedyCommander {
    rng: StdRng,
}

impl GreedyCommander {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Roll for recruitment. The dice are thrown before the treasury check
    /// so the RNG stream does not depend on how rich the nation happens
    /// to be.
    fn plan_recruitment(&mut self, state: &WorldState, nation: &str) -> Option<Command> {
        let roll: f64 = self.rng.gen();
        if roll >= defines::RECRUIT_CHANCE {
            return None;
        }
        let treasury = state.nations.get(nation).map(|n| n.treasury).unwrap_or(0);
        if treasury < economy::RECRUIT_COST {
            return None;
        }

        // First owned province in canonical order hosts the muster.
        let province = state
            .sorted_province_ids()
            .into_iter()
            .find(|id| state.provinces[id].owner.as_deref() == Some(nation))?;
        Some(Command::Recruit { province })
    }

    /// Pick a destination for one army, or None to stay put.
    ///
    /// Defense comes first: a friendly neighbor with foreign troops on it is
    /// relieved immediately, no scoring. Otherwise every non-owned neighbor
    /// is scored and the best one is taken, but only if it clears the
    /// threshold; a board of bad options means the army holds position.
    fn pick_target(&self, state: &WorldState, nation: &str, army: &Army) -> Option<ProvinceId> {
        let here = state.provinces.get(&army.location)?;

        for &neighbor in &here.neighbors {
            let p = &state.provinces[&neighbor];
            let friendly = p.owner.as_deref() == Some(nation);
            let intruded = state
                .armies
                .values()
                .any(|a| a.location == neighbor && a.owner != nation);
            if friendly && intruded {
                return Some(neighbor);
            }
        }

        let mut best: Option<(ProvinceId, i32)> = None;
        for &neighbor in &here.neighbors {
            if state.provinces[&neighbor].owner.as_deref() == Some(nation) {
                continue;
            }
            let score = self.score_offense(state, nation, army, neighbor);
            // Ties keep the first neighbor in adjacency order.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((neighbor, score));
            }
        }

        best.filter(|&(_, score)| score > defines::TARGET_SCORE_THRESHOLD)
            .map(|(province, _)| province)
    }

    fn score_offense(
        &self,
        state: &WorldState,
        nation: &str,
        army: &Army,
        target: ProvinceId,
    ) -> i32 {
        let province = &state.provinces[&target];

        let mut score = if province.owner.is_some() {
            defines::CLAIMED_BONUS
        } else {
            defines::NEUTRAL_BONUS
        };

        let defense: Fixed = state
            .armies
            .values()
            .filter(|a| a.location == target && a.owner != nation)
            .map(Army::effective_strength)
            .fold(Fixed::ZERO, |acc, s| acc + s);

        if defense == Fixed::ZERO {
            score += defines::UNDEFENDED_BONUS;
        } else {
            let attack = army.effective_strength();
            if attack > defense.mul(defines::SUPERIORITY_RATIO) {
                score += defines::SUPERIOR_BONUS;
            } else if attack > defense {
                score += defines::EDGE_BONUS;
            } else {
                score += defines::OUTMATCHED_PENALTY;
            }
        }

        // Capitals still in foreign hands pull armies toward them.
        for capital_id in state.sorted_province_ids() {
            let capital = &state.provinces[&capital_id];
            if !capital.is_capital || capital.owner.as_deref() == Some(nation) {
                continue;
            }
            score += (defines::CAPITAL_PULL - province.distance_to(capital)).max(0);
        }

        score
    }
}

impl Commander for GreedyCommander {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn plan(&mut self, state: &WorldState, nation: &str) -> Vec<Command> {
        let mut commands = Vec::new();

        if let Some(cmd) = self.plan_recruitment(state, nation) {
            commands.push(cmd);
        }

        for id in state.sorted_army_ids() {
            let army = &state.armies[&id];
            if army.owner != nation || army.activity.is_moving() {
                continue;
            }
            if let Some(destination) = self.pick_target(state, nation, army) {
                commands.push(Command::MoveArmy {
                    army: id,
                    destination,
                });
            }
        }

        commands
    }
}
