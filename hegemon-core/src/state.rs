use crate::bounded::{new_morale, BoundedFixed};
use crate::fixed::Fixed;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type Tag = String;
pub type ProvinceId = u32;
pub type ArmyId = u32;

/// What an army is doing with its time.
///
/// Transitions:
/// - `Idle → Moving`: a move order (player request or AI decision).
/// - `Moving → Idle`: the countdown reaches zero and the army relocates.
/// - `Idle → Occupying`: sole non-moving army on a foreign province.
/// - `Occupying → Idle`: the province flips, becomes friendly, or a second
///   army arrives; in every case the progress counter is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Activity {
    Idle,
    Moving {
        destination: ProvinceId,
        ticks_remaining: u32,
    },
    Occupying {
        progress: u8,
    },
}

impl Activity {
    pub fn is_moving(&self) -> bool {
        matches!(self, Activity::Moving { .. })
    }
}

impl Default for Activity {
    fn default() -> Self {
        Activity::Idle
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Army {
    pub id: ArmyId,
    pub owner: Tag,
    pub location: ProvinceId,
    /// Men in the army. Battle never grinds this below
    /// [`crate::defines::combat::MIN_SURVIVORS`].
    pub strength: i64,
    pub morale: BoundedFixed,
    pub activity: Activity,
}

impl Army {
    /// Troop count scaled by morale; decides battles.
    pub fn effective_strength(&self) -> Fixed {
        Fixed::from_int(self.strength).mul(self.morale.get())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvinceState {
    /// Grid position, used for capital-distance scoring
    pub x: i32,
    pub y: i32,
    /// Adjacent provinces, fixed at creation. Ordered left, right, up, down;
    /// edge provinces simply omit the missing directions.
    pub neighbors: Vec<ProvinceId>,
    pub owner: Option<Tag>,
    /// Capitals exert pull on AI expansion
    pub is_capital: bool,
}

impl ProvinceState {
    /// Manhattan distance on the grid.
    pub fn distance_to(&self, other: &ProvinceState) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NationState {
    /// Whole coins; only income and recruitment touch this
    pub treasury: i64,
    /// Human nations are skipped by the AI engine
    pub is_human: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldState {
    /// Completed tick count; incremented at the top of each live tick
    pub tick: u64,
    /// Seed the AI rng was built from, recorded for replay
    pub rng_seed: u64,
    pub provinces: HashMap<ProvinceId, ProvinceState>,
    pub nations: HashMap<Tag, NationState>,
    pub armies: HashMap<ArmyId, Army>,
    pub next_army_id: ArmyId,
    pub paused: bool,
    pub game_over: bool,
    pub winner: Option<Tag>,
}

impl WorldState {
    /// Province ids in ascending order, the canonical iteration order
    /// wherever order is observable.
    pub fn sorted_province_ids(&self) -> Vec<ProvinceId> {
        let mut ids: Vec<_> = self.provinces.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Army ids in ascending order.
    pub fn sorted_army_ids(&self) -> Vec<ArmyId> {
        let mut ids: Vec<_> = self.armies.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Nation tags in ascending order.
    pub fn sorted_tags(&self) -> Vec<Tag> {
        let mut tags: Vec<_> = self.nations.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Ids of non-moving armies at a province, ascending. Armies in transit
    /// still count as being at their origin for combat, but not here.
    pub fn present_armies(&self, province: ProvinceId) -> Vec<ArmyId> {
        let mut ids: Vec<_> = self
            .armies
            .values()
            .filter(|a| a.location == province && !a.activity.is_moving())
            .map(|a| a.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Provinces owned per nation.
    pub fn owned_province_counts(&self) -> HashMap<Tag, usize> {
        let mut counts: HashMap<Tag, usize> = HashMap::new();
        for province in self.provinces.values() {
            if let Some(owner) = &province.owner {
                *counts.entry(owner.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Provinces needed to win the game.
    pub fn victory_threshold(&self) -> usize {
        crate::defines::victory::supermajority(self.provinces.len())
    }

    pub fn are_adjacent(&self, from: ProvinceId, to: ProvinceId) -> bool {
        self.provinces
            .get(&from)
            .map(|p| p.neighbors.contains(&to))
            .unwrap_or(false)
    }

    /// Create an idle army at full morale and return its id.
    pub fn spawn_army(&mut self, owner: &str, location: ProvinceId, strength: i64) -> ArmyId {
        let id = self.next_army_id;
        self.next_army_id += 1;
        self.armies.insert(
            id,
            Army {
                id,
                owner: owner.to_string(),
                location,
                strength,
                morale: new_morale(),
                activity: Activity::Idle,
            },
        );
        id
    }

    /// Compute a deterministic checksum of the world state.
    ///
    /// Identical states produce identical checksums; used for desync
    /// detection between replayed runs. Collections are hashed in sorted
    /// order so HashMap iteration order never leaks in.
    pub fn checksum(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        self.tick.hash(&mut hasher);
        self.rng_seed.hash(&mut hasher);
        self.paused.hash(&mut hasher);
        self.game_over.hash(&mut hasher);
        self.winner.hash(&mut hasher);
        self.next_army_id.hash(&mut hasher);

        for tag in self.sorted_tags() {
            let n = &self.nations[&tag];
            tag.hash(&mut hasher);
            n.treasury.hash(&mut hasher);
            n.is_human.hash(&mut hasher);
        }

        for id in self.sorted_province_ids() {
            let p = &self.provinces[&id];
            id.hash(&mut hasher);
            p.x.hash(&mut hasher);
            p.y.hash(&mut hasher);
            p.neighbors.hash(&mut hasher);
            p.owner.hash(&mut hasher);
            p.is_capital.hash(&mut hasher);
        }

        for id in self.sorted_army_ids() {
            let a = &self.armies[&id];
            id.hash(&mut hasher);
            a.owner.hash(&mut hasher);
            a.location.hash(&mut hasher);
            a.strength.hash(&mut hasher);
            a.morale.get().raw().hash(&mut hasher);
            a.activity.hash(&mut hasher);
        }

        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::WorldStateBuilder;

    #[test]
    fn test_effective_strength_scales_with_morale() {
        let state = WorldStateBuilder::new()
            .with_nation("RED", false)
            .with_grid(2, 1)
            .with_army(1, "RED", 0, 1000)
            .build();

        let army = state.armies.get(&1).unwrap();
        assert_eq!(army.effective_strength(), Fixed::from_int(1000));
    }

    #[test]
    fn test_present_armies_excludes_movers() {
        let mut state = WorldStateBuilder::new()
            .with_nation("RED", false)
            .with_grid(2, 1)
            .with_army(1, "RED", 0, 1000)
            .with_army(2, "RED", 0, 1000)
            .build();

        state.armies.get_mut(&2).unwrap().activity = Activity::Moving {
            destination: 1,
            ticks_remaining: 3,
        };

        assert_eq!(state.present_armies(0), vec![1]);
    }

    #[test]
    fn test_grid_adjacency_order() {
        // 3x3 grid, center province 4 at (1,1): left 3, right 5, up 1, down 7.
        let state = WorldStateBuilder::new().with_grid(3, 3).build();
        let center = state.provinces.get(&4).unwrap();
        assert_eq!(center.neighbors, vec![3, 5, 1, 7]);

        // Corner province 0 only has right and down.
        let corner = state.provinces.get(&0).unwrap();
        assert_eq!(corner.neighbors, vec![1, 3]);
    }

    #[test]
    fn test_spawn_army_allocates_fresh_ids() {
        let mut state = WorldStateBuilder::new()
            .with_nation("RED", false)
            .with_grid(2, 1)
            .build();

        let a = state.spawn_army("RED", 0, 1000);
        let b = state.spawn_army("RED", 1, 1000);
        assert_ne!(a, b);
        assert_eq!(state.armies[&b].activity, Activity::Idle);
        assert_eq!(state.armies[&b].morale.get(), Fixed::ONE);
    }

    #[test]
    fn test_checksum_determinism() {
        let state = WorldStateBuilder::new()
            .with_nation("RED", false)
            .with_grid(3, 3)
            .with_owner(0, "RED")
            .with_army(1, "RED", 0, 1000)
            .build();

        assert_eq!(state.checksum(), state.checksum());
        assert_eq!(state.checksum(), state.clone().checksum());
    }

    #[test]
    fn test_checksum_sensitivity() {
        let base = WorldStateBuilder::new()
            .with_nation("RED", false)
            .with_grid(3, 3)
            .build();

        let mut flipped = base.clone();
        flipped.provinces.get_mut(&0).unwrap().owner = Some("RED".into());

        assert_ne!(base.checksum(), flipped.checksum());
    }

    #[test]
    fn test_victory_threshold_matches_grid() {
        let state = WorldStateBuilder::new().with_grid(7, 7).build();
        assert_eq!(state.victory_threshold(), 37);

        let state = WorldStateBuilder::new().with_grid(5, 4).build();
        assert_eq!(state.victory_threshold(), 15);
    }
}
