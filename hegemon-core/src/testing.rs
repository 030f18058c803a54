use crate::bounded::new_morale;
use crate::state::{Activity, Army, ArmyId, NationState, ProvinceId, ProvinceState, WorldState};

/// Fluent construction of small worlds for tests and scenario loading.
pub struct WorldStateBuilder {
    state: WorldState,
}

impl WorldStateBuilder {
    pub fn new() -> Self {
        Self {
            state: WorldState::default(),
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.state.rng_seed = seed;
        self
    }

    pub fn with_nation(mut self, tag: &str, is_human: bool) -> Self {
        self.state.nations.insert(
            tag.to_string(),
            NationState {
                treasury: 100, // generous default so tests can recruit
                is_human,
            },
        );
        self
    }

    /// Lay out a width×height grid of provinces. Province ids run row-major
    /// from zero; adjacency lists are built in left, right, up, down order.
    pub fn with_grid(mut self, width: u32, height: u32) -> Self {
        for y in 0..height {
            for x in 0..width {
                let id = y * width + x;
                let mut neighbors = Vec::new();
                if x > 0 {
                    neighbors.push(id - 1);
                }
                if x + 1 < width {
                    neighbors.push(id + 1);
                }
                if y > 0 {
                    neighbors.push(id - width);
                }
                if y + 1 < height {
                    neighbors.push(id + width);
                }
                self.state.provinces.insert(
                    id,
                    ProvinceState {
                        x: x as i32,
                        y: y as i32,
                        neighbors,
                        owner: None,
                        is_capital: false,
                    },
                );
            }
        }
        self
    }

    pub fn with_owner(mut self, id: ProvinceId, tag: &str) -> Self {
        if let Some(p) = self.state.provinces.get_mut(&id) {
            p.owner = Some(tag.to_string());
        }
        self
    }

    pub fn with_capital(mut self, id: ProvinceId) -> Self {
        if let Some(p) = self.state.provinces.get_mut(&id) {
            p.is_capital = true;
        }
        self
    }

    /// Insert an idle army at full morale with an explicit id.
    pub fn with_army(mut self, id: ArmyId, tag: &str, location: ProvinceId, strength: i64) -> Self {
        self.state.armies.insert(
            id,
            Army {
                id,
                owner: tag.to_string(),
                location,
                strength,
                morale: new_morale(),
                activity: Activity::Idle,
            },
        );
        self.state.next_army_id = self.state.next_army_id.max(id + 1);
        self
    }

    pub fn build(self) -> WorldState {
        self.state
    }
}

impl Default for WorldStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
