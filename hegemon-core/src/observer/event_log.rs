//! Event log observer recording notable simulation events as JSONL.
//!
//! Detects events by comparing consecutive snapshots and writes one JSON
//! object per line to any `Write` destination (file, pipe, buffer):
//!
//! ```json
//! {"type":"province_owner_changed","tick":12,"province":4,"new_owner":"RED"}
//! ```

use super::{ObserverError, SimObserver, Snapshot};
use crate::state::{ArmyId, ProvinceId, Tag, WorldState};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// Events detected by comparing state between ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Province ownership changed, by battle or occupation.
    ProvinceOwnerChanged {
        tick: u64,
        province: ProvinceId,
        #[serde(skip_serializing_if = "Option::is_none")]
        old_owner: Option<Tag>,
        new_owner: Tag,
    },

    /// An army was destroyed in battle.
    ArmyDestroyed {
        tick: u64,
        army: ArmyId,
        owner: Tag,
        last_location: ProvinceId,
    },

    /// A new army was raised.
    ArmyRaised {
        tick: u64,
        army: ArmyId,
        owner: Tag,
        province: ProvinceId,
    },

    /// A nation reached the supermajority threshold and won.
    VictoryAchieved { tick: u64, winner: Tag },
}

/// Writes one JSONL line per detected event.
pub struct EventLogObserver<W: Write + Send> {
    out: BufWriter<W>,
    prev: Option<Arc<WorldState>>,
}

impl EventLogObserver<File> {
    pub fn to_file(path: &Path) -> std::io::Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write + Send> EventLogObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
            prev: None,
        }
    }

    /// Flush and hand back the underlying writer (used by tests).
    pub fn into_inner(self) -> std::io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }

    fn detect(&self, prev: &WorldState, curr: &WorldState) -> Vec<GameEvent> {
        let mut events = Vec::new();

        for province in curr.sorted_province_ids() {
            let old_owner = prev.provinces.get(&province).and_then(|p| p.owner.clone());
            let new_owner = curr.provinces.get(&province).and_then(|p| p.owner.clone());
            if old_owner != new_owner {
                if let Some(new_owner) = new_owner {
                    events.push(GameEvent::ProvinceOwnerChanged {
                        tick: curr.tick,
                        province,
                        old_owner,
                        new_owner,
                    });
                }
            }
        }

        for army in prev.armies.keys() {
            if !curr.armies.contains_key(army) {
                let lost = &prev.armies[army];
                events.push(GameEvent::ArmyDestroyed {
                    tick: curr.tick,
                    army: *army,
                    owner: lost.owner.clone(),
                    last_location: lost.location,
                });
            }
        }

        for army in curr.sorted_army_ids() {
            if !prev.armies.contains_key(&army) {
                let raised = &curr.armies[&army];
                events.push(GameEvent::ArmyRaised {
                    tick: curr.tick,
                    army,
                    owner: raised.owner.clone(),
                    province: raised.location,
                });
            }
        }

        if !prev.game_over && curr.game_over {
            if let Some(winner) = &curr.winner {
                events.push(GameEvent::VictoryAchieved {
                    tick: curr.tick,
                    winner: winner.clone(),
                });
            }
        }

        // Destroyed-army detection walks a HashMap; sort the batch so the
        // log is reproducible line for line.
        events.sort_by_key(|e| match e {
            GameEvent::ProvinceOwnerChanged { province, .. } => (0, *province),
            GameEvent::ArmyDestroyed { army, .. } => (1, *army),
            GameEvent::ArmyRaised { army, .. } => (2, *army),
            GameEvent::VictoryAchieved { .. } => (3, 0),
        });
        events
    }
}

impl<W: Write + Send> SimObserver for EventLogObserver<W> {
    fn on_tick(&mut self, snapshot: &Snapshot) -> Result<(), ObserverError> {
        if let Some(prev) = &self.prev {
            for event in self.detect(prev, &snapshot.state) {
                serde_json::to_writer(&mut self.out, &event)?;
                self.out.write_all(b"\n")?;
            }
            self.out.flush()?;
        }
        self.prev = Some(Arc::clone(&snapshot.state));
        Ok(())
    }
}
