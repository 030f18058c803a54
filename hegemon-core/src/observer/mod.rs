//! Observer pattern for simulation state inspection.
//!
//! The presentation side of the world (UIs, event logs, statistics) reads
//! the simulation through this module and can never write back. Observers
//! receive immutable snapshots wrapped in `Arc`; a misbehaving observer can
//! fail, and its error is logged, but it cannot desync the simulation.

pub mod event_log;

use crate::state::WorldState;
use std::sync::Arc;
use thiserror::Error;

/// Immutable snapshot of simulation state handed to observers after a tick.
#[derive(Clone)]
pub struct Snapshot {
    pub state: Arc<WorldState>,
    /// Monotonic tick counter
    pub tick: u64,
    /// State checksum for desync detection (0 if disabled)
    pub checksum: u64,
}

impl Snapshot {
    pub fn new(state: WorldState, checksum: u64) -> Self {
        let tick = state.tick;
        Self {
            state: Arc::new(state),
            tick,
            checksum,
        }
    }
}

/// Errors that can occur during observation.
#[derive(Error, Debug)]
pub enum ObserverError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Trait for simulation observers.
///
/// Implementations receive snapshots after each tick. Errors are reported
/// to the registry, logged, and never block the simulation.
pub trait SimObserver: Send {
    fn on_tick(&mut self, snapshot: &Snapshot) -> Result<(), ObserverError>;
}

/// Holds every registered observer and fans snapshots out to them.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Box<dyn SimObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Box<dyn SimObserver>) {
        self.observers.push(observer);
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify(&mut self, snapshot: &Snapshot) {
        for observer in &mut self.observers {
            if let Err(e) = observer.on_tick(snapshot) {
                log::error!("observer failed on tick {}: {}", snapshot.tick, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::WorldStateBuilder;

    struct CountingObserver {
        seen: std::sync::Arc<std::sync::Mutex<Vec<u64>>>,
    }

    impl SimObserver for CountingObserver {
        fn on_tick(&mut self, snapshot: &Snapshot) -> Result<(), ObserverError> {
            self.seen.lock().expect("poisoned").push(snapshot.tick);
            Ok(())
        }
    }

    #[test]
    fn test_registry_delivers_every_snapshot() {
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::new();
        registry.register(Box::new(CountingObserver { seen: seen.clone() }));
        assert!(!registry.is_empty());

        let mut state = WorldStateBuilder::new().with_grid(2, 2).build();
        state.tick = 3;
        let snapshot = Snapshot::new(state, 0);
        registry.notify(&snapshot);
        registry.notify(&snapshot);

        assert_eq!(*seen.lock().expect("poisoned"), vec![3, 3]);
    }

    #[test]
    fn test_failing_observer_does_not_poison_registry() {
        struct FailingObserver;
        impl SimObserver for FailingObserver {
            fn on_tick(&mut self, _snapshot: &Snapshot) -> Result<(), ObserverError> {
                Err(ObserverError::Io(std::io::Error::other("sink closed")))
            }
        }

        let mut registry = ObserverRegistry::new();
        registry.register(Box::new(FailingObserver));

        let snapshot = Snapshot::new(WorldStateBuilder::new().with_grid(2, 2).build(), 0);
        registry.notify(&snapshot); // must not panic
    }
}
