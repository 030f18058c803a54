use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Accumulated timing metrics for a simulation run, filled in by the host
/// loop and reported at the end.
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct SimMetrics {
    pub total_ticks: u64,
    /// Time spent inside `step_world`
    pub step_time: Duration,
    /// Time spent notifying observers
    pub observer_time: Duration,
    /// Wall clock time from first tick to last (includes inter-tick waits)
    pub wall_time: Duration,
}

impl SimMetrics {
    pub fn tick_avg_ms(&self) -> f64 {
        if self.total_ticks == 0 {
            0.0
        } else {
            self.step_time.as_secs_f64() * 1000.0 / self.total_ticks as f64
        }
    }

    pub fn ticks_per_second(&self) -> f64 {
        if self.step_time.as_secs_f64() == 0.0 {
            0.0
        } else {
            self.total_ticks as f64 / self.step_time.as_secs_f64()
        }
    }
}
