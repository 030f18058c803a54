use std::time::Duration;

/// Owns the wall-clock side of the simulation: the inter-tick wait,
/// pause/resume, and speed changes. The core only ever sees "advance one
/// tick"; everything temporal stays here.
#[derive(Debug, Clone)]
pub struct Scheduler {
    interval: Duration,
    paused: bool,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            paused: false,
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the inter-tick wait. Takes effect at the next wait, so a
    /// speed change can never skip or double a tick boundary.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Block until the next tick is due. A zero interval runs flat out.
    pub fn wait(&self) {
        if !self.interval.is_zero() {
            std::thread::sleep(self.interval);
        }
    }
}
