use serde::{Deserialize, Serialize};

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Compute and log a state checksum every N ticks (0 = disabled).
    pub checksum_frequency: u32,

    /// Seed for the AI commander's RNG. Two runs sharing a seed and the
    /// same player inputs replay identically.
    pub ai_seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            checksum_frequency: 10,
            ai_seed: 0,
        }
    }
}
