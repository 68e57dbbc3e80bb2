//! Game settings and tuning
//!
//! Loaded from a JSON file when one is given; missing fields fall back to
//! defaults so older files keep working.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tunable timings, thresholds and spawn rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Input ===
    /// Minimum drag length (pixels) for a swipe to count
    pub swipe_threshold: f32,
    /// Impulse strength requested from physics on each swipe
    pub push_impulse: f32,

    // === Settle cycle (seconds) ===
    /// Wait after the push before snapping
    pub settle_delay: f32,
    /// Wait after snapping before separating stacked tiles
    pub overlap_delay: f32,
    /// Wait after a playable settle before spawning
    pub spawn_delay: f32,

    // === Spawning ===
    /// Upper bound of extra tiles on a fresh board (in addition to the guaranteed one)
    pub initial_extra_max: u8,
    /// Upper bound of tiles spawned after a swipe
    pub spawn_cap: u8,
    /// Lowest rank a spawned tile can have
    pub spawn_value_min: u8,
    /// Highest rank a spawned tile can have
    pub spawn_value_max: u8,

    // === Audio ===
    /// Pitch jitter range for collision and merge cues
    pub pitch_min: f32,
    pub pitch_max: f32,

    /// Fixed run seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
            push_impulse: 8.0,

            settle_delay: 1.2,
            overlap_delay: 0.2,
            spawn_delay: 0.5,

            initial_extra_max: 3,
            spawn_cap: 3,
            spawn_value_min: 1,
            spawn_value_max: 2,

            pitch_min: 0.75,
            pitch_max: 1.25,

            seed: None,
        }
    }
}

impl Settings {
    /// Settings with every delay set to zero (a whole cycle completes in one tick)
    pub fn instant() -> Self {
        Self {
            settle_delay: 0.0,
            overlap_delay: 0.0,
            spawn_delay: 0.0,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Invalid settings in {}: {}; using defaults", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), err);
                Self::default()
            }
        }
    }

    /// Total time of one settle cycle when the board stays playable
    pub fn cycle_duration(&self) -> f32 {
        self.settle_delay + self.overlap_delay + self.spawn_delay
    }
}
