use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

/// Tunables for the game rules and pacing.
///
/// The board itself is fixed at [`GRID_SIZE`](super::GRID_SIZE) cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Milliseconds between ticks at normal speed
    pub base_tick_ms: u64,
    /// Points for one food before multipliers
    pub food_points: u32,
    /// Probability of a power-up appearing after food is eaten
    pub power_up_chance: f64,
    /// How long an uncollected power-up stays on the board
    pub power_up_lifetime_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_tick_ms: 150,
            food_points: 10,
            power_up_chance: 0.2,
            power_up_lifetime_ms: 5000,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.base_tick_ms > 0, "base_tick_ms must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.power_up_chance),
            "power_up_chance must be within [0, 1], got {}",
            self.power_up_chance
        );
        Ok(())
    }

    /// A configuration where every food spawns a power-up
    pub fn always_power_up() -> Self {
        Self {
            power_up_chance: 1.0,
            ..Default::default()
        }
    }

    /// A configuration where power-ups never appear
    pub fn no_power_ups() -> Self {
        Self {
            power_up_chance: 0.0,
            ..Default::default()
        }
    }
}
