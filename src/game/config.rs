use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Board width in pixels
pub const BOARD_WIDTH: i32 = 600;
/// Board height in pixels
pub const BOARD_HEIGHT: i32 = 600;
/// Side of one grid cell in pixels
pub const UNIT_SIZE: i32 = 40;

/// Number of cells on the board, which bounds the snake's length
pub const BOARD_CELLS: usize = ((BOARD_WIDTH / UNIT_SIZE) * (BOARD_HEIGHT / UNIT_SIZE)) as usize;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed period of one tick in milliseconds
    pub tick_delay_ms: u64,
    /// Number of drawn segments the snake starts with
    pub initial_body_parts: usize,
    /// Seed for apple placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_delay_ms: 80,
            initial_body_parts: 5,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file, filling missing fields with defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&raw).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that would make the loop or the snake meaningless
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tick_delay_ms > 0, "tick_delay_ms must be positive");
        ensure!(
            self.initial_body_parts > 0,
            "initial_body_parts must be at least 1"
        );
        // The snake tracks one extra trailing cell behind its tail
        ensure!(
            self.initial_body_parts < BOARD_CELLS,
            "initial_body_parts must be below {}",
            BOARD_CELLS
        );
        Ok(())
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_delay_ms)
    }
}
