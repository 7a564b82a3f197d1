use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use super::board::{Leaderboard, LeaderboardEntry};

/// JSON file holding the leaderboard between sessions
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved board. A missing file is an empty board.
    pub fn load(&self) -> Result<Leaderboard> {
        if !self.path.exists() {
            return Ok(Leaderboard::new());
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read leaderboard from {:?}", self.path))?;
        let entries: Vec<LeaderboardEntry> =
            serde_json::from_str(&json).context("Failed to deserialize leaderboard")?;

        Ok(Leaderboard::from_entries(entries))
    }

    /// Write the board, creating parent directories if needed
    pub fn save(&self, board: &Leaderboard) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(board).context("Failed to serialize leaderboard")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write leaderboard to {:?}", self.path))?;

        info!(path = ?self.path, entries = board.len(), "leaderboard saved");
        Ok(())
    }
}
