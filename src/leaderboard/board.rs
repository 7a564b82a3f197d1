use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Number of scores kept
pub const CAPACITY: usize = 10;

/// Longest name stored, in characters
pub const MAX_NAME_LEN: usize = 20;

/// Name used when the player skips name entry
pub const ANONYMOUS: &str = "Anonymous";

/// One saved score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub date: String,
    pub time: String,
}

impl LeaderboardEntry {
    pub fn new(name: &str, score: u32, recorded_at: DateTime<Local>) -> Self {
        Self {
            name: normalize_name(name),
            score,
            date: recorded_at.format("%Y-%m-%d").to_string(),
            time: recorded_at.format("%H:%M:%S").to_string(),
        }
    }
}

/// Trim, cap at [`MAX_NAME_LEN`] characters, and fall back to [`ANONYMOUS`]
pub fn normalize_name(name: &str) -> String {
    let trimmed: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    let trimmed = trimmed.trim_end();
    if trimmed.is_empty() {
        ANONYMOUS.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Top scores, highest first. Equal scores keep the order they were recorded in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary entries, restoring the ordering and capacity rules
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(CAPACITY);
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    /// Whether recording `score` now would keep it on the board
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < CAPACITY || self.entries.last().is_some_and(|e| score > e.score)
    }

    /// Insert a score and return its 1-based rank, or `None` if it fell off the board
    pub fn record(&mut self, name: &str, score: u32, recorded_at: DateTime<Local>) -> Option<usize> {
        let slot = self
            .entries
            .iter()
            .position(|entry| entry.score < score)
            .unwrap_or(self.entries.len());

        if slot >= CAPACITY {
            return None;
        }

        self.entries
            .insert(slot, LeaderboardEntry::new(name, score, recorded_at));
        self.entries.truncate(CAPACITY);
        Some(slot + 1)
    }
}
