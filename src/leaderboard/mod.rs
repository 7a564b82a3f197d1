//! Persisted top scores

pub mod board;
pub mod store;

pub use board::{ANONYMOUS, CAPACITY, Leaderboard, LeaderboardEntry, MAX_NAME_LEN, normalize_name};
pub use store::LeaderboardStore;
