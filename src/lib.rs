//! Power Snake - a terminal snake game with timed power-ups
//!
//! This library provides:
//! - Core game state machine and tick scheduling (game module)
//! - Persisted top-10 leaderboard (leaderboard module)
//! - Keyboard mapping and name entry (input module)
//! - TUI rendering (render module)
//! - The interactive application loop (modes module)

pub mod game;
pub mod input;
pub mod leaderboard;
pub mod modes;
pub mod render;
