//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Time enters only as the `now` timestamp handed to each tick, so every timed
//! effect is a comparison against stored timestamps.

pub mod action;
pub mod config;
pub mod effects;
pub mod engine;
pub mod rng;
pub mod scheduler;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Intent};
pub use config::GameConfig;
pub use effects::{EffectSpec, PowerUpKind};
pub use engine::{CollisionType, GameEngine, GameOver, GameOverCallback, TickOutcome};
pub use rng::RandomSource;
pub use scheduler::TickScheduler;
pub use state::{
    ActiveEffect, GRID_SIZE, GameState, GameStatus, INITIAL_FOOD, Millis, Position, PowerUp,
    START_DIRECTION, START_POSITION, Snake, Snapshot,
};
