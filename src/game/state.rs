use std::collections::BTreeMap;

use super::action::Direction;
use super::effects::PowerUpKind;

/// Side length of the square board, in cells
pub const GRID_SIZE: i32 = 20;

/// Where a fresh snake starts
pub const START_POSITION: Position = Position { x: 10, y: 10 };

/// Where the first food of every game sits
pub const INITIAL_FOOD: Position = Position { x: 15, y: 15 };

/// Heading of a fresh snake
pub const START_DIRECTION: Direction = Direction::Down;

/// Milliseconds on the game clock
pub type Millis = u64;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check if the position lies on the board
    pub fn in_bounds(&self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }

    /// Position of the n-th cell in row-major order
    pub fn from_index(index: usize) -> Self {
        let size = GRID_SIZE as usize;
        Self::new((index % size) as i32, (index / size) as i32)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// A one-cell snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>) -> Self {
        debug_assert!(!body.is_empty(), "a snake has at least one segment");
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if any segment (head included) sits on `pos`
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Add a new head
    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    /// Drop the last segment, keeping at least the head
    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop();
        }
    }

    /// Shorten the snake, never below one segment
    pub fn truncate(&mut self, len: usize) {
        self.body.truncate(len.max(1));
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a well-formed snake
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    NotStarted,
    Running,
    Paused,
    Over,
}

/// A collectible power-up waiting on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub position: Position,
    pub spawned_at: Millis,
}

impl PowerUp {
    /// Whether the pickup window has closed at `now`
    pub fn is_expired(&self, now: Millis, lifetime_ms: Millis) -> bool {
        now.saturating_sub(self.spawned_at) >= lifetime_ms
    }
}

/// An effect currently in force
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub started_at: Millis,
    pub duration_ms: Millis,
}

impl ActiveEffect {
    pub fn new(kind: PowerUpKind, started_at: Millis) -> Self {
        Self {
            kind,
            started_at,
            duration_ms: kind.duration_ms(),
        }
    }

    pub fn is_expired(&self, now: Millis) -> bool {
        now.saturating_sub(self.started_at) >= self.duration_ms
    }

    /// Time left before expiry, zero once expired
    pub fn remaining_ms(&self, now: Millis) -> Millis {
        self.duration_ms
            .saturating_sub(now.saturating_sub(self.started_at))
    }
}

/// Complete game state
///
/// Owned by the engine and only changed through its operations.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub power_up: Option<PowerUp>,
    /// At most one entry per kind
    pub effects: BTreeMap<PowerUpKind, ActiveEffect>,
    pub score: u32,
    /// Direction of the last committed move
    pub direction: Direction,
    /// Direction the next tick will use
    pub staged_direction: Direction,
    pub status: GameStatus,
}

impl GameState {
    /// The state every game starts from
    pub fn initial() -> Self {
        Self {
            snake: Snake::new(START_POSITION),
            food: INITIAL_FOOD,
            power_up: None,
            effects: BTreeMap::new(),
            score: 0,
            direction: START_DIRECTION,
            staged_direction: START_DIRECTION,
            status: GameStatus::NotStarted,
        }
    }

    pub fn has_effect(&self, kind: PowerUpKind) -> bool {
        self.effects.contains_key(&kind)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }

    /// Immutable copy for the rendering layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.body.clone(),
            food: self.food,
            power_up: self.power_up,
            active_effects: self.effects.values().copied().collect(),
            score: self.score,
            status: self.status,
            direction: self.direction,
        }
    }

    /// Snapshot as seen at `now`: a power-up past its window and effects past
    /// their duration are left out even if no tick has removed them yet.
    pub fn snapshot_at(&self, now: Millis, power_up_lifetime_ms: Millis) -> Snapshot {
        let mut snapshot = self.snapshot();
        snapshot.power_up = self
            .power_up
            .filter(|p| !p.is_expired(now, power_up_lifetime_ms));
        snapshot.active_effects.retain(|e| !e.is_expired(now));
        snapshot
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Read-only view of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Position,
    pub power_up: Option<PowerUp>,
    pub active_effects: Vec<ActiveEffect>,
    pub score: u32,
    pub status: GameStatus,
    pub direction: Direction,
}

impl Snapshot {
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn has_effect(&self, kind: PowerUpKind) -> bool {
        self.active_effects.iter().any(|e| e.kind == kind)
    }
}
