use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction.
    /// The grid is row-major, so `y` grows downward.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A discrete intent delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Steer the snake
    Direction(Direction),
    /// Flip between running and paused
    TogglePause,
    /// Leave the not-started screen
    Start,
}

impl From<Direction> for Intent {
    fn from(direction: Direction) -> Self {
        Intent::Direction(direction)
    }
}
