use super::{
    action::{Direction, Intent},
    config::GameConfig,
    effects::PowerUpKind,
    rng::RandomSource,
    state::{ActiveEffect, GRID_SIZE, GameState, GameStatus, Millis, Position, PowerUp, Snapshot},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
    pub collision: CollisionType,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The head advanced one cell
    pub moved: bool,
    /// The snake ate food this tick
    pub ate_food: bool,
    /// A power-up appeared on the board
    pub spawned: Option<PowerUpKind>,
    /// A power-up was picked up
    pub collected: Option<PowerUpKind>,
    /// The pending power-up vanished uncollected
    pub power_up_lapsed: bool,
    /// Effects that ran out this tick
    pub expired: Vec<PowerUpKind>,
    /// Set on the tick the game ended
    pub game_over: Option<GameOver>,
}

/// Invoked with the final score when a game ends
pub type GameOverCallback = Box<dyn FnMut(u32)>;

/// The game state machine
///
/// Owns the whole [`GameState`]. Input only stages changes; [`tick`](Self::tick)
/// is the single path that advances the simulation.
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: Box<dyn RandomSource>,
    on_game_over: Option<GameOverCallback>,
}

impl GameEngine {
    /// Create an engine with an entropy-seeded random source
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose games are reproducible for a given seed
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, rng: impl RandomSource + 'static) -> Self {
        Self::from_state(config, GameState::initial(), rng)
    }

    /// Resume the simulation from an arbitrary state
    pub fn from_state(
        config: GameConfig,
        state: GameState,
        rng: impl RandomSource + 'static,
    ) -> Self {
        Self {
            config,
            state,
            rng: Box::new(rng),
            on_game_over: None,
        }
    }

    /// Register the callback fired once per game over
    pub fn on_game_over(&mut self, callback: impl FnMut(u32) + 'static) {
        self.on_game_over = Some(Box::new(callback));
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Read-only view for the renderer at `now`
    pub fn snapshot_at(&self, now: Millis) -> Snapshot {
        self.state.snapshot_at(now, self.config.power_up_lifetime_ms)
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Direction of the last committed move
    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn point_multiplier(&self) -> u32 {
        if self.state.has_effect(PowerUpKind::DoublePoints) {
            2
        } else {
            1
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.state.has_effect(PowerUpKind::Invincibility)
    }

    pub fn speed_boost_active(&self) -> bool {
        self.state.has_effect(PowerUpKind::SpeedBoost)
    }

    /// Route an intent from the input layer.
    ///
    /// The first intent of a fresh game only starts it.
    pub fn apply(&mut self, intent: Intent) {
        if self.state.status == GameStatus::NotStarted {
            self.start();
            return;
        }

        match intent {
            Intent::Direction(direction) => {
                self.set_direction(direction);
            }
            Intent::TogglePause => {
                self.toggle_pause();
            }
            Intent::Start => {}
        }
    }

    /// NotStarted -> Running. Returns whether the transition happened.
    pub fn start(&mut self) -> bool {
        if self.state.status != GameStatus::NotStarted {
            return false;
        }
        self.state.status = GameStatus::Running;
        info!("game started");
        true
    }

    /// Stage a direction for the next tick. Returns whether it was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.state.status != GameStatus::Running || self.state.direction.is_opposite(direction)
        {
            return false;
        }
        self.state.staged_direction = direction;
        true
    }

    /// Running <-> Paused. Returns whether the status changed.
    pub fn toggle_pause(&mut self) -> bool {
        self.state.status = match self.state.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::NotStarted | GameStatus::Over => return false,
        };
        debug!(status = ?self.state.status, "pause toggled");
        true
    }

    /// Back to a fresh, not-started game
    pub fn reset(&mut self) {
        self.state = GameState::initial();
        debug!("game reset");
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self, now: Millis) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.state.status != GameStatus::Running {
            return outcome;
        }

        // An uncollected power-up disappears once its window closes
        let lifetime = self.config.power_up_lifetime_ms;
        if self.state.power_up.is_some_and(|p| p.is_expired(now, lifetime)) {
            self.state.power_up = None;
            outcome.power_up_lapsed = true;
            debug!("power-up lapsed uncollected");
        }

        let direction = self.state.staged_direction;
        let new_head = self.state.snake.head().moved_in_direction(direction);

        if !self.is_invincible() {
            if let Some(collision) = self.check_collision(new_head) {
                outcome.game_over = Some(self.finish(collision));
                return outcome;
            }
        }

        self.state.direction = direction;
        self.state.snake.push_head(new_head);
        outcome.moved = true;

        if new_head == self.state.food {
            self.state.score += self.config.food_points * self.point_multiplier();
            let pending = self.state.power_up.map(|p| p.position);
            self.state.food = self.random_free_cell(pending);
            outcome.ate_food = true;
            outcome.spawned = self.maybe_spawn_power_up(now);
        } else {
            self.state.snake.pop_tail();
        }

        let collected = self
            .state
            .power_up
            .filter(|p| p.position == new_head)
            .map(|p| p.kind);
        if let Some(kind) = collected {
            self.state.power_up = None;
            self.activate(kind, now);
            outcome.collected = Some(kind);
        }

        outcome.expired = self.expire_effects(now);
        outcome
    }

    /// Wall and self collision against the body as it was before the move
    fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !pos.in_bounds() {
            return Some(CollisionType::Wall);
        }

        if self.state.snake.body[1..].contains(&pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn finish(&mut self, collision: CollisionType) -> GameOver {
        self.state.status = GameStatus::Over;
        self.state.power_up = None;
        self.state.effects.clear();

        let score = self.state.score;
        info!(score, ?collision, "game over");
        if let Some(callback) = self.on_game_over.as_mut() {
            callback(score);
        }

        GameOver { score, collision }
    }

    fn maybe_spawn_power_up(&mut self, now: Millis) -> Option<PowerUpKind> {
        if self.state.power_up.is_some() || !self.rng.chance(self.config.power_up_chance) {
            return None;
        }

        let kind = PowerUpKind::ALL[self.rng.index(PowerUpKind::ALL.len())];
        let food = self.state.food;
        let position = self.random_free_cell(Some(food));
        self.state.power_up = Some(PowerUp {
            kind,
            position,
            spawned_at: now,
        });
        debug!(?kind, x = position.x, y = position.y, "power-up spawned");
        Some(kind)
    }

    fn activate(&mut self, kind: PowerUpKind, now: Millis) {
        // Re-collecting a kind restarts its clock
        self.state.effects.insert(kind, ActiveEffect::new(kind, now));

        if kind == PowerUpKind::Shrink {
            let len = self.state.snake.len();
            self.state.snake.truncate(len.saturating_sub(2));
        }
        debug!(?kind, "power-up collected");
    }

    fn expire_effects(&mut self, now: Millis) -> Vec<PowerUpKind> {
        let expired: Vec<PowerUpKind> = self
            .state
            .effects
            .values()
            .filter(|effect| effect.is_expired(now))
            .map(|effect| effect.kind)
            .collect();

        for kind in &expired {
            self.state.effects.remove(kind);
            debug!(?kind, "effect expired");
        }

        expired
    }

    /// A random cell not covered by the snake (or `blocked`).
    ///
    /// Random probing is bounded by the number of cells, then falls back to
    /// scanning the board. A full board is a broken invariant.
    fn random_free_cell(&mut self, blocked: Option<Position>) -> Position {
        let size = GRID_SIZE as usize;
        let is_free = |state: &GameState, pos: Position| {
            !state.is_occupied_by_snake(pos) && Some(pos) != blocked
        };

        for _ in 0..size * size {
            let x = self.rng.index(size) as i32;
            let y = self.rng.index(size) as i32;
            let pos = Position::new(x, y);
            if is_free(&self.state, pos) {
                return pos;
            }
        }

        let free: Vec<Position> = (0..size * size)
            .map(Position::from_index)
            .filter(|&pos| is_free(&self.state, pos))
            .collect();
        assert!(
            !free.is_empty(),
            "no free cell left on the {size}x{size} board (snake length {})",
            self.state.snake.len()
        );
        free[self.rng.index(free.len())]
    }
}
