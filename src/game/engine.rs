use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;
use std::time::Duration;

use super::{
    config::GameConfig,
    direction::Direction,
    food::Food,
    state::{CollisionType, Position, Snake},
};

/// Where a round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// The snake hit a wall or itself
    GameOver,
    /// The snake filled the board and no cell was left for food
    Won,
}

/// What happened during a movement step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Read-only view of the game handed to the renderer
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub body: &'a VecDeque<Position>,
    pub food: Position,
    pub score: u32,
    pub status: GameStatus,
    /// Current direction of travel, for orienting the head
    pub direction: Direction,
    pub grid_size: usize,
}

impl Snapshot<'_> {
    /// True for both terminal states
    pub fn is_game_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }
}

/// The game loop controller.
///
/// `tick` is meant to be called once per rendered frame. Movement is gated by
/// the configured delay, so the snake's speed does not depend on frame rate,
/// and at most one step happens per call however long the gap was.
pub struct Game<R = StdRng> {
    config: GameConfig,
    snake: Snake,
    food: Food,
    score: u32,
    status: GameStatus,
    last_move: Option<Duration>,
    rng: R,
}

impl Game<StdRng> {
    /// Create a game seeded from system entropy
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a game whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Create a game drawing food positions from `rng`. The game is already
    /// started.
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let snake = Snake::new(config.start_head, config.initial_length);

        let mut game = Self {
            config,
            snake,
            food: Food::default(),
            score: 0,
            status: GameStatus::Playing,
            last_move: None,
            rng,
        };
        game.start();
        game
    }

    /// Begin a new round. Works from any state.
    ///
    /// A starting snake that leaves no free cell for food wins on the spot.
    pub fn start(&mut self) {
        self.snake = Snake::new(self.config.start_head, self.config.initial_length);
        let placed = self
            .food
            .place(self.snake.body(), self.config.grid_size, &mut self.rng);
        self.score = 0;
        self.status = match placed {
            Some(_) => GameStatus::Playing,
            None => GameStatus::Won,
        };
    }

    /// Advance the simulation to time `now`.
    ///
    /// Returns `None` when no movement step was due.
    pub fn tick(&mut self, now: Duration) -> Option<StepInfo> {
        if self.status != GameStatus::Playing {
            return None;
        }

        if let Some(last) = self.last_move {
            if now.saturating_sub(last) <= self.config.move_delay() {
                return None;
            }
        }

        self.snake.move_snake();
        self.last_move = Some(now);

        let mut ate_food = false;
        let mut board_full = false;

        if self.snake.head() == self.food.position() {
            self.snake.grow();
            board_full = self
                .food
                .place(self.snake.body(), self.config.grid_size, &mut self.rng)
                .is_none();
            self.score += 1;
            ate_food = true;
        }

        let collision_type = self.check_collision();

        if collision_type.is_some() {
            self.status = GameStatus::GameOver;
        } else if board_full {
            self.status = GameStatus::Won;
        }

        Some(StepInfo {
            ate_food,
            collision_type,
        })
    }

    /// Apply a directional input. Once a round has ended any direction
    /// starts a new one; otherwise it steers the snake.
    pub fn handle_input(&mut self, direction: Direction) {
        match self.status {
            GameStatus::Playing => self.snake.set_direction(direction),
            GameStatus::GameOver | GameStatus::Won => self.start(),
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            body: self.snake.body(),
            food: self.food.position(),
            score: self.score,
            status: self.status,
            direction: self.snake.direction(),
            grid_size: self.config.grid_size,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food.position()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Time of the last movement step, if any
    pub fn last_move(&self) -> Option<Duration> {
        self.last_move
    }

    fn check_collision(&self) -> Option<CollisionType> {
        if !self.snake.head().is_within(self.config.grid_size) {
            return Some(CollisionType::Wall);
        }

        if self.snake.collides_with_self() {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}
