use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::state::{Position, INITIAL_LENGTH, START_HEAD};

/// Cells along each side of the board
pub const GRID_SIZE: usize = 30;

/// Minimum time between two movement steps
pub const MOVE_DELAY_MS: u64 = 90;

/// Problems found when validating a [`GameConfig`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("starting segment ({x}, {y}) lies outside a {grid_size}x{grid_size} grid")]
    StartOutOfBounds { x: i32, y: i32, grid_size: usize },
    #[error("a snake of length {length} leaves no room for food on a {grid_size}x{grid_size} grid")]
    NoRoomForFood { length: usize, grid_size: usize },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width and height of the square grid
    pub grid_size: usize,
    /// Minimum milliseconds between movement steps
    pub move_delay_ms: u64,
    /// Head position after a reset
    pub start_head: Position,
    /// Snake length after a reset
    pub initial_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            move_delay_ms: MOVE_DELAY_MS,
            start_head: START_HEAD,
            initial_length: INITIAL_LENGTH,
        }
    }
}

impl GameConfig {
    /// Create a small board for testing; the snake starts at (2, 2)
    pub fn small() -> Self {
        Self {
            grid_size: 10,
            start_head: Position::new(2, 2),
            ..Default::default()
        }
    }

    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    /// Check that a freshly reset snake fits on the board with space left
    /// over for food
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.initial_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        // The body trails to the left of the head
        let tail = self
            .start_head
            .moved_by(-(self.initial_length as i32 - 1), 0);
        for pos in [self.start_head, tail] {
            if !pos.is_within(self.grid_size) {
                return Err(ConfigError::StartOutOfBounds {
                    x: pos.x,
                    y: pos.y,
                    grid_size: self.grid_size,
                });
            }
        }

        if self.initial_length >= self.grid_size * self.grid_size {
            return Err(ConfigError::NoRoomForFood {
                length: self.initial_length,
                grid_size: self.grid_size,
            });
        }

        Ok(())
    }
}
