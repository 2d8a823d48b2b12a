//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Time is passed in by the caller and randomness is injected, so every rule can be
//! driven deterministically from tests.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig, GRID_SIZE, MOVE_DELAY_MS};
pub use direction::Direction;
pub use engine::{Game, GameStatus, Snapshot, StepInfo};
pub use food::Food;
pub use state::{CollisionType, Position, Snake};
