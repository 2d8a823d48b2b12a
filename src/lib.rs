//! Grid Snake - a terminal Snake game
//!
//! This library provides:
//! - Core game logic with a fixed-timestep controller (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Per-session stats (metrics module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
