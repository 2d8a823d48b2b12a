use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::direction::Direction;

/// Head of the snake after a reset
pub const START_HEAD: Position = Position { x: 10, y: 15 };

/// Number of segments after a reset
pub const INITIAL_LENGTH: usize = 3;

/// A cell on the game grid. Coordinates are signed so a head that has just
/// left the board is still representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
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

    /// Whether the position lies inside a `grid_size` x `grid_size` board
    pub fn is_within(&self, grid_size: usize) -> bool {
        let size = grid_size as i64;
        (0..size).contains(&(self.x as i64)) && (0..size).contains(&(self.y as i64))
    }
}

/// The player's snake.
///
/// The body is never empty. `direction` is what the last move used;
/// `next_direction` is the buffered request that the next move commits.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    next_direction: Direction,
    spawn_head: Position,
    spawn_length: usize,
}

impl Snake {
    /// Create a right-facing snake with its head at `head`. `reset` returns
    /// the snake to this layout.
    pub fn new(head: Position, length: usize) -> Self {
        let length = length.max(1);
        let mut snake = Self {
            body: VecDeque::with_capacity(length),
            direction: Direction::Right,
            next_direction: Direction::Right,
            spawn_head: head,
            spawn_length: length,
        };
        snake.reset();
        snake
    }

    /// Build a snake from explicit segments, head first. Returns `None` for
    /// an empty body.
    pub fn from_body(body: impl IntoIterator<Item = Position>, direction: Direction) -> Option<Self> {
        let body: VecDeque<Position> = body.into_iter().collect();
        let head = *body.front()?;
        let spawn_length = body.len();

        Some(Self {
            body,
            direction,
            next_direction: direction,
            spawn_head: head,
            spawn_length,
        })
    }

    /// Lay the snake out again from its spawn head, facing right
    pub fn reset(&mut self) {
        let (dx, dy) = Direction::Right.delta();

        self.body.clear();
        self.body
            .extend((0..self.spawn_length as i32).map(|i| self.spawn_head.moved_by(-dx * i, -dy * i)));
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
    }

    /// Buffer a direction change for the next move. Reversals are ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.next_direction = direction;
        }
    }

    /// Commit the buffered direction and shift the whole body one cell
    pub fn move_snake(&mut self) {
        self.direction = self.next_direction;
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.push_front(new_head);
        self.body.pop_back();
    }

    /// Duplicate the tail segment. The copy separates from the original on
    /// the next move.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push_back(tail);
    }

    /// Whether the head overlaps any other segment
    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the body has no segments
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Whether any segment occupies `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new(START_HEAD, INITIAL_LENGTH)
    }
}

/// Type of collision that ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into itself
    SelfCollision,
}
