use std::collections::VecDeque;

use super::action::Direction;
use super::config::{BOARD_HEIGHT, BOARD_WIDTH, UNIT_SIZE};

/// A position on the board, in pixels (always a multiple of the grid unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

    /// Move position one grid unit in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * UNIT_SIZE, dy * UNIT_SIZE)
    }
}

/// The snake in the game
///
/// The snake tracks `len() + 1` cells with the head at the front. The first
/// `len()` cells are drawn; the last one is the cell the tail left on the
/// previous move, which becomes a real segment when the snake grows.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    cells: VecDeque<Position>,
    capacity: usize,
}

impl Snake {
    /// Create a snake of `length` segments, all stacked on `head`
    pub fn new(head: Position, length: usize, capacity: usize) -> Self {
        let tracked = (length + 1).min(capacity).max(2);
        let mut cells = VecDeque::with_capacity(capacity);
        cells.extend(std::iter::repeat(head).take(tracked));
        Self { cells, capacity }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.cells[0]
    }

    /// Drawn segments, head first
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter().take(self.len())
    }

    /// Every tracked cell behind the head, including the trailing one
    pub fn body(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter().skip(1)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body().any(|cell| *cell == pos)
    }

    /// Shift every cell toward the tail and step the head one unit
    pub fn advance(&mut self, direction: Direction) {
        let new_head = self.head().moved_in_direction(direction);
        self.cells.pop_back();
        self.cells.push_front(new_head);
    }

    /// Turn the trailing cell into a segment. Returns false once the snake
    /// already covers every cell of the board.
    pub fn grow(&mut self) -> bool {
        if self.cells.len() >= self.capacity {
            return false;
        }
        if let Some(&trailing) = self.cells.back() {
            self.cells.push_back(trailing);
        }
        true
    }

    /// Number of drawn segments
    pub fn len(&self) -> usize {
        self.cells.len() - 1
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Created, apple not placed yet
    Ready,
    Running,
    /// Terminal
    Stopped,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Position,
    /// Direction applied on the most recent tick
    pub heading: Direction,
    pub score: u32,
    pub ticks: u32,
    pub run_state: RunState,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, apple: Position, heading: Direction) -> Self {
        Self {
            snake,
            apple,
            heading,
            score: 0,
            ticks: 0,
            run_state: RunState::Ready,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Check if a position is within the board bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < BOARD_WIDTH && pos.y >= 0 && pos.y < BOARD_HEIGHT
    }
}
