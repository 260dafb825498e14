//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The loop thread drives it through [`GameEngine::tick`]; input reaches it through
//! [`DirectionControl`].

pub mod action;
pub mod config;
pub mod control;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH, GameConfig, UNIT_SIZE};
pub use control::DirectionControl;
pub use engine::{GameEngine, TickOutcome};
pub use state::{CollisionType, GameState, Position, RunState, Snake};
