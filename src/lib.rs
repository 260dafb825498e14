//! Grid Snake - a single-screen Snake game driven by a fixed-tick loop thread
//!
//! This library provides:
//! - Core game logic (game module)
//! - The loop thread that ticks and renders a game (game_loop module)
//! - Drawing surfaces: terminal and headless recording (render module)
//! - Keyboard mapping (input module) and the terminal play mode (modes module)

pub mod error;
pub mod game;
pub mod game_loop;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;

pub use error::GameError;
pub use game_loop::{GameHandle, GameLoop, GameSummary};
