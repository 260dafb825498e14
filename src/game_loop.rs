//! The fixed-rate loop that owns a game
//!
//! A [`GameLoop`] is created in the `Ready` state. [`GameLoop::start`] places the
//! apple, moves the loop onto its own `game-loop` thread and hands back a
//! [`GameHandle`]. From then on the loop thread is the only writer of game
//! state; the handle can only steer through [`DirectionControl`] or ask the loop
//! to quit.
//!
//! # Example
//!
//! ```rust,ignore
//! use grid_snake::game::{Direction, GameConfig};
//! use grid_snake::game_loop::GameLoop;
//! use grid_snake::render::RecordingSurface;
//!
//! let handle = GameLoop::new(GameConfig::default()).start(RecordingSurface::new())?;
//! handle.set_direction(Direction::Down);
//! let (summary, _surface) = handle.join()?;
//! println!("final score {}", summary.score);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::GameError;
use crate::game::{
    CollisionType, Direction, DirectionControl, GameConfig, GameEngine, GameState, TickOutcome,
};
use crate::render::{Renderer, Surface};

/// What a finished game looked like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub length: usize,
    pub ticks: u32,
    /// None when the loop was asked to quit before the snake crashed
    pub collision: Option<CollisionType>,
}

pub struct GameLoop {
    engine: GameEngine,
    state: GameState,
    renderer: Renderer,
    control: Arc<DirectionControl>,
    tick_delay: Duration,
    collision: Option<CollisionType>,
}

impl GameLoop {
    pub fn new(config: GameConfig) -> Self {
        let tick_delay = config.tick_delay();
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        let control = Arc::new(DirectionControl::new(state.heading));

        Self {
            engine,
            state,
            renderer: Renderer::new(),
            control,
            tick_delay,
            collision: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Shared handle for steering from another thread
    pub fn control(&self) -> Arc<DirectionControl> {
        Arc::clone(&self.control)
    }

    /// Request a turn; reversing the current heading is ignored
    pub fn set_direction(&self, direction: Direction) -> bool {
        self.control.set_direction(direction)
    }

    /// Place the apple and enter `Running` without spawning the loop thread
    pub fn begin(&mut self) {
        self.engine.start(&mut self.state);
        info!(
            apple_x = self.state.apple.x,
            apple_y = self.state.apple.y,
            "game started"
        );
    }

    /// Advance the game by one tick using the latest requested direction
    pub fn tick(&mut self) -> TickOutcome {
        let was_running = self.state.is_running();
        let outcome = self.engine.tick(&mut self.state, self.control.requested());
        self.control.publish_heading(self.state.heading);

        if outcome.ate_apple {
            debug!(
                score = self.state.score,
                length = self.state.snake.len(),
                "apple eaten"
            );
        }
        if was_running && outcome.collision_type.is_some() {
            self.collision = outcome.collision_type;
            info!(
                score = self.state.score,
                ticks = self.state.ticks,
                collision = ?outcome.collision_type,
                "game over"
            );
        }

        outcome
    }

    /// Draw the current state; skipped while the surface cannot take a frame
    pub fn render(&self, surface: &mut dyn Surface) -> Result<(), GameError> {
        if !surface.is_valid() {
            return Ok(());
        }
        surface.draw(&mut |canvas| self.renderer.render(canvas, &self.state))
    }

    /// Start the game and run it on a dedicated thread that owns `surface`
    pub fn start<S: Surface + 'static>(mut self, surface: S) -> Result<GameHandle<S>, GameError> {
        self.begin();

        let control = self.control();
        let quit = Arc::new(AtomicBool::new(false));
        let loop_quit = Arc::clone(&quit);

        let thread = thread::Builder::new()
            .name("game-loop".to_string())
            .spawn(move || {
                let mut surface = surface;
                self.run(&mut surface, &loop_quit);
                (self.summary(), surface)
            })
            .map_err(GameError::Spawn)?;

        Ok(GameHandle {
            control,
            quit,
            thread,
        })
    }

    fn run(&mut self, surface: &mut dyn Surface, quit: &AtomicBool) {
        while self.state.is_running() && !quit.load(Ordering::Acquire) {
            let started = Instant::now();

            self.tick();
            if let Err(err) = self.render(surface) {
                warn!(error = %err, "frame dropped");
            }

            let elapsed = started.elapsed();
            if elapsed >= self.tick_delay {
                warn!(?elapsed, "tick overran its period");
                continue;
            }

            self.sleep_until(started + self.tick_delay, quit);
        }
    }

    /// Park until `deadline`, returning early only when asked to quit
    fn sleep_until(&self, deadline: Instant, quit: &AtomicBool) {
        loop {
            if quit.load(Ordering::Acquire) {
                debug!("tick sleep interrupted");
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            // Spurious wake-ups fall through to another park
            thread::park_timeout(deadline - now);
        }
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.state.score,
            length: self.state.snake.len(),
            ticks: self.state.ticks,
            collision: self.collision,
        }
    }
}

/// Handle to a game running on its loop thread
pub struct GameHandle<S> {
    control: Arc<DirectionControl>,
    quit: Arc<AtomicBool>,
    thread: JoinHandle<(GameSummary, S)>,
}

impl<S> GameHandle<S> {
    pub fn set_direction(&self, direction: Direction) -> bool {
        self.control.set_direction(direction)
    }

    /// Whether the loop thread has exited (game over or quit)
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Ask the loop to exit and wake it if it is sleeping between ticks
    pub fn stop(&self) {
        self.quit.store(true, Ordering::Release);
        self.thread.thread().unpark();
    }

    /// Wait for the loop thread and take back the surface
    pub fn join(self) -> Result<(GameSummary, S), GameError> {
        self.thread.join().map_err(|_| GameError::LoopPanicked)
    }
}
