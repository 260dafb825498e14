use std::io;

/// Errors raised by the game loop and its drawing surfaces
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A frame could not be drawn or presented
    #[error("failed to draw frame: {0}")]
    Surface(#[source] io::Error),

    /// The loop thread could not be spawned
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[source] io::Error),

    /// The loop thread panicked before finishing
    #[error("game loop thread panicked")]
    LoopPanicked,
}
