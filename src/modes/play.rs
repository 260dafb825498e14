use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{Stream, StreamExt};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

use crate::game::GameConfig;
use crate::game_loop::{GameHandle, GameLoop};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Surface, TerminalSurface};

/// How often the event loop checks whether the game thread has finished
const FINISH_POLL: Duration = Duration::from_millis(50);

/// Where the surface currently lives
enum Session<S> {
    /// Owned by a running loop thread
    Playing(GameHandle<S>),
    /// Back on this side, showing the game over screen
    Over(S),
}

/// Keyboard play on the terminal, with restart after game over
pub struct PlayMode {
    config: GameConfig,
    metrics: GameMetrics,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let _guard = TerminalGuard::enter()?;

        let backend = CrosstermBackend::new(stderr());
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        self.run_session(TerminalSurface::new(terminal), EventStream::new())
            .await?;

        info!(
            games_played = self.metrics.games_played,
            best_score = self.metrics.best_score,
            "session ended"
        );
        Ok(())
    }

    /// Drive games on `surface` until quit, returning the surface afterwards
    pub async fn run_session<S, E>(&mut self, surface: S, mut events: E) -> Result<S>
    where
        S: Surface + 'static,
        E: Stream<Item = io::Result<Event>> + Unpin,
    {
        let mut session = Session::Playing(self.start_game(surface)?);
        let mut finish_timer = interval(FINISH_POLL);

        while !self.should_quit {
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => session = self.handle_event(event, session)?,
                        Some(Err(err)) => {
                            self.finish(session)?;
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                _ = finish_timer.tick() => {
                    session = self.collect_finished(session)?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }
        }

        self.finish(session)
    }

    fn start_game<S: Surface + 'static>(&mut self, surface: S) -> Result<GameHandle<S>> {
        let mut config = self.config.clone();
        // Successive games in a seeded session still get different apples
        config.seed = config
            .seed
            .map(|seed| seed.wrapping_add(self.metrics.games_played as u64));

        self.metrics.on_game_start();
        GameLoop::new(config)
            .start(surface)
            .context("Failed to start game loop")
    }

    fn handle_event<S: Surface + 'static>(
        &mut self,
        event: Event,
        session: Session<S>,
    ) -> Result<Session<S>> {
        let Event::Key(key) = event else {
            return Ok(session);
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return Ok(session);
        }

        match (self.input_handler.handle_key_event(key), session) {
            (KeyAction::Steer(direction), Session::Playing(handle)) => {
                handle.set_direction(direction);
                Ok(Session::Playing(handle))
            }
            (KeyAction::Restart, Session::Over(surface)) => {
                Ok(Session::Playing(self.start_game(surface)?))
            }
            (KeyAction::Quit, session) => {
                self.should_quit = true;
                Ok(session)
            }
            (_, session) => Ok(session),
        }
    }

    /// Take the surface back once the loop thread has exited on its own
    fn collect_finished<S>(&mut self, session: Session<S>) -> Result<Session<S>> {
        match session {
            Session::Playing(handle) if handle.is_finished() => {
                let (summary, surface) = handle.join()?;
                self.metrics.on_game_over(&summary);
                Ok(Session::Over(surface))
            }
            session => Ok(session),
        }
    }

    fn finish<S>(&mut self, session: Session<S>) -> Result<S> {
        match session {
            Session::Playing(handle) => {
                handle.stop();
                let (summary, surface) = handle.join()?;
                // A game abandoned mid-play is not a game over
                if summary.collision.is_some() {
                    self.metrics.on_game_over(&summary);
                }
                Ok(surface)
            }
            Session::Over(surface) => Ok(surface),
        }
    }
}

/// Raw mode and the alternate screen for as long as it lives
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(stderr(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Nothing left to report to if restoring fails
        let _ = disable_raw_mode();
        let _ = execute!(stderr(), LeaveAlternateScreen, Show);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crate::render::{DrawCommand, RecordingSurface};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use futures::stream;

    fn fast_config() -> GameConfig {
        GameConfig {
            tick_delay_ms: 1,
            seed: Some(3),
            ..Default::default()
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn wait_until_over(
        mode: &mut PlayMode,
        mut session: Session<RecordingSurface>,
    ) -> RecordingSurface {
        for _ in 0..500 {
            session = mode.collect_finished(session).unwrap();
            if let Session::Over(surface) = session {
                return surface;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("game never finished");
    }

    #[test]
    fn test_steer_reaches_running_game() {
        let mut mode = PlayMode::new(fast_config());
        let handle = mode.start_game(RecordingSurface::new()).unwrap();

        let session = mode
            .handle_event(key(KeyCode::Up), Session::Playing(handle))
            .unwrap();
        let surface = wait_until_over(&mut mode, session);

        // Heading right the whole way takes fifteen ticks to reach the wall
        assert!(surface.frame_count() < 15);
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut mode = PlayMode::new(fast_config());
        let handle = mode.start_game(RecordingSurface::new()).unwrap();
        handle.set_direction(Direction::Up);
        let surface = wait_until_over(&mut mode, Session::Playing(handle));

        let session = mode
            .handle_event(key(KeyCode::Char('r')), Session::Over(surface))
            .unwrap();
        assert!(matches!(session, Session::Playing(_)));

        // A second restart while playing is ignored
        let session = mode.handle_event(key(KeyCode::Char('r')), session).unwrap();
        mode.finish(session).unwrap();

        // Only the crashed game counts; the restarted one was quit mid-play
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_quitting_mid_game_is_not_counted() {
        let mut mode = PlayMode::new(GameConfig {
            tick_delay_ms: 60_000,
            ..fast_config()
        });
        let handle = mode.start_game(RecordingSurface::new()).unwrap();

        mode.finish(Session::Playing(handle)).unwrap();

        assert_eq!(mode.metrics.games_played, 0);
        assert_eq!(mode.metrics.best_score, 0);
    }

    #[test]
    fn test_quit_key_sets_flag() {
        let mut mode = PlayMode::new(fast_config());
        let session = Session::Over(RecordingSurface::new());

        let session = mode.handle_event(key(KeyCode::Esc), session).unwrap();

        assert!(mode.should_quit);
        assert!(matches!(session, Session::Over(_)));
    }

    #[tokio::test]
    async fn test_session_plays_until_quit() {
        let mut mode = PlayMode::new(fast_config());
        let events = Box::pin(stream::once(async {
            tokio::time::sleep(Duration::from_millis(300)).await;
            Ok::<_, io::Error>(key(KeyCode::Char('q')))
        }));

        let surface = mode
            .run_session(RecordingSurface::new(), events)
            .await
            .unwrap();

        assert_eq!(mode.metrics.games_played, 1);
        let last = surface.last_frame().unwrap();
        assert!(last.iter().any(
            |cmd| matches!(cmd, DrawCommand::Text { text, .. } if text == "Game Over")
        ));
    }
}
