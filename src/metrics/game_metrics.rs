use std::time::{Duration, Instant};

use tracing::info;

use crate::game_loop::GameSummary;

/// In-memory statistics for one play session. Nothing here outlives the process.
pub struct GameMetrics {
    pub game_started: Instant,
    pub last_game_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            game_started: Instant::now(),
            last_game_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
        }
    }

    pub fn on_game_start(&mut self) {
        self.game_started = Instant::now();
    }

    pub fn on_game_over(&mut self, summary: &GameSummary) {
        self.last_game_time = self.game_started.elapsed();
        self.games_played += 1;
        self.best_score = self.best_score.max(summary.score);

        info!(
            score = summary.score,
            length = summary.length,
            best_score = self.best_score,
            games_played = self.games_played,
            time = %format_time(self.last_game_time),
            "game finished"
        );
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// mm:ss, minutes unbounded
pub fn format_time(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(score: u32) -> GameSummary {
        GameSummary {
            score,
            length: 5 + score as usize,
            ticks: 10,
            collision: None,
        }
    }

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_time(Duration::from_secs(125)), "02:05");
        assert_eq!(format_time(Duration::ZERO), "00:00");
        assert_eq!(format_time(Duration::from_secs(3661)), "61:01");
    }

    #[test]
    fn test_best_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(&summary(10));
        assert_eq!(metrics.best_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(&summary(5));
        assert_eq!(metrics.best_score, 10);
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(&summary(15));
        assert_eq!(metrics.best_score, 15);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_game_time_measured_from_start() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.on_game_start();
        metrics.on_game_over(&summary(0));

        assert!(metrics.last_game_time < Duration::from_millis(50));
    }
}
