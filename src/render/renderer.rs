use super::surface::{Canvas, Rgb};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, GameState, Position, RunState, UNIT_SIZE};

/// Color of every body segment behind the head
pub const BODY_COLOR: Rgb = Rgb(33, 24, 122);

const SCORE_TEXT_SIZE: u16 = 50;
const GAME_OVER_TEXT_SIZE: u16 = 75;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the board, or the game over screen once stopped
    pub fn render(&self, canvas: &mut dyn Canvas, state: &GameState) {
        canvas.draw_color(Rgb::BLACK);

        match state.run_state {
            RunState::Stopped => self.render_game_over(canvas, state),
            RunState::Ready | RunState::Running => self.render_board(canvas, state),
        }
    }

    fn render_board(&self, canvas: &mut dyn Canvas, state: &GameState) {
        fill_cell(canvas, state.apple, Rgb::RED);

        for (i, segment) in state.snake.segments().enumerate() {
            let color = if i == 0 { Rgb::GREEN } else { BODY_COLOR };
            fill_cell(canvas, *segment, color);
        }

        canvas.draw_text(
            &format!("Score: {}", state.score),
            BOARD_WIDTH / 2 - 150,
            BOARD_HEIGHT / 2 - 250,
            SCORE_TEXT_SIZE,
            Rgb::WHITE,
        );
    }

    fn render_game_over(&self, canvas: &mut dyn Canvas, state: &GameState) {
        canvas.draw_text(
            "Game Over",
            BOARD_WIDTH / 2 - 150,
            BOARD_HEIGHT / 2,
            GAME_OVER_TEXT_SIZE,
            Rgb::WHITE,
        );
        canvas.draw_text(
            &format!("Score: {}", state.score),
            BOARD_WIDTH / 2 - 100,
            BOARD_HEIGHT / 2 + 75,
            SCORE_TEXT_SIZE,
            Rgb::WHITE,
        );
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn fill_cell(canvas: &mut dyn Canvas, cell: Position, color: Rgb) {
    canvas.draw_rect(cell.x, cell.y, cell.x + UNIT_SIZE, cell.y + UNIT_SIZE, color);
}
