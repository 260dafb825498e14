use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::surface::{Canvas, Rgb, Surface};
use crate::error::GameError;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};

/// Board pixels covered by one terminal column
pub const CELL_WIDTH_PX: i32 = 20;
/// Board pixels covered by one terminal row
pub const CELL_HEIGHT_PX: i32 = 40;

const BOARD_COLUMNS: u16 = (BOARD_WIDTH / CELL_WIDTH_PX) as u16;
const BOARD_ROWS: u16 = (BOARD_HEIGHT / CELL_HEIGHT_PX) as u16;

/// Presents frames on a ratatui terminal, board centered and framed
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend + Send> Surface for TerminalSurface<B> {
    fn is_valid(&self) -> bool {
        self.terminal
            .size()
            .map(|size| size.width > 0 && size.height > 0)
            .unwrap_or(false)
    }

    fn draw(&mut self, paint: &mut dyn FnMut(&mut dyn Canvas)) -> Result<(), GameError> {
        self.terminal
            .draw(|frame| {
                let area = frame.area();
                let board = board_area(area);

                {
                    let mut canvas = BufferCanvas::new(frame.buffer_mut(), board);
                    paint(&mut canvas);
                }

                let border = Rect {
                    x: board.x.saturating_sub(1),
                    y: board.y.saturating_sub(1),
                    width: board.width + 2,
                    height: board.height + 2,
                }
                .intersection(area);
                frame.render_widget(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .border_style(Style::default().fg(Color::White))
                        .title(" Snake "),
                    border,
                );

                let footer_y = border.y + border.height;
                if footer_y < area.y + area.height {
                    let footer = Rect {
                        x: area.x,
                        y: footer_y,
                        width: area.width,
                        height: 1,
                    };
                    frame.render_widget(controls(), footer);
                }
            })
            .map(|_| ())
            .map_err(GameError::Surface)
    }
}

/// Center the board inside `area`, clipped when the terminal is too small
fn board_area(area: Rect) -> Rect {
    let width = BOARD_COLUMNS.min(area.width);
    let height = BOARD_ROWS.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn controls() -> Paragraph<'static> {
    let text = vec![Line::from(vec![
        Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
        Span::raw(" or "),
        Span::styled("WASD", Style::default().fg(Color::Cyan)),
        Span::raw(" to move | "),
        Span::styled("R", Style::default().fg(Color::Green)),
        Span::raw(" to restart | "),
        Span::styled("Q", Style::default().fg(Color::Red)),
        Span::raw(" to quit"),
    ])];

    Paragraph::new(text).alignment(Alignment::Center)
}

/// Maps board pixels onto terminal cells of a buffer region
pub struct BufferCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> BufferCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buf.area);
        Self { buf, area }
    }

    /// Terminal column span covering pixels `[from, to)`, clipped to the area
    fn columns(&self, from: i32, to: i32) -> (u16, u16) {
        clip_span(from, to, CELL_WIDTH_PX, self.area.width)
    }

    fn rows(&self, from: i32, to: i32) -> (u16, u16) {
        clip_span(from, to, CELL_HEIGHT_PX, self.area.height)
    }
}

fn clip_span(from: i32, to: i32, cell_px: i32, cells: u16) -> (u16, u16) {
    let start = from.div_euclid(cell_px).clamp(0, cells as i32);
    let end = (to + cell_px - 1).div_euclid(cell_px).clamp(0, cells as i32);
    (start as u16, end.max(start) as u16)
}

fn to_color(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

impl Canvas for BufferCanvas<'_> {
    fn draw_color(&mut self, color: Rgb) {
        let area = self.area;
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_bg(to_color(color));
                }
            }
        }
    }

    fn draw_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32, color: Rgb) {
        let (x0, x1) = self.columns(left, right);
        let (y0, y1) = self.rows(top, bottom);
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(cell) = self.buf.cell_mut((self.area.x + x, self.area.y + y)) {
                    cell.set_char(' ').set_bg(to_color(color));
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: u16, color: Rgb) {
        // Terminal text has one size; the baseline row holds the text
        if x < 0 || y < 0 {
            return;
        }
        let column = (x / CELL_WIDTH_PX) as u16;
        let row = (y / CELL_HEIGHT_PX) as u16;
        if column >= self.area.width || row >= self.area.height {
            return;
        }

        let mut style = Style::default().fg(to_color(color));
        if size >= 75 {
            style = style.add_modifier(Modifier::BOLD);
        }
        let max_width = (self.area.width - column) as usize;
        self.buf.set_stringn(
            self.area.x + column,
            self.area.y + row,
            text,
            max_width,
            style,
        );
    }
}
