use crate::error::GameError;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
}

/// Drawing primitives available while a frame is held. Coordinates are board
/// pixels; `draw_text` positions the baseline at `y`.
pub trait Canvas {
    /// Fill the whole frame
    fn draw_color(&mut self, color: Rgb);

    /// Fill the rectangle `[left, right) x [top, bottom)`
    fn draw_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32, color: Rgb);

    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: u16, color: Rgb);
}

/// Something the loop can present frames on
pub trait Surface: Send {
    /// Whether a frame can be drawn right now
    fn is_valid(&self) -> bool {
        true
    }

    /// Hold a frame exclusively for the duration of `paint`, then present it.
    /// The frame is released even when presenting fails.
    fn draw(&mut self, paint: &mut dyn FnMut(&mut dyn Canvas)) -> Result<(), GameError>;
}
