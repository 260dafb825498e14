use std::sync::{Arc, Mutex, PoisonError};

use super::surface::{Canvas, Rgb, Surface};
use crate::error::GameError;

/// One primitive issued on a canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Clear(Rgb),
    Rect {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        color: Rgb,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        size: u16,
        color: Rgb,
    },
}

#[derive(Default)]
struct CommandCanvas {
    commands: Vec<DrawCommand>,
}

impl Canvas for CommandCanvas {
    fn draw_color(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32, color: Rgb) {
        self.commands.push(DrawCommand::Rect {
            left,
            top,
            right,
            bottom,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: u16, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }
}

/// Headless surface that keeps every presented frame as a list of commands.
///
/// Clones share the same frame log, so one clone can be handed to the loop
/// thread while another is inspected.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    frames: Arc<Mutex<Vec<Vec<DrawCommand>>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last_frame(&self) -> Option<Vec<DrawCommand>> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Surface for RecordingSurface {
    fn draw(&mut self, paint: &mut dyn FnMut(&mut dyn Canvas)) -> Result<(), GameError> {
        let mut canvas = CommandCanvas::default();
        paint(&mut canvas);
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(canvas.commands);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_frames() {
        let surface = RecordingSurface::new();
        let mut writer = surface.clone();

        writer
            .draw(&mut |canvas| {
                canvas.draw_color(Rgb::BLACK);
                canvas.draw_text("hi", 1, 2, 10, Rgb::WHITE);
            })
            .unwrap();

        assert_eq!(surface.frame_count(), 1);
        assert_eq!(
            surface.last_frame(),
            Some(vec![
                DrawCommand::Clear(Rgb::BLACK),
                DrawCommand::Text {
                    text: "hi".to_string(),
                    x: 1,
                    y: 2,
                    size: 10,
                    color: Rgb::WHITE,
                },
            ])
        );
    }
}
