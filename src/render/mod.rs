//! Drawing surfaces and the renderer that paints the game onto them

pub mod recording;
pub mod renderer;
pub mod surface;
pub mod terminal;

pub use recording::{DrawCommand, RecordingSurface};
pub use renderer::Renderer;
pub use surface::{Canvas, Rgb, Surface};
pub use terminal::{BufferCanvas, TerminalSurface};
