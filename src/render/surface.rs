use ratatui::style::Color;

use crate::error::SurfaceError;

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Drawing context the grid paints into.
///
/// The core never touches pixels itself; it only asks the surface to clear and
/// fill rectangles and to present the finished frame.
pub trait Surface {
    fn clear_rect(&mut self, rect: PixelRect) -> Result<(), SurfaceError>;

    fn fill_rect(&mut self, rect: PixelRect, color: Color) -> Result<(), SurfaceError>;

    /// Make everything painted so far visible
    fn present(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }
}

/// Textual outputs: the running score and the end-of-game message
pub trait Scoreboard {
    fn show_score(&mut self, score: u32);

    fn show_message(&mut self, message: &str);

    fn clear_message(&mut self);
}
