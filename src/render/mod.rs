pub mod canvas;
pub mod renderer;
pub mod surface;
pub mod terminal;

pub use canvas::PixelCanvas;
pub use renderer::{Hud, Renderer};
pub use surface::{PixelRect, Scoreboard, Surface};
pub use terminal::TerminalView;

#[cfg(test)]
pub mod testing {
    use ratatui::style::Color;

    use super::{PixelRect, Scoreboard, Surface};
    use crate::error::SurfaceError;

    /// Surface and scoreboard that remember every call
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub clears: Vec<PixelRect>,
        pub fills: Vec<(PixelRect, Color)>,
        pub presents: usize,
        pub scores: Vec<u32>,
        pub message: Option<String>,
        /// Fail every fill once this many have succeeded
        pub fail_after: Option<usize>,
    }

    impl Surface for RecordingSurface {
        fn clear_rect(&mut self, rect: PixelRect) -> Result<(), SurfaceError> {
            self.clears.push(rect);
            Ok(())
        }

        fn fill_rect(&mut self, rect: PixelRect, color: Color) -> Result<(), SurfaceError> {
            if self.fail_after.is_some_and(|limit| self.fills.len() >= limit) {
                return Err(SurfaceError::Unavailable("surface detached".to_string()));
            }
            self.fills.push((rect, color));
            Ok(())
        }

        fn present(&mut self) -> Result<(), SurfaceError> {
            self.presents += 1;
            Ok(())
        }
    }

    impl Scoreboard for RecordingSurface {
        fn show_score(&mut self, score: u32) {
            self.scores.push(score);
        }

        fn show_message(&mut self, message: &str) {
            self.message = Some(message.to_string());
        }

        fn clear_message(&mut self) {
            self.message = None;
        }
    }
}
