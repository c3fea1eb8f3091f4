use std::io::Stderr;

use ratatui::{Terminal, backend::CrosstermBackend, style::Color};

use super::canvas::PixelCanvas;
use super::renderer::{Hud, Renderer};
use super::surface::{PixelRect, Scoreboard, Surface};
use crate::error::SurfaceError;

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Terminal-backed view: paints into an off-screen canvas and draws a full
/// ratatui frame on `present`.
pub struct TerminalView {
    terminal: CrosstermTerminal,
    canvas: PixelCanvas,
    hud: Hud,
    renderer: Renderer,
}

impl TerminalView {
    pub fn new(terminal: CrosstermTerminal, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            terminal,
            canvas: PixelCanvas::new(pixel_width, pixel_height),
            hud: Hud::new(0),
            renderer: Renderer::new(),
        }
    }

    pub fn terminal_mut(&mut self) -> &mut CrosstermTerminal {
        &mut self.terminal
    }

    /// Start a new session's HUD, carrying over the best score
    pub fn start_session(&mut self, best_score: u32) {
        self.hud = Hud::new(best_score);
    }

    pub fn draw(&mut self) -> Result<(), SurfaceError> {
        let Self {
            terminal,
            canvas,
            hud,
            renderer,
        } = self;
        terminal.draw(|frame| renderer.render(frame, canvas, hud))?;
        Ok(())
    }
}

impl Surface for TerminalView {
    fn clear_rect(&mut self, rect: PixelRect) -> Result<(), SurfaceError> {
        self.canvas.clear_rect(rect)
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) -> Result<(), SurfaceError> {
        self.canvas.fill_rect(rect, color)
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.draw()
    }
}

impl Scoreboard for TerminalView {
    fn show_score(&mut self, score: u32) {
        self.hud.score = score;
        self.hud.best_score = self.hud.best_score.max(score);
    }

    fn show_message(&mut self, message: &str) {
        self.hud.message = Some(message.to_string());
    }

    fn clear_message(&mut self) {
        self.hud.message = None;
    }
}
