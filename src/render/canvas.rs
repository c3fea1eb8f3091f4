use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};

use super::surface::{PixelRect, Surface};
use crate::error::SurfaceError;

/// Off-screen pixel buffer.
///
/// Drawn into the terminal with upper-half blocks, so one terminal row shows
/// two pixel rows and one column shows one pixel.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::Reset; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Terminal cells needed to show the whole canvas
    pub fn cell_size(&self) -> (u16, u16) {
        let cols = self.width.min(u16::MAX as u32) as u16;
        let rows = self.height.div_ceil(2).min(u16::MAX as u32) as u16;
        (cols, rows)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    fn paint(&mut self, rect: PixelRect, color: Color) -> Result<(), SurfaceError> {
        let right = rect.x.saturating_add(rect.width);
        let bottom = rect.y.saturating_add(rect.height);
        if right > self.width || bottom > self.height {
            return Err(SurfaceError::Unavailable(format!(
                "rect {}x{} at ({}, {}) exceeds {}x{} canvas",
                rect.width, rect.height, rect.x, rect.y, self.width, self.height
            )));
        }

        for y in rect.y..bottom {
            let row = (y * self.width) as usize;
            self.pixels[row + rect.x as usize..row + right as usize].fill(color);
        }
        Ok(())
    }
}

impl Surface for PixelCanvas {
    fn clear_rect(&mut self, rect: PixelRect) -> Result<(), SurfaceError> {
        self.paint(rect, Color::Reset)
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) -> Result<(), SurfaceError> {
        self.paint(rect, color)
    }
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (cols, rows) = self.cell_size();
        for row in 0..rows.min(area.height) {
            for col in 0..cols.min(area.width) {
                let top = self.pixel(col as u32, row as u32 * 2).unwrap_or(Color::Reset);
                let bottom = self
                    .pixel(col as u32, row as u32 * 2 + 1)
                    .unwrap_or(Color::Reset);
                if let Some(cell) = buf.cell_mut(Position::new(area.x + col, area.y + row)) {
                    cell.set_symbol("▀").set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}
