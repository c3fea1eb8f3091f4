use ratatui::style::Color;

use super::point::Point;
use crate::error::{GameError, SurfaceError};
use crate::render::{PixelRect, Surface};

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    Occupied,
    Food,
}

impl CellState {
    pub fn color(&self) -> Color {
        match self {
            CellState::Occupied => Color::Green,
            CellState::Empty => Color::Gray,
            CellState::Food => Color::Red,
        }
    }
}

/// Cell-state array that remembers which cells changed since the last render
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cell_size: u32,
    block_size: u32,
    cells: Vec<CellState>,
    /// Points changed since the last render, in order of first change
    dirty: Vec<Point>,
    /// Per-cell membership flag for `dirty`
    marked: Vec<bool>,
}

impl Grid {
    /// Create an all-empty grid. Every cell starts dirty so the first render
    /// paints the whole board.
    pub fn new(width: usize, height: usize, cell_size: u32, cell_margin: u32) -> Self {
        let mut dirty = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                dirty.push(Point::new(x as i32, y as i32));
            }
        }

        Self {
            width,
            height,
            cell_size,
            block_size: cell_size.saturating_sub(cell_margin),
            cells: vec![CellState::Empty; width * height],
            dirty,
            marked: vec![true; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.is_within(self.width, self.height)
    }

    fn index(&self, point: Point) -> Result<usize, GameError> {
        if !self.contains(point) {
            return Err(GameError::CellOutOfRange {
                x: point.x,
                y: point.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(point.y as usize * self.width + point.x as usize)
    }

    pub fn set_point(&mut self, point: Point, state: CellState) -> Result<(), GameError> {
        let idx = self.index(point)?;
        self.cells[idx] = state;
        if !self.marked[idx] {
            self.marked[idx] = true;
            self.dirty.push(point);
        }
        Ok(())
    }

    pub fn get_point(&self, point: Point) -> Result<CellState, GameError> {
        let idx = self.index(point)?;
        Ok(self.cells[idx])
    }

    /// Points waiting to be repainted
    pub fn dirty_points(&self) -> &[Point] {
        &self.dirty
    }

    /// All cells currently in the `Empty` state, in row-major order
    pub fn empty_cells(&self) -> Vec<Point> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, state)| **state == CellState::Empty)
            .map(|(idx, _)| Point::new((idx % self.width) as i32, (idx / self.width) as i32))
            .collect()
    }

    /// Number of cells in the given state
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|s| **s == state).count()
    }

    /// Pixel square painted for a cell
    pub fn cell_rect(&self, point: Point) -> PixelRect {
        PixelRect::new(
            point.x as u32 * self.cell_size,
            point.y as u32 * self.cell_size,
            self.block_size,
            self.block_size,
        )
    }

    /// Repaint every dirty cell and clear the dirty set.
    ///
    /// Returns the number of cells painted.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<usize, SurfaceError> {
        let painted = self.dirty.len();
        for point in std::mem::take(&mut self.dirty) {
            // Only in-bounds points ever enter the dirty set
            let idx = point.y as usize * self.width + point.x as usize;
            let rect = self.cell_rect(point);
            surface.clear_rect(rect)?;
            surface.fill_rect(rect, self.cells[idx].color())?;
            self.marked[idx] = false;
        }
        Ok(painted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingSurface;

    fn clean_grid(width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height, 10, 1);
        grid.render(&mut RecordingSurface::default()).unwrap();
        grid
    }

    #[test]
    fn test_new_grid_is_empty_and_fully_dirty() {
        let grid = Grid::new(4, 3, 10, 1);
        assert_eq!(grid.count(CellState::Empty), 12);
        assert_eq!(grid.dirty_points().len(), 12);
        assert_eq!(grid.get_point(Point::new(3, 2)).unwrap(), CellState::Empty);
    }

    #[test]
    fn test_set_and_get_point() {
        let mut grid = clean_grid(5, 5);
        grid.set_point(Point::new(2, 3), CellState::Occupied).unwrap();
        assert_eq!(grid.get_point(Point::new(2, 3)).unwrap(), CellState::Occupied);
        assert_eq!(grid.dirty_points(), &[Point::new(2, 3)]);
    }

    #[test]
    fn test_out_of_range_access_fails() {
        let mut grid = clean_grid(5, 5);
        for point in [Point::new(-1, 0), Point::new(5, 0), Point::new(0, 5)] {
            assert!(matches!(
                grid.set_point(point, CellState::Occupied),
                Err(GameError::CellOutOfRange { .. })
            ));
            assert!(grid.get_point(point).is_err());
        }
        assert!(grid.dirty_points().is_empty());
    }

    #[test]
    fn test_render_repaints_exactly_touched_points() {
        let mut grid = clean_grid(6, 6);
        grid.set_point(Point::new(1, 1), CellState::Occupied).unwrap();
        grid.set_point(Point::new(2, 1), CellState::Food).unwrap();
        grid.set_point(Point::new(1, 1), CellState::Empty).unwrap();
        grid.set_point(Point::new(4, 5), CellState::Occupied).unwrap();

        let mut surface = RecordingSurface::default();
        let painted = grid.render(&mut surface).unwrap();

        assert_eq!(painted, 3);
        assert!(grid.dirty_points().is_empty());
        assert_eq!(
            surface.fills,
            vec![
                (grid.cell_rect(Point::new(1, 1)), Color::Gray),
                (grid.cell_rect(Point::new(2, 1)), Color::Red),
                (grid.cell_rect(Point::new(4, 5)), Color::Green),
            ]
        );
        assert_eq!(surface.clears.len(), 3);

        // Nothing changed since, nothing to paint
        let mut surface = RecordingSurface::default();
        assert_eq!(grid.render(&mut surface).unwrap(), 0);
        assert!(surface.fills.is_empty());
    }

    #[test]
    fn test_cell_rect_uses_size_and_margin() {
        let grid = Grid::new(5, 5, 10, 1);
        assert_eq!(grid.cell_rect(Point::new(2, 3)), PixelRect::new(20, 30, 9, 9));
    }

    #[test]
    fn test_empty_cells_skip_used_cells() {
        let mut grid = clean_grid(2, 2);
        grid.set_point(Point::new(0, 0), CellState::Occupied).unwrap();
        grid.set_point(Point::new(1, 1), CellState::Food).unwrap();
        assert_eq!(grid.empty_cells(), vec![Point::new(1, 0), Point::new(0, 1)]);
    }
}
