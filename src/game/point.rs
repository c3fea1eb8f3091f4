use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A cell coordinate on the game grid.
///
/// Points are plain values: they may lie outside the grid (a head that just
/// left the board), only grid access is bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move point by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move point one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check if the point lies within `[0, width) x [0, height)`
    pub fn is_within(&self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < width && (self.y as usize) < height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_movement() {
        let p = Point::new(5, 5);
        assert_eq!(p.moved_by(1, 0), Point::new(6, 5));
        assert_eq!(p.moved_by(-1, 0), Point::new(4, 5));
        assert_eq!(p.moved_in_direction(Direction::Down), Point::new(5, 6));
        assert_eq!(p.moved_in_direction(Direction::Up), Point::new(5, 4));
    }

    #[test]
    fn test_is_within() {
        assert!(Point::new(0, 0).is_within(20, 10));
        assert!(Point::new(19, 9).is_within(20, 10));
        assert!(!Point::new(-1, 0).is_within(20, 10));
        assert!(!Point::new(0, -1).is_within(20, 10));
        assert!(!Point::new(20, 0).is_within(20, 10));
        assert!(!Point::new(0, 10).is_within(20, 10));
    }
}
