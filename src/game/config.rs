use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::point::Point;
use crate::error::GameError;

/// Configuration for the game, fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Pixels between the origins of two neighbouring cells
    pub cell_size: u32,
    /// Pixels left blank between neighbouring cells
    pub cell_margin: u32,
    /// Time between two game ticks, in milliseconds
    pub tick_delay_ms: u64,
    /// Time between two food spawn attempts, in milliseconds
    pub food_interval_ms: u64,
    /// Initial head position
    pub start: Point,
    /// Initial heading
    pub start_direction: Direction,
    /// Initial number of segments, laid out behind the head
    pub initial_snake_length: usize,
    /// Seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 32,
            grid_height: 24,
            cell_size: 2,
            cell_margin: 0,
            tick_delay_ms: 75,
            food_interval_ms: 1000,
            start: Point::new(10, 10),
            start_direction: Direction::Right,
            initial_snake_length: 1,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    pub fn tick_delay(&self) -> Duration {
        Duration::from_millis(self.tick_delay_ms)
    }

    pub fn food_interval(&self) -> Duration {
        Duration::from_millis(self.food_interval_ms)
    }

    /// Size of the whole board in pixels.
    ///
    /// Each side is capped at `u16::MAX`, the largest terminal coordinate.
    pub fn pixel_size(&self) -> Result<(u32, u32), GameError> {
        let side = |cells: usize| {
            u32::try_from(cells)
                .ok()
                .and_then(|cells| cells.checked_mul(self.cell_size))
                .filter(|pixels| *pixels <= u16::MAX as u32)
        };
        match (side(self.grid_width), side(self.grid_height)) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(GameError::InvalidConfig(format!(
                "{}x{} grid of {} px cells is too large to draw",
                self.grid_width, self.grid_height, self.cell_size
            ))),
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.grid_width == 0 || self.grid_height == 0 {
            return invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }
        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            return invalid("grid dimensions do not fit cell coordinates".to_string());
        }
        if self.cell_size == 0 || self.cell_margin >= self.cell_size {
            return invalid(format!(
                "cell margin {} must be smaller than cell size {}",
                self.cell_margin, self.cell_size
            ));
        }
        if self.tick_delay_ms == 0 || self.food_interval_ms == 0 {
            return invalid("tick delay and food interval must be positive".to_string());
        }
        self.pixel_size()?;
        if self.initial_snake_length == 0 {
            return invalid("snake needs at least one segment".to_string());
        }

        // The whole initial body, laid out behind the head, must fit on the grid
        let fits = self.initial_snake_length <= self.grid_width.max(self.grid_height)
            && self.start.is_within(self.grid_width, self.grid_height)
            && i32::try_from(self.initial_snake_length - 1)
                .ok()
                .and_then(|back| {
                    let (dx, dy) = self.start_direction.opposite().delta();
                    Some(Point::new(
                        self.start.x.checked_add(dx * back)?,
                        self.start.y.checked_add(dy * back)?,
                    ))
                })
                .is_some_and(|tail| tail.is_within(self.grid_width, self.grid_height));
        if !fits {
            return invalid(format!(
                "snake of length {} at ({}, {}) heading {:?} does not fit the grid",
                self.initial_snake_length, self.start.x, self.start.y, self.start_direction
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 32);
        assert_eq!(config.grid_height, 24);
        assert_eq!(config.start, Point::new(10, 10));
        assert_eq!(config.tick_delay(), Duration::from_millis(75));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.pixel_size().unwrap(), (30, 24));
    }

    #[test]
    fn test_rejects_margin_not_smaller_than_cell() {
        let config = GameConfig {
            cell_size: 2,
            cell_margin: 2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_body_outside_grid() {
        // Head at x=2 heading right with 4 segments puts the tail at x=-1
        let config = GameConfig {
            start: Point::new(2, 5),
            initial_snake_length: 4,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            start: Point::new(3, 5),
            initial_snake_length: 4,
            ..GameConfig::small()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_length_that_wraps_or_overflows() {
        let config = GameConfig {
            initial_snake_length: 4_294_967_292,
            ..GameConfig::small()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));

        let config = GameConfig {
            initial_snake_length: 2_147_483_648,
            start_direction: Direction::Left,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());

        // Longer than either side of the grid
        let config = GameConfig {
            start: Point::new(9, 0),
            initial_snake_length: 11,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_board_too_large_to_draw() {
        let config = GameConfig {
            cell_size: 70_000,
            ..GameConfig::new(70_000, 10)
        };
        assert!(config.pixel_size().is_err());
        assert!(config.validate().is_err());

        // Largest drawable width still passes
        let config = GameConfig {
            cell_size: 1,
            ..GameConfig::new(u16::MAX as usize, 20)
        };
        assert_eq!(config.pixel_size().unwrap(), (u16::MAX as u32, 20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert!(GameConfig::new(0, 10).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "grid_width": 40, "start_direction": "down" }"#).unwrap();
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 24);
        assert_eq!(config.start_direction, Direction::Down);
    }
}
