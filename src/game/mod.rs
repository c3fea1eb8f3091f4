//! Core game logic module for Snake
//!
//! Grid, snake and game rules are plain synchronous state; the [`runner`]
//! module drives them on a timer against an injected surface.

pub mod config;
pub mod direction;
pub mod engine;
pub mod grid;
pub mod point;
pub mod runner;
pub mod snake;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{Food, Game, GameStatus, TickOutcome};
pub use grid::{CellState, Grid};
pub use point::Point;
pub use runner::{GameLoop, SessionEnd};
pub use snake::{CellUpdate, Snake};
