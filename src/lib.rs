//! Grid Snake - a terminal Snake game
//!
//! This library provides:
//! - Core game logic: grid, snake and rules (game module)
//! - A timer-driven game loop over injected surfaces (game::runner)
//! - TUI rendering with dirty-cell repaints (render module)
//! - Keyboard input mapping (input module)
//! - The interactive terminal front-end (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod modes;
pub mod render;
pub mod shutdown;

pub use error::{GameError, SurfaceError};
