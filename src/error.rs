//! Error types shared by the game core and its drawing surfaces.

use thiserror::Error;

/// Failure of the injected drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("drawing surface unavailable: {0}")]
    Unavailable(String),
}

/// Faults that end the current game session.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    CellOutOfRange {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
