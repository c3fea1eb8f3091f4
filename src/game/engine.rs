use log::{debug, info, trace};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use super::{
    config::GameConfig,
    direction::Direction,
    grid::{CellState, Grid},
    point::Point,
    snake::Snake,
};
use crate::error::{GameError, SurfaceError};
use crate::render::Surface;

/// The single piece of food on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Point,
    /// Whether the food has been written to the grid yet
    pub rendered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Crashed,
    /// The snake covers every cell of the grid
    Won,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Crashed,
    Won,
}

/// Game state and rules: owns the grid, the snake, the food and the score
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Option<Food>,
    score: u32,
    ticks: u64,
    status: GameStatus,
    rng: StdRng,
}

impl Game {
    /// Create a new game with the snake placed on the grid
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let mut grid = Grid::new(
            config.grid_width,
            config.grid_height,
            config.cell_size,
            config.cell_margin,
        );
        let snake = Snake::new(
            config.start,
            config.start_direction,
            config.initial_snake_length,
            config.grid_width,
            config.grid_height,
        );
        for segment in snake.segments() {
            grid.set_point(segment, CellState::Occupied)?;
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            grid,
            snake,
            food: None,
            score: 0,
            ticks: 0,
            status: GameStatus::Running,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Paint the cells changed since the last render onto `surface`.
    /// Returns the number of cells painted.
    pub fn render_grid<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<usize, SurfaceError> {
        self.grid.render(surface)
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Food> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Ask the snake to turn at the next tick. Returns whether it accepted.
    pub fn steer(&mut self, direction: Direction) -> bool {
        let accepted = self.snake.request_direction(direction);
        if !accepted {
            trace!(
                "ignored turn to {:?} while heading {:?}",
                direction,
                self.snake.direction()
            );
        }
        accepted
    }

    /// Advance the game by one tick
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        match self.status {
            GameStatus::Running => {}
            GameStatus::Crashed => return Ok(TickOutcome::Crashed),
            GameStatus::Won => return Ok(TickOutcome::Won),
        }

        self.ticks += 1;
        let updates = self.snake.update();

        if !self.snake.is_alive() {
            self.status = GameStatus::Crashed;
            info!(
                "snake crashed at ({}, {}) after {} ticks, score {}",
                self.snake.head().x,
                self.snake.head().y,
                self.ticks,
                self.score
            );
            return Ok(TickOutcome::Crashed);
        }

        for update in updates {
            self.grid.set_point(update.point, update.state)?;
        }

        let head = self.snake.head();
        match self.food {
            Some(food) if food.position == head => {
                if let Some(update) = self.snake.grow() {
                    self.grid.set_point(update.point, update.state)?;
                }
                self.score += 1;
                self.food = None;
                debug!("food eaten at ({}, {}), score {}", head.x, head.y, self.score);

                if self.snake.len() == self.config.grid_width * self.config.grid_height {
                    self.status = GameStatus::Won;
                    info!("snake fills the grid, score {}", self.score);
                    return Ok(TickOutcome::Won);
                }
                return Ok(TickOutcome::Ate);
            }
            Some(food) if !food.rendered => {
                self.grid.set_point(food.position, CellState::Food)?;
                self.food = Some(Food {
                    rendered: true,
                    ..food
                });
            }
            _ => {}
        }

        Ok(TickOutcome::Moved)
    }

    /// Place food on a random free cell if none is active.
    ///
    /// Cells covered by the snake are never chosen. Returns the new food
    /// position, or `None` when food already exists or no cell is free.
    pub fn spawn_food(&mut self) -> Option<Point> {
        if !self.is_running() || self.food.is_some() {
            return None;
        }

        let free = self.grid.empty_cells();
        let position = *free.choose(&mut self.rng)?;
        self.food = Some(Food {
            position,
            rendered: false,
        });
        debug!("food spawned at ({}, {})", position.x, position.y);
        Some(position)
    }

    /// Place food on a specific cell.
    ///
    /// Returns `Ok(false)` when food already exists or the cell is not empty.
    pub fn place_food(&mut self, position: Point) -> Result<bool, GameError> {
        if self.food.is_some() || self.grid.get_point(position)? != CellState::Empty {
            return Ok(false);
        }
        self.food = Some(Food {
            position,
            rendered: false,
        });
        Ok(true)
    }
}
