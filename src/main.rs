use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use grid_snake::game::{Direction, GameConfig, Point};
use grid_snake::logging;
use grid_snake::modes::HumanMode;
use simplelog::LevelFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// JSON file with a base game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Pixels per cell (one pixel is half a terminal row)
    #[arg(long)]
    cell_size: Option<u32>,

    /// Blank pixels between cells
    #[arg(long)]
    margin: Option<u32>,

    /// Milliseconds per game tick
    #[arg(long)]
    delay: Option<u64>,

    /// Milliseconds between food spawn attempts
    #[arg(long)]
    food_interval: Option<u64>,

    /// Initial head column
    #[arg(long)]
    start_x: Option<i32>,

    /// Initial head row
    #[arg(long)]
    start_y: Option<i32>,

    /// Initial heading
    #[arg(long)]
    direction: Option<Heading>,

    /// Initial snake length
    #[arg(long)]
    length: Option<usize>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "grid_snake.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, ValueEnum)]
enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl From<Heading> for Direction {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::Up => Direction::Up,
            Heading::Down => Direction::Down,
            Heading::Left => Direction::Left,
            Heading::Right => Direction::Right,
        }
    }
}

impl Cli {
    /// Base configuration from the file (or defaults), then flag overrides
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(margin) = self.margin {
            config.cell_margin = margin;
        }
        if let Some(delay) = self.delay {
            config.tick_delay_ms = delay;
        }
        if let Some(food_interval) = self.food_interval {
            config.food_interval_ms = food_interval;
        }
        config.start = Point::new(
            self.start_x.unwrap_or(config.start.x),
            self.start_y.unwrap_or(config.start.y),
        );
        if let Some(direction) = self.direction {
            config.start_direction = direction.into();
        }
        if let Some(length) = self.length {
            config.initial_snake_length = length;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_file, cli.log_level)?;

    let config = cli.game_config()?;
    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
