// cli.rs - Command line and environment configuration

use anyhow::{bail, Context, Result};
use clap::Parser;
use conway::{patterns, BoardConfig, Pattern, Simulation, SimulationConfig};

/// Conway's Game of Life
///
/// Examples:
///   conway                                  # 40x30 board of 20 px cells
///   conway --cell-size 10 --pattern pulsar  # finer board with a pulsar
///   conway --random --seed 7 --headless 100 # run 100 generations, print result
///   LIFE_WIDTH=1200 LIFE_HEIGHT=800 conway  # board size from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "conway", version, about = "Conway's Game of Life")]
pub struct CliArgs {
    /// Board width in pixels; must be a multiple of the cell size
    #[arg(long, env = "LIFE_WIDTH", default_value_t = 800)]
    pub width: u32,

    /// Board height in pixels; must be a multiple of the cell size
    #[arg(long, env = "LIFE_HEIGHT", default_value_t = 600)]
    pub height: u32,

    /// Edge length of one cell in pixels
    #[arg(long, env = "LIFE_CELL_SIZE", default_value_t = 20)]
    pub cell_size: u32,

    /// Delay between generations in milliseconds (minimum 1)
    #[arg(long, env = "LIFE_INTERVAL_MS", default_value_t = 100, allow_hyphen_values = true)]
    pub interval: i64,

    /// Seed for the Random button, for reproducible boards
    #[arg(long, env = "LIFE_SEED")]
    pub seed: Option<u64>,

    /// Start from a built-in pattern (glider, blinker, toad, beacon, pulsar, ...)
    #[arg(long, conflicts_with = "random")]
    pub pattern: Option<String>,

    /// Start from a randomized board
    #[arg(long)]
    pub random: bool,

    /// Run this many generations without a window and print the final board
    #[arg(long, value_name = "GENERATIONS")]
    pub headless: Option<u64>,
}

/// What the board holds before the first tick.
#[derive(Clone, Copy)]
pub enum StartingBoard {
    Empty,
    Random,
    Pattern(&'static Pattern),
}

impl StartingBoard {
    pub fn apply(self, simulation: &mut Simulation) {
        match self {
            StartingBoard::Empty => {}
            StartingBoard::Random => simulation.randomize_board(),
            StartingBoard::Pattern(pattern) => simulation.load_pattern(pattern),
        }
    }
}

impl CliArgs {
    pub fn simulation_config(&self) -> Result<SimulationConfig> {
        let board = BoardConfig::new(self.width, self.height, self.cell_size)
            .context("invalid board configuration")?;
        Ok(SimulationConfig::new(board)
            .with_interval_ms(self.interval)
            .with_seed(self.seed))
    }

    pub fn starting_board(&self) -> Result<StartingBoard> {
        if self.random {
            return Ok(StartingBoard::Random);
        }
        let Some(name) = self.pattern.as_deref() else {
            return Ok(StartingBoard::Empty);
        };
        match patterns::find(name) {
            Some(pattern) => Ok(StartingBoard::Pattern(pattern)),
            None => {
                let known: Vec<_> = patterns::PATTERNS.iter().map(|p| p.name).collect();
                bail!("unknown pattern {name:?}, expected one of: {}", known.join(", "))
            }
        }
    }
}
