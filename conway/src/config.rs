// config.rs - Board geometry and simulation settings

use std::time::Duration;

use anyhow::{ensure, Result};

use crate::grid::CellCoord;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Board size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub cols: usize,
    pub rows: usize,
}

/// Board geometry in pixels. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    width: u32,
    height: u32,
    cell_size: u32,
}

impl BoardConfig {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Result<Self> {
        ensure!(cell_size > 0, "cell size must be positive");
        ensure!(
            width > 0 && height > 0,
            "board must be at least one pixel wide and tall, got {width}x{height}"
        );
        ensure!(
            width % cell_size == 0 && height % cell_size == 0,
            "board {width}x{height} px does not divide into {cell_size} px cells"
        );
        Ok(Self {
            width,
            height,
            cell_size,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            cols: (self.width / self.cell_size) as usize,
            rows: (self.height / self.cell_size) as usize,
        }
    }

    /// Cell under a pixel offset from the board's top-left corner, or
    /// `None` when the pixel lies outside the board.
    pub fn cell_at(&self, px: f32, py: f32) -> Option<CellCoord> {
        if !px.is_finite() || !py.is_finite() || px < 0.0 || py < 0.0 {
            return None;
        }

        let size = self.cell_size as f32;
        let (x, y) = ((px / size).floor() as usize, (py / size).floor() as usize);
        let Dimensions { cols, rows } = self.dimensions();
        (x < cols && y < rows).then_some((x, y))
    }
}

/// Everything the simulation driver needs at construction.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub board: BoardConfig,
    pub interval: Duration,
    pub seed: Option<u64>, // None seeds from OS entropy
}

impl SimulationConfig {
    pub fn new(board: BoardConfig) -> Self {
        Self {
            board,
            interval: DEFAULT_INTERVAL,
            seed: None,
        }
    }

    pub fn with_interval_ms(mut self, ms: i64) -> Self {
        self.interval = clamp_interval_ms(ms);
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Interval for a millisecond count, clamped to at least [`MIN_INTERVAL`].
pub fn clamp_interval_ms(ms: i64) -> Duration {
    Duration::from_millis(ms.max(0) as u64).max(MIN_INTERVAL)
}
