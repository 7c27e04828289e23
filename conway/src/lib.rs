// lib.rs - Conway's Game of Life engine and simulation driver

//! Conway's Game of Life on a fixed, non-wrapping board.
//!
//! [`Grid`] is the pure step engine. [`Simulation`] owns the current board
//! and the run/stop timer that advances it.

pub mod config;
pub mod grid;
pub mod patterns;
pub mod simulation;

pub use config::{BoardConfig, Dimensions, SimulationConfig, DEFAULT_INTERVAL, MIN_INTERVAL};
pub use grid::{CellCoord, Grid};
pub use patterns::{Pattern, PATTERNS};
pub use simulation::Simulation;
