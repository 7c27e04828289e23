// simulation.rs - Run/stop state machine driving the grid on a timer

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{clamp_interval_ms, BoardConfig, Dimensions, SimulationConfig, MIN_INTERVAL};
use crate::grid::{CellCoord, Grid};
use crate::patterns::Pattern;

type Wakeup = Arc<dyn Fn() + Send + Sync>;

/// The one scheduled tick, tagged with the generation it was scheduled after.
struct PendingTick {
    generation: u64,
    task: JoinHandle<()>,
}

/// Owns the board and the single repeating timer that advances it.
///
/// Timer tasks run on the supplied tokio runtime but never touch the board:
/// they only report that their delay elapsed. The owner applies the tick by
/// calling [`Simulation::poll_timers`] (e.g. once per UI frame) or awaiting
/// [`Simulation::next_tick`].
pub struct Simulation {
    board: BoardConfig,
    grid: Grid,
    live_cells: Vec<CellCoord>,
    running: bool,
    interval: Duration,
    generation: u64,
    rng: ChaCha8Rng,

    runtime: Handle,
    pending: Option<PendingTick>,
    fired_tx: UnboundedSender<u64>,
    fired_rx: UnboundedReceiver<u64>,
    wakeup: Option<Wakeup>,
}

impl Simulation {
    pub fn new(config: SimulationConfig, runtime: Handle) -> Self {
        let Dimensions { cols, rows } = config.board.dimensions();
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();

        Self {
            board: config.board,
            grid: Grid::empty(cols, rows),
            live_cells: Vec::new(),
            running: false,
            interval: config.interval.max(MIN_INTERVAL),
            generation: 0,
            rng,
            runtime,
            pending: None,
            fired_tx,
            fired_rx,
            wakeup: None,
        }
    }

    /// Called from the timer task each time a tick becomes due.
    pub fn set_wakeup(&mut self, wakeup: impl Fn() + Send + Sync + 'static) {
        self.wakeup = Some(Arc::new(wakeup));
    }

    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn live_cells(&self) -> &[CellCoord] {
        &self.live_cells
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start running and advance one generation right away.
    pub fn run(&mut self) {
        if self.running {
            return;
        }
        info!(interval_ms = self.interval.as_millis() as u64, "simulation started");
        self.running = true;
        self.tick();
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.cancel_pending();
        info!(generation = self.generation, "simulation stopped");
    }

    /// Takes effect at the next scheduling decision; an already pending tick
    /// keeps its original delay.
    pub fn set_interval(&mut self, ms: i64) {
        let interval = clamp_interval_ms(ms);
        if interval.as_millis() as i64 != ms {
            warn!(requested = ms, "interval clamped to {} ms", interval.as_millis());
        }
        self.interval = interval;
    }

    /// Non-numeric input is treated like a non-positive interval.
    pub fn set_interval_from_input(&mut self, input: &str) {
        match input.trim().parse::<i64>() {
            Ok(ms) => self.set_interval(ms),
            Err(_) => {
                warn!(input, "unreadable interval, using {} ms", MIN_INTERVAL.as_millis());
                self.interval = MIN_INTERVAL;
            }
        }
    }

    pub fn clear(&mut self) {
        let Dimensions { cols, rows } = self.board.dimensions();
        self.replace_grid(Grid::empty(cols, rows));
        info!("board cleared");
    }

    pub fn randomize_board(&mut self) {
        let Dimensions { cols, rows } = self.board.dimensions();
        let grid = Grid::random(cols, rows, &mut self.rng);
        self.replace_grid(grid);
        info!(population = self.live_cells.len(), "board randomized");
    }

    pub fn load_pattern(&mut self, pattern: &Pattern) {
        let Dimensions { cols, rows } = self.board.dimensions();
        self.replace_grid(Grid::with_pattern(cols, rows, pattern));
        info!(pattern = pattern.name, "pattern loaded");
    }

    /// Flip one cell. Returns false, leaving the board alone, when the
    /// coordinate is off the board.
    pub fn toggle_cell_at(&mut self, x: usize, y: usize) -> bool {
        if !self.grid.contains(x, y) {
            debug!(x, y, "ignoring toggle outside the board");
            return false;
        }
        let next = self.grid.toggled(x, y);
        self.replace_grid(next);
        debug!(x, y, "cell toggled");
        true
    }

    /// Apply every timer firing received so far without blocking. Returns
    /// the number of ticks that took effect.
    pub fn poll_timers(&mut self) -> usize {
        let mut ticks = 0;
        while let Ok(generation) = self.fired_rx.try_recv() {
            if self.on_fired(generation) {
                ticks += 1;
            }
        }
        ticks
    }

    /// Wait for the pending tick and apply it. Returns false straight away
    /// when nothing is scheduled.
    pub async fn next_tick(&mut self) -> bool {
        while self.pending.is_some() {
            match self.fired_rx.recv().await {
                Some(generation) => {
                    if self.on_fired(generation) {
                        return true;
                    }
                }
                None => break,
            }
        }
        false
    }

    fn on_fired(&mut self, generation: u64) -> bool {
        let due = self.running
            && self
                .pending
                .as_ref()
                .is_some_and(|pending| pending.generation == generation);
        if !due {
            debug!(generation, "dropping stale timer");
            return false;
        }
        self.pending = None;
        self.tick();
        true
    }

    fn tick(&mut self) {
        let next = self.grid.step();
        self.replace_grid(next);
        self.generation += 1;
        debug!(generation = self.generation, population = self.live_cells.len(), "tick");
        self.schedule();
    }

    fn schedule(&mut self) {
        let generation = self.generation;
        let delay = self.interval;
        let fired = self.fired_tx.clone();
        let wakeup = self.wakeup.clone();

        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if fired.send(generation).is_ok() {
                if let Some(wakeup) = wakeup {
                    wakeup();
                }
            }
        });

        if let Some(previous) = self.pending.replace(PendingTick { generation, task }) {
            previous.task.abort();
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
    }

    fn replace_grid(&mut self, grid: Grid) {
        self.live_cells = grid.live_cells();
        self.grid = grid;
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
