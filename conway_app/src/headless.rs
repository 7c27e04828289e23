// headless.rs - Run the simulation on its timer without a window

use anyhow::{Context, Result};
use conway::{Grid, Simulation, SimulationConfig};
use tokio::runtime::Handle;
use tracing::info;

use crate::cli::StartingBoard;

pub fn run(config: SimulationConfig, start: StartingBoard, generations: u64) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start the timer runtime")?;

    let grid = runtime.block_on(async {
        let mut simulation = Simulation::new(config, Handle::current());
        start.apply(&mut simulation);
        advance(&mut simulation, generations).await;
        simulation.grid().clone()
    });

    print!("{}", render(&grid));
    Ok(())
}

/// Run until `generations` ticks have completed, then stop.
pub async fn advance(simulation: &mut Simulation, generations: u64) {
    if generations == 0 {
        return;
    }

    simulation.run();
    log_generation(simulation);
    while simulation.generation() < generations && simulation.next_tick().await {
        log_generation(simulation);
    }
    simulation.stop();
}

fn log_generation(simulation: &Simulation) {
    info!(
        generation = simulation.generation(),
        population = simulation.live_cells().len(),
        "generation complete"
    );
}

/// One line per row, `#` for live cells and `.` for dead ones.
pub fn render(grid: &Grid) -> String {
    let mut picture = String::with_capacity((grid.cols() + 1) * grid.rows());
    for y in 0..grid.rows() {
        picture.extend((0..grid.cols()).map(|x| match grid.get(x, y) {
            Some(true) => '#',
            _ => '.',
        }));
        picture.push('\n');
    }
    picture
}

#[cfg(test)]
mod tests {
    use super::*;
    use conway::{patterns, BoardConfig};

    fn simulation() -> Simulation {
        let board = BoardConfig::new(50, 50, 10).unwrap();
        let config = SimulationConfig::new(board).with_interval_ms(5);
        Simulation::new(config, Handle::current())
    }

    #[tokio::test(start_paused = true)]
    async fn advances_exactly_the_requested_generations() {
        let mut sim = simulation();
        StartingBoard::Pattern(patterns::find("Blinker").unwrap()).apply(&mut sim);
        let start = sim.grid().clone();

        advance(&mut sim, 3).await;
        assert_eq!(sim.generation(), 3);
        assert!(!sim.is_running());
        assert_eq!(sim.grid(), &start.step().step().step());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_generations_leaves_board_alone() {
        let mut sim = simulation();
        sim.toggle_cell_at(2, 2);
        advance(&mut sim, 0).await;
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.live_cells(), &[(2, 2)]);
    }

    #[test]
    fn renders_rows_top_to_bottom() {
        let grid = Grid::empty(3, 2).toggled(1, 0).toggled(2, 1);
        assert_eq!(render(&grid), ".#.\n..#\n");
    }
}
