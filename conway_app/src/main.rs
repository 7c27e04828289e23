// main.rs - Conway's Game of Life window and headless runner

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;      // Command line and environment configuration
mod headless; // Windowless runner
mod ui;       // egui front end

use cli::CliArgs;
use ui::LifeApp;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = args.simulation_config()?;
    let start = args.starting_board()?;

    let dims = config.board.dimensions();
    info!(
        cols = dims.cols,
        rows = dims.rows,
        cell_size = config.board.cell_size(),
        interval_ms = config.interval.as_millis() as u64,
        "board configured"
    );

    if let Some(generations) = args.headless {
        return headless::run(config, start, generations);
    }

    // Timer tasks only sleep and send a token back
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("life-timer")
        .enable_time()
        .build()
        .context("failed to start the timer runtime")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([
            config.board.width() as f32 + 40.0,
            config.board.height() as f32 + 160.0,
        ]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(LifeApp::new(cc, runtime, config, start))),
    )
    .map_err(|err| anyhow!("window failed: {err}"))
}
