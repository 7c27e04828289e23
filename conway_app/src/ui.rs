// ui.rs - egui front end for the simulation

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use tokio::runtime::Runtime;

use conway::{patterns, Simulation, SimulationConfig};

use crate::cli::StartingBoard;

pub struct LifeApp {
    simulation: Simulation,
    _runtime: Runtime, // drives the simulation timer; dropped after `simulation`
    interval_input: String,
    selected_pattern: usize,
    live_color: Color32,
    dead_color: Color32,
    line_color: Color32,
}

impl LifeApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: Runtime,
        config: SimulationConfig,
        start: StartingBoard,
    ) -> Self {
        let mut simulation = Simulation::new(config, runtime.handle().clone());
        let ctx = cc.egui_ctx.clone();
        simulation.set_wakeup(move || ctx.request_repaint());
        start.apply(&mut simulation);

        Self {
            interval_input: simulation.interval().as_millis().to_string(),
            simulation,
            _runtime: runtime,
            selected_pattern: 0,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            line_color: Color32::from_gray(60),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Update every");
            let input = ui.add(
                egui::TextEdit::singleline(&mut self.interval_input).desired_width(60.0),
            );
            if input.changed() {
                self.simulation.set_interval_from_input(&self.interval_input);
            }
            ui.label("ms");

            ui.separator();

            if self.simulation.is_running() {
                if ui.button("⏹ Stop").clicked() {
                    self.simulation.stop();
                }
            } else if ui.button("▶ Run").clicked() {
                self.simulation.run();
            }

            if ui.button("🎲 Random").clicked() {
                self.simulation.randomize_board();
            }

            if ui.button("Clear").clicked() {
                self.simulation.clear();
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.simulation.load_pattern(&patterns::PATTERNS[self.selected_pattern]);
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.simulation.generation()));
        });

        ui.horizontal(|ui| {
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let board = *self.simulation.board();
        let cell = board.cell_size() as f32;
        let total_size = Vec2::new(board.width() as f32, board.height() as f32);

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, self.dead_color);

        // Grid lines
        let stroke = Stroke::new(1.0, self.line_color);
        let dims = board.dimensions();
        for col in 0..=dims.cols {
            let x = origin.x + col as f32 * cell;
            painter.line_segment(
                [Pos2::new(x, origin.y), Pos2::new(x, origin.y + total_size.y)],
                stroke,
            );
        }
        for row in 0..=dims.rows {
            let y = origin.y + row as f32 * cell;
            painter.line_segment(
                [Pos2::new(origin.x, y), Pos2::new(origin.x + total_size.x, y)],
                stroke,
            );
        }

        // Live cells, inset by one pixel so the lines stay visible
        for &(x, y) in self.simulation.live_cells() {
            let min = origin + Vec2::new(x as f32 * cell + 1.0, y as f32 * cell + 1.0);
            let rect = Rect::from_min_size(min, Vec2::splat(cell - 1.0));
            painter.rect_filled(rect, 0.0, self.live_color);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - origin;
                if let Some((x, y)) = board.cell_at(offset.x, offset.y) {
                    self.simulation.toggle_cell_at(x, y);
                }
            }
        }
    }

    fn statistics(&self, ui: &mut egui::Ui) {
        let dims = self.simulation.board().dimensions();
        let total = dims.cols * dims.rows;
        let live = self.simulation.live_cells().len();

        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {}", live));
            ui.label(format!("Dead cells: {}", total - live));
            ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
        });
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply any ticks whose timers fired since the last frame
        self.simulation.poll_timers();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            self.controls(ui);

            ui.separator();

            egui::ScrollArea::both().show(ui, |ui| self.board(ui));

            ui.separator();

            self.statistics(ui);
        });
    }
}
