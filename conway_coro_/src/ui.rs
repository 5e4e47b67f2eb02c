// ui.rs - egui front end: controls, the coloured grid, and the census line

use std::time::{Duration, Instant};

use conway::{CellState, GlitchLevel, PATTERNS};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use tracing::info;

use crate::config::{CellColors, MAX_BPM, MIN_BPM, SeedSource, SimConfig, tick_interval};
use crate::simulation::Simulation;

const GRID_PIXELS: f32 = 760.0;
const SPACING: f32 = 0.5;

/// Combo-box position of the configured library pattern, the first entry otherwise.
fn initial_pattern_index(config: &SimConfig) -> usize {
    match config.seed_source() {
        Ok(SeedSource::Library(pattern)) => PATTERNS.iter().position(|p| p == pattern).unwrap_or(0),
        _ => 0,
    }
}

pub struct ConwayApp {
    sim: Simulation,
    colors: CellColors,
    is_running: bool,
    last_update: Instant,
    update_interval: Duration,
    bpm: u32,
    glitch: GlitchLevel,
    selected_pattern: usize,
    stop_on_cycle: bool,
    status: String,
}

impl ConwayApp {
    pub fn new(sim: Simulation, config: &SimConfig) -> Self {
        Self {
            glitch: sim.glitch_level(),
            sim,
            colors: config.colors,
            is_running: false,
            last_update: Instant::now(),
            update_interval: config.tick_interval(),
            bpm: config.bpm,
            selected_pattern: initial_pattern_index(config),
            stop_on_cycle: false,
            status: String::new(),
        }
    }

    fn step(&mut self) {
        let report = self.sim.tick();
        if report.cycle_detected && self.stop_on_cycle {
            self.is_running = false;
            self.status = format!("Cycle detected at generation {}", report.generation);
            info!(generation = report.generation, "cycle detected, pausing");
        }
    }

    fn color(&self, state: CellState) -> Color32 {
        let [r, g, b] = self.colors.rgb(state);
        Color32::from_rgb(r, g, b)
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.is_running = !self.is_running;
                if self.is_running {
                    self.last_update = Instant::now();
                    self.status.clear();
                }
            }

            if ui.add_enabled(!self.is_running, egui::Button::new("⏭ Step")).clicked() {
                self.step();
            }

            if ui.button("⏹ Clear").clicked() {
                self.is_running = false;
                self.sim.clear();
            }

            if ui.button("🎲 Random").clicked() {
                self.is_running = false;
                self.sim.randomize();
            }

            if ui.button("↺ Reset").clicked() {
                self.is_running = false;
                self.sim.reset();
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
                    self.is_running = false;
                    self.sim.apply_pattern(pattern);
                }
            }

            ui.separator();
            ui.label(format!("Generation: {}", self.sim.generation()));
        });

        ui.horizontal(|ui| {
            ui.label("Tempo:");
            if ui
                .add(egui::Slider::new(&mut self.bpm, MIN_BPM..=MAX_BPM).suffix(" bpm"))
                .changed()
            {
                self.update_interval = tick_interval(self.bpm);
            }

            ui.separator();

            ui.label("Glitch:");
            egui::ComboBox::from_id_source("glitch_selector")
                .selected_text(self.glitch.name())
                .show_ui(ui, |ui| {
                    for level in GlitchLevel::ALL {
                        ui.selectable_value(&mut self.glitch, level, level.name());
                    }
                });
            self.sim.set_glitch_level(self.glitch);

            ui.separator();
            ui.checkbox(&mut self.stop_on_cycle, "Pause on cycle");
        });
    }

    fn grid_view(&mut self, ui: &mut egui::Ui) {
        let grid = self.sim.grid();
        let (width, height) = (grid.width(), grid.height());
        if width == 0 || height == 0 {
            return;
        }

        let box_size = (GRID_PIXELS / width.max(height) as f32 - SPACING).clamp(1.0, 15.0);
        let pitch = box_size + SPACING;
        let total_size = Vec2::new(pitch * width as f32 - SPACING, pitch * height as f32 - SPACING);

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, Color32::BLACK);

        for (row, cells) in grid.rows().iter().enumerate() {
            for (col, &state) in cells.iter().enumerate() {
                let rect = Rect::from_min_size(
                    egui::pos2(origin.x + col as f32 * pitch, origin.y + row as f32 * pitch),
                    Vec2::splat(box_size),
                );
                painter.rect_filled(rect, 1.0, self.color(state));
                if box_size >= 6.0 {
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }
        }

        // Toggling only while paused
        if !self.is_running && response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - origin;
                if offset.x >= 0.0 && offset.y >= 0.0 {
                    let col = (offset.x / pitch) as usize;
                    let row = (offset.y / pitch) as usize;
                    self.sim.toggle_cell(row, col);
                }
            }
        }
    }

    fn census_line(&self, ui: &mut egui::Ui) {
        let census = self.sim.grid().census();
        let total = census.total().max(1);
        ui.horizontal(|ui| {
            for (state, count) in [
                (CellState::Survived, census.survived),
                (CellState::New, census.new),
                (CellState::Died, census.died),
                (CellState::Dead, census.dead),
            ] {
                ui.colored_label(self.color(state), format!("{state:?}: {count}"));
            }
            ui.separator();
            ui.label(format!(
                "Population: {:.1}%",
                census.alive() as f32 / total as f32 * 100.0
            ));
            if !self.status.is_empty() {
                ui.separator();
                ui.label(self.status.as_str());
            }
        });
    }
}

impl eframe::App for ConwayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.step();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Glitch Life");
            self.controls(ui);
            ui.separator();
            self.grid_view(ui);
            ui.separator();
            self.census_line(ui);
        });

        if self.is_running {
            ctx.request_repaint_after(self.update_interval.saturating_sub(self.last_update.elapsed()));
        }
    }
}
