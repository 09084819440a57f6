/// The `egui` re-export for building native GUIs with the eframe framework.
use eframe::egui::{self, Align2, Color32, FontId, Stroke, pos2, vec2};
/// The `egui_plot` crate for plotting data in an egui-based app.
use egui_plot::{Bar, BarChart, Legend, Plot};

use glam::DVec2;
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ideal_gas::config::DEFAULT_WINDOW_SIZE;
use ideal_gas::{HistogramGeometry, SimulationParams, SimulationSpace, SpeedHistogram};

// ===================================================================================
// Main Application
// ===================================================================================

/// The viewer state:
/// - A configuration panel used to set up parameters while stopped
/// - The "running" flag indicating if the simulation is active
/// - The simulation space, rebuilt from `params` on reset
///
/// All physics lives in the library; this only ticks and draws.
struct GasApp {
    // -------------- Config / UI --------------
    params: SimulationParams, // user-chosen parameters
    use_seed: bool,           // pin the placement seed?
    seed: u64,                // seed used when `use_seed` is set
    running: bool,            // is the simulation running?
    needs_reset: bool,        // user requested a reset

    // -------------- Simulation Data --------------
    space: Option<SimulationSpace>,
    histograms: Vec<Option<SpeedHistogram>>,
}

impl GasApp {
    /// Creates the initial `GasApp` with default config (not yet running).
    fn new() -> Self {
        Self {
            params: SimulationParams::default(),
            use_seed: false,
            seed: 0,
            running: false,
            needs_reset: true, // so it initialises once

            space: None,
            histograms: vec![],
        }
    }

    /// Initialises (or re-initialises) the simulation using the current `params`.
    fn reset_simulation(&mut self) {
        self.params.seed = self.use_seed.then_some(self.seed);
        let mut rng: StdRng = match self.params.seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rand::rng().random()),
        };

        let top_left = DVec2::splat(f64::from(self.params.margin));
        match SimulationSpace::new(
            top_left,
            &self.params.groups,
            self.params.container_width,
            self.params.container_height,
            &mut rng,
        ) {
            Ok(space) => {
                info!("reset: {} particles", space.particle_count());
                self.space = Some(space);
            }
            Err(e) => {
                error!("failed to build simulation: {e}");
                self.space = None;
                self.running = false;
            }
        }
        self.needs_reset = false;
    }

    /// Advance one tick; any core error stops the simulation.
    fn step(&mut self) {
        let Some(space) = self.space.as_mut() else {
            self.running = false;
            return;
        };
        if let Err(e) = space.tick() {
            error!("tick failed, stopping: {e}");
            self.running = false;
        }
    }

    /// Empty groups (a zero-count slider) get no histogram.
    fn refresh_histograms(&mut self) {
        let Some(space) = &self.space else {
            self.histograms.clear();
            return;
        };
        let num_buckets = self.params.num_buckets;
        self.histograms = space
            .groups()
            .iter()
            .map(|group| {
                if group.is_empty() {
                    return None;
                }
                SpeedHistogram::compute(group, num_buckets)
                    .inspect_err(|e| error!("histogram failed: {e}"))
                    .ok()
            })
            .collect();
    }

    /// Geometry of the `index`-th pixel histogram, stacked right of the container.
    fn histogram_geometry(&self, origin: egui::Pos2, index: usize) -> HistogramGeometry {
        let p = &self.params;
        let left = 2.0 * p.margin + p.container_width as f32;
        let top = p.margin + index as f32 * (p.histogram_height + p.margin);
        HistogramGeometry {
            top_left: origin + vec2(left, top),
            width: p.histogram_width,
            height: p.histogram_height,
            margin: p.margin,
            y_interval_pixels: p.y_interval_pixels,
        }
    }
}

fn group_label(mass: u32, radius: u32) -> String {
    format!("mass {mass}, radius {radius}")
}

impl eframe::App for GasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --------------------------
        // Sidebar with configuration
        // --------------------------
        egui::SidePanel::left("config_panel").show(ctx, |ui| {
            ui.heading("Simulation Controls");

            // Sliders: only matter if we haven't started or we want to reset
            if !self.running {
                // Bucket count only affects the histograms, no reset needed
                ui.add(egui::Slider::new(&mut self.params.num_buckets, 1..=50).text("Buckets"));
                let mut changed = false;
                for spec in &mut self.params.groups {
                    let label = group_label(spec.mass, spec.radius);
                    changed |= ui
                        .add(egui::Slider::new(&mut spec.count, 0..=500).text(label))
                        .changed();
                }
                changed |= ui.checkbox(&mut self.use_seed, "Fixed seed").changed();
                if self.use_seed {
                    changed |= ui
                        .add(egui::DragValue::new(&mut self.seed).prefix("seed "))
                        .changed();
                }
                self.needs_reset |= changed;
            } else {
                ui.label("Parameters locked while running. Stop to change.");
            }

            ui.separator();

            // Start / Stop
            if self.running {
                if ui.button("Stop").clicked() {
                    self.running = false;
                }
            } else if ui.button("Start").clicked() {
                if self.needs_reset {
                    self.reset_simulation();
                }
                self.running = self.space.is_some();
            }

            // Reset
            if ui.button("Reset").clicked() {
                // Force a brand new system with current sliders
                self.reset_simulation();
                // By default, remain "stopped"
                self.running = false;
            }
        });

        // If a reset was triggered but not performed yet, do it now
        if self.needs_reset {
            self.reset_simulation();
        }

        if self.running {
            self.step();
        }
        self.refresh_histograms();

        // ------------------------------------
        // UI layout for top, right, central
        // ------------------------------------
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.heading("Ideal Gas (elastic collisions)");
            if let Some(space) = &self.space {
                ui.label(format!(
                    "Particles: {}   Kinetic energy: {:.2}",
                    space.particle_count(),
                    space.kinetic_energy()
                ));
            }
        });

        egui::SidePanel::right("right_panel")
            .resizable(true)
            .show(ctx, |ui| {
                ui.label("Speed distribution per group");
                let plot = Plot::new("speed_histogram")
                    .width(300.0)
                    .height(400.0)
                    .legend(Legend::default())
                    .allow_scroll(true)
                    .allow_drag(true);

                plot.show(ui, |plot_ui| {
                    let Some(space) = &self.space else { return };
                    for (group, hist) in space.groups().iter().zip(&self.histograms) {
                        let Some(hist) = hist else { continue };
                        let bars: Vec<Bar> = hist
                            .bucket_limits()
                            .iter()
                            .zip(hist.counts())
                            .enumerate()
                            .filter_map(|(i, (&limit, &count))| {
                                let floor = hist.bucket_floor(i).ok()?;
                                let width = (limit - floor).max(f64::EPSILON);
                                Some(Bar::new(floor + width / 2.0, count as f64).width(width))
                            })
                            .collect();
                        let name = group_label(group.mass(), group.radius());
                        plot_ui.bar_chart(BarChart::new(bars).color(group.tag()).name(name));
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let painter = ui.painter();
            let origin = ui.max_rect().min;
            let Some(space) = &self.space else { return };

            // Container outline
            let top_left = origin + vec2(space.top_left().x as f32, space.top_left().y as f32);
            let container = egui::Rect::from_min_size(
                top_left,
                vec2(space.width() as f32, space.height() as f32),
            );
            painter.rect_stroke(container, 0.0, Stroke::new(1.0, Color32::WHITE));

            // Particles, drawn centred one radius in from their stored corner
            for p in space.particles() {
                let r = p.radius() as f32;
                let centre = top_left + vec2(p.position.x as f32 + r, p.position.y as f32 + r);
                painter.circle_filled(centre, r, p.tag());
            }

            // One pixel histogram per group
            for (index, (group, hist)) in space.groups().iter().zip(&self.histograms).enumerate() {
                let geometry = self.histogram_geometry(origin, index);
                let frame = geometry.frame();
                painter.rect_stroke(frame, 0.0, Stroke::new(1.0, Color32::WHITE));
                painter.text(
                    pos2(frame.center().x, frame.max.y + geometry.margin / 10.0),
                    Align2::CENTER_TOP,
                    "Speed",
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
                painter.text(
                    pos2(frame.min.x - geometry.margin / 10.0, frame.center().y),
                    Align2::RIGHT_CENTER,
                    "Count",
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
                if let Some(hist) = hist {
                    for bar in geometry.bars(hist) {
                        painter.rect_filled(bar.intersect(frame), 0.0, group.tag());
                    }
                }
            }
        });

        // Request another frame to keep animating (or remain static if stopped).
        ctx.request_repaint();
    }
}

// ===================================================================================
// main
// ===================================================================================

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([DEFAULT_WINDOW_SIZE + 500.0, DEFAULT_WINDOW_SIZE]),
        ..Default::default()
    };

    // Wall reflection and integration run per particle on the rayon pool
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get_physical())
        .build_global()
    {
        warn!("using default rayon pool: {e}");
    }

    eframe::run_native(
        "Ideal Gas Simulation",
        native_options,
        Box::new(|_cc| Ok(Box::new(GasApp::new()))),
    )
}
