//! Main launcher application.
//!
//! This module contains the `LauncherApp` struct which implements the
//! `eframe::App` trait for the settings window.

use super::preferences::Preferences;
use super::rendering::{
    draw_canvas_background, draw_selection_border, draw_selection_overlay, title_text,
    to_egui_rect, SELECTION_COLOR,
};
use super::selection::{process_pointer_input, SelectionEvent};
use super::state::{LaunchOutcome, UiState};
use crate::codec::SettingsCodec;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::geometry::CanvasGeometry;
use crate::region::RegionSelector;
use crate::settings::{OutputMode, RegionMode, SettingsSnapshot, WindowSize};
use eframe::egui;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);
const WARNING_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);

/// The launcher window.
///
/// Owns the live settings snapshot and the region selector for the session.
pub struct LauncherApp {
    snapshot: SettingsSnapshot,
    config: Config,
    codec: SettingsCodec,

    // Region canvas, rebuilt when the output size or region mode changes
    selector: Option<RegionSelector>,
    selector_window: Option<WindowSize>,

    preferences: Preferences,
    state: UiState,
    pub result: Arc<Mutex<Option<LaunchOutcome>>>,
}

impl LauncherApp {
    /// Creates a new launcher instance.
    ///
    /// # Arguments
    /// * `snapshot` - Initial settings
    /// * `result` - Shared slot for returning the outcome to the caller
    /// * `config` - Application configuration
    pub fn new(
        snapshot: SettingsSnapshot,
        result: Arc<Mutex<Option<LaunchOutcome>>>,
        config: Config,
    ) -> Self {
        Self {
            snapshot,
            config,
            codec: SettingsCodec::new(),
            selector: None,
            selector_window: None,
            preferences: Preferences::load(),
            state: UiState::default(),
            result,
        }
    }

    /// Rebuilds the selector when the output size changed, seeding it with
    /// the current custom region.
    fn sync_selector(&mut self) {
        if self.selector_window == Some(self.snapshot.window) {
            return;
        }

        self.selector_window = Some(self.snapshot.window);
        let WindowSize { width, height } = self.snapshot.window;
        self.selector = match CanvasGeometry::new(width, height, self.config.display_height) {
            Ok(geometry) => {
                let mut selector = RegionSelector::new(geometry);
                if let Some(region) = self.snapshot.custom_region() {
                    selector.seed(region);
                    if let Some(seeded) = selector.region() {
                        self.snapshot.set_region(seeded);
                    }
                }
                Some(selector)
            }
            Err(e) => {
                warn!("Cannot build region canvas: {}", e);
                None
            }
        };
    }

    /// Writes the snapshot and closes the window, or records the failure.
    fn launch(&mut self, ctx: &egui::Context) {
        let path = self.config.settings_path.clone();

        match self.codec.write_to(&self.snapshot, &path) {
            Ok(()) => {
                info!(path = %path.display(), "Launching renderer");
                self.preferences.remember_scene(&self.snapshot.scene_file_path);
                if let Err(e) = self.preferences.save() {
                    warn!("Failed to save preferences: {}", e);
                }

                if let Ok(mut slot) = self.result.lock() {
                    *slot = Some(LaunchOutcome::Launched {
                        path,
                        snapshot: self.snapshot.clone(),
                    });
                }
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            Err(e) => {
                error!("Failed to write settings: {}", e);
                self.state = UiState::Error(e.to_string());
            }
        }
    }

    fn render_pathtracer_section(&mut self, ui: &mut egui::Ui) {
        let render = &mut self.snapshot.render;
        title_text(ui, "Pathtracer Settings");
        numeric_input(ui, "Camera Rays Per Pixel", &mut render.aa_samples_per_pixel);
        numeric_input(ui, "Max Ray Depth", &mut render.max_ray_depth);
        numeric_input(ui, "Samples Per Area Light", &mut render.samples_per_area_light);
        ui.checkbox(
            &mut render.use_hemisphere_sampling,
            "Use Hemisphere Sampling For Direct Lighting",
        );
        numeric_input(ui, "Num Threads", &mut render.num_threads);

        ui.separator();
        title_text(ui, "Adaptive Sampling");
        ui.horizontal(|ui| {
            ui.add(
                egui::DragValue::new(&mut render.adaptive_max_tolerance)
                    .speed(0.001)
                    .range(0.0..=f32::MAX),
            );
            ui.label("Max Tolerance");
        });
        numeric_input(ui, "Samples Per Patch", &mut render.adaptive_samples_per_patch);
    }

    fn render_camera_section(&mut self, ui: &mut egui::Ui) {
        let lens = &mut self.snapshot.lens;
        ui.separator();
        title_text(ui, "Camera Settings");
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(&mut lens.lens_radius).speed(0.01));
            ui.label("Lens Radius");
        });
        ui.horizontal(|ui| {
            ui.add(egui::DragValue::new(&mut lens.focal_distance).speed(0.01));
            ui.label("Focal Distance");
        });
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.snapshot.cam_settings);
            ui.label("Camera Description");
        });
    }

    fn render_output_size_section(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        title_text(ui, "Window/Output Size");
        numeric_input(ui, "Window Width", &mut self.snapshot.window.width);
        numeric_input(ui, "Window Height", &mut self.snapshot.window.height);

        let custom = matches!(self.snapshot.region, RegionMode::CustomRegion(_));
        ui.horizontal(|ui| {
            if ui.radio(!custom, "Render Full Window").clicked() {
                self.snapshot.select_full_window();
            }
            if ui.radio(custom, "Render Custom Region").clicked() && !custom {
                self.snapshot.select_custom_region();
                // fresh selector so the full-canvas default is seeded
                self.selector = None;
                self.selector_window = None;
            }
        });

        if matches!(self.snapshot.region, RegionMode::CustomRegion(_)) {
            self.sync_selector();
            self.render_region_canvas(ui);
        }
    }

    fn render_region_canvas(&mut self, ui: &mut egui::Ui) {
        let Some(selector) = self.selector.as_mut() else {
            ui.colored_label(ERROR_COLOR, "Window height must be non-zero to select a region.");
            return;
        };

        let geometry = selector.geometry();
        let size = egui::vec2(geometry.display_width(), geometry.display_height());
        let (canvas, _response) = ui.allocate_exact_size(size, egui::Sense::drag());
        draw_canvas_background(ui.painter(), canvas);

        if let SelectionEvent::Completed(region) = process_pointer_input(ui, canvas, selector) {
            self.snapshot.set_region(region);
        }

        if let Some(rect) = selector.display_rect() {
            let rect = to_egui_rect(canvas, rect);
            draw_selection_overlay(ui.painter(), canvas, rect, 120);
            draw_selection_border(ui.painter(), rect, 1.0, SELECTION_COLOR);
        }

        if let Some(region) = self.snapshot.custom_region() {
            ui.label(format!("Region X, Y: ({}, {})", region.x, region.y));
            ui.label(format!("Region dx, dy: ({}, {})", region.dx, region.dy));
        }
    }

    fn render_file_section(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        title_text(ui, "File Selection");

        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.snapshot.scene_file_path);
            ui.label("Scene File");
        });

        if !self.preferences.recent_scenes.is_empty() {
            let mut picked = None;
            egui::ComboBox::from_label("Recent Scenes")
                .selected_text("Choose a recent scene")
                .show_ui(ui, |ui| {
                    for scene in &self.preferences.recent_scenes {
                        if ui.selectable_label(false, scene.as_str()).clicked() {
                            picked = Some(scene.clone());
                        }
                    }
                });
            if let Some(scene) = picked {
                self.snapshot.scene_file_path = scene;
            }
        }

        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.snapshot.output_file_name);
            ui.label("Output File");
        });

        ui.horizontal(|ui| {
            ui.radio_value(&mut self.snapshot.output, OutputMode::Realtime, "Render Realtime");
            ui.radio_value(&mut self.snapshot.output, OutputMode::WriteToFile, "Render To File");
        });
    }

    fn render_launch_section(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.separator();

        for warning in self.snapshot.launch_warnings() {
            ui.colored_label(WARNING_COLOR, warning.message());
        }

        let blockers = self.snapshot.launch_blockers();
        let window_size = ctx.viewport_rect().size();
        let button = egui::Button::new("Launch!")
            .min_size(egui::vec2(window_size.x / 5.0, window_size.y / 10.0));

        if ui.add_enabled(blockers.is_empty(), button).clicked() {
            self.launch(ctx);
        }

        for blocker in &blockers {
            ui.colored_label(ERROR_COLOR, blocker.message());
        }

        if let UiState::Error(message) = &self.state {
            ui.colored_label(ERROR_COLOR, format!("Launch failed: {}", message));
        }
    }
}

/// A labelled integer field.
fn numeric_input(ui: &mut egui::Ui, label: &str, value: &mut u32) {
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(value));
        ui.label(label);
    });
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_pathtracer_section(ui);
                self.render_camera_section(ui);
                self.render_output_size_section(ui);
                self.render_file_section(ui);
                self.render_launch_section(ui, ctx);
            });
        });

        // Handle escape to close without launching
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

/// Opens the launcher window and returns when the user closes it.
///
/// # Arguments
/// * `snapshot` - Initial settings
/// * `config` - Application configuration
pub fn run(snapshot: SettingsSnapshot, config: Config) -> Result<LaunchOutcome> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 800.0])
            .with_title("Pathtracer Launcher"),
        ..Default::default()
    };

    let result = Arc::new(Mutex::new(None));
    let app_result = result.clone();

    eframe::run_native(
        "Pathtracer Launcher",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(LauncherApp::new(snapshot, app_result, config)) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| AppError::ui(format!("Failed to run UI: {}", e)))?;

    // Extract result from shared state
    let mut lock = result
        .lock()
        .map_err(|_| AppError::ui("Failed to acquire result lock"))?;

    Ok(lock.take().unwrap_or(LaunchOutcome::Cancelled))
}
