//! Application entry point for the drawing pad window

use eframe::egui;
use egui::RichText;
use tracing::{error, info};

use crate::canvas::CanvasController;
use crate::config::AppConfig;
use crate::recognition::{RecognitionOutcome, RequestDispatcher};
use crate::ui::components::{render_error_dialog, RequestStatus};
use crate::ui::shortcuts::{describe, poll_shortcuts};
use crate::ui::state::{LastOutcome, PadAction, UiState};
use crate::ui::theme::{self, ThemeColors};
use crate::ui::views::{render_pad, render_prediction, render_toolbar};

/// The drawing pad application
pub struct DigitCanvasApp {
    controller: CanvasController,
    dispatcher: RequestDispatcher,
    state: UiState,
    /// Whether theme has been applied
    theme_applied: bool,
}

impl DigitCanvasApp {
    pub fn new(config: &AppConfig, dispatcher: RequestDispatcher) -> Self {
        Self {
            controller: CanvasController::with_pen_width(config.canvas.effective_pen_width()),
            dispatcher,
            state: UiState::default(),
            theme_applied: false,
        }
    }

    /// Create eframe options for the window
    pub fn options(config: &AppConfig) -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([config.window.width, config.window.height])
                .with_min_inner_size([480.0, 360.0])
                .with_title("Handwritten Number Recognizer"),
            ..Default::default()
        }
    }

    fn apply_action(&mut self, ctx: &egui::Context, action: PadAction) {
        match action {
            PadAction::Recognize => self.recognize(ctx),
            PadAction::Undo => self.controller.undo(),
            PadAction::Clear => {
                self.controller.clear();
                info!("Canvas cleared");
            }
        }
    }

    /// Encode the drawing and hand it to the dispatcher. In-flight requests
    /// are not cancelled; whichever answer arrives last is shown.
    fn recognize(&mut self, ctx: &egui::Context) {
        match self.controller.encode_png() {
            Ok(png) => {
                let ctx = ctx.clone();
                self.dispatcher.submit(png, move || ctx.request_repaint());
            }
            Err(e) => {
                error!("Failed to encode drawing: {}", e);
                self.state.show_error(format!("Error: {e}"));
            }
        }
    }

    /// Apply finished requests in completion order
    fn process_outcomes(&mut self) {
        for RecognitionOutcome { request_id, result } in self.dispatcher.poll() {
            match result {
                Ok(prediction) => {
                    info!(
                        "Request #{} recognized \"{}\" ({} boxes)",
                        request_id,
                        prediction.predicted,
                        prediction.boxes.len()
                    );
                    self.controller.apply_prediction(prediction);
                    self.state.last_outcome = Some(LastOutcome::Resolved);
                }
                Err(e) => {
                    error!("Request #{} failed: {}", request_id, e);
                    self.state.last_outcome = Some(LastOutcome::Failed);
                    self.state.show_error(format!("Error: {e}"));
                }
            }
        }
    }
}

impl eframe::App for DigitCanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.process_outcomes();

        let interactive = !self.state.is_modal_open();
        let mut actions = if interactive {
            poll_shortcuts(ctx)
        } else {
            Vec::new()
        };
        let status =
            RequestStatus::from_parts(self.dispatcher.in_flight(), self.state.last_outcome);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none()
                .fill(ThemeColors::PANEL)
                .rounding(egui::Rounding::same(16.0))
                .inner_margin(20.0)
                .show(ui, |ui| {
                    ui.heading(RichText::new("Handwritten Number Recognizer").strong());
                    ui.label(
                        RichText::new(
                            "Write digits left to right with small gaps (e.g., 23435). \
                             Click Recognize to see the prediction.",
                        )
                        .size(13.0)
                        .color(ThemeColors::TEXT_MUTED),
                    );
                    ui.label(
                        RichText::new(describe(ctx))
                            .size(11.0)
                            .color(ThemeColors::TEXT_MUTED),
                    );
                    ui.add_space(12.0);

                    ui.add_enabled_ui(interactive, |ui| {
                        actions.extend(render_toolbar(ui, &mut self.controller, status));
                    });
                    ui.add_space(12.0);

                    render_pad(ui, &mut self.controller, &mut self.state.textures, interactive);
                    ui.add_space(16.0);

                    render_prediction(ui, self.controller.prediction());
                });
        });

        for action in actions {
            self.apply_action(ctx, action);
        }

        render_error_dialog(ctx, &mut self.state);
    }
}

/// Run the drawing pad window (blocking)
pub fn run_app(config: AppConfig, dispatcher: RequestDispatcher) -> Result<(), eframe::Error> {
    let options = DigitCanvasApp::options(&config);
    let app = DigitCanvasApp::new(&config, dispatcher);
    eframe::run_native(
        "Handwritten Number Recognizer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
