//! Blocking error notification

use egui::{Align2, RichText};

use crate::ui::state::UiState;
use crate::ui::theme::ThemeColors;

/// Show the error dialog while `state.error` is set. The rest of the window
/// is disabled by the caller until it is dismissed.
pub fn render_error_dialog(ctx: &egui::Context, state: &mut UiState) {
    let Some(message) = state.error.clone() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new(RichText::new("Recognition failed").color(ThemeColors::ERROR))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_max_width(420.0);
            ui.label(RichText::new(&message).color(ThemeColors::TEXT));
            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        state.dismiss_error();
    }
}
