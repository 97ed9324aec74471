//! Recognize / Undo / Clear buttons and the pen-width slider

use egui::{Button, Color32, RichText};

use crate::canvas::{CanvasController, MAX_PEN_WIDTH, MIN_PEN_WIDTH};
use crate::ui::components::{RequestStatus, StatusBadge};
use crate::ui::state::PadAction;
use crate::ui::theme::ThemeColors;

/// Render the toolbar and return the actions clicked this frame
pub fn render_toolbar(
    ui: &mut egui::Ui,
    controller: &mut CanvasController,
    status: RequestStatus,
) -> Vec<PadAction> {
    let mut actions = Vec::new();
    let pending = matches!(status, RequestStatus::Pending(_));

    ui.horizontal(|ui| {
        let recognize_label = if pending { "Recognizing..." } else { "Recognize" };
        let recognize = Button::new(
            RichText::new(recognize_label)
                .strong()
                .color(Color32::WHITE),
        )
        .fill(ThemeColors::BRAND)
        .min_size(egui::vec2(120.0, 36.0));
        if ui.add(recognize).clicked() {
            actions.push(PadAction::Recognize);
        }

        for (label, action) in [("Undo", PadAction::Undo), ("Clear", PadAction::Clear)] {
            let button = Button::new(RichText::new(label).strong())
                .fill(ThemeColors::BUTTON)
                .min_size(egui::vec2(80.0, 36.0));
            if ui.add(button).clicked() {
                actions.push(action);
            }
        }

        StatusBadge::new(status).show(ui);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut width = controller.pen_width();
            let slider = egui::Slider::new(&mut width, MIN_PEN_WIDTH..=MAX_PEN_WIDTH)
                .step_by(1.0)
                .show_value(false);
            if ui.add(slider).changed() {
                controller.set_pen_width(width);
            }
            ui.label(
                RichText::new("Pen width")
                    .size(13.0)
                    .color(ThemeColors::TEXT_MUTED),
            );
        });
    });

    actions
}
