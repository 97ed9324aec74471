//! Prediction readout under the pad

use egui::RichText;

use crate::recognition::Prediction;
use crate::ui::theme::ThemeColors;

/// Text shown in place of the predicted digits
pub fn display_text(prediction: Option<&Prediction>) -> &str {
    prediction.map(|p| p.predicted.as_str()).unwrap_or("-")
}

pub fn render_prediction(ui: &mut egui::Ui, prediction: Option<&Prediction>) {
    ui.label(
        RichText::new("Prediction")
            .size(13.0)
            .color(ThemeColors::TEXT_MUTED),
    );
    ui.label(
        RichText::new(display_text(prediction))
            .size(30.0)
            .strong()
            .extra_letter_spacing(1.0)
            .color(ThemeColors::TEXT),
    );

    if let Some(summary) = prediction.and_then(Prediction::per_digit_summary) {
        ui.add_space(4.0);
        ui.label(
            RichText::new(summary)
                .size(13.0)
                .color(ThemeColors::TEXT_MUTED),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        assert_eq!(display_text(None), "-");
        let prediction = Prediction {
            predicted: "23".to_string(),
            boxes: Vec::new(),
            per_digit: None,
        };
        assert_eq!(display_text(Some(&prediction)), "23");
    }
}
