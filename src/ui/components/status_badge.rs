//! Request status indicator shown next to the toolbar

use egui::{Color32, RichText, Vec2};

use crate::ui::state::LastOutcome;
use crate::ui::theme::ThemeColors;

/// Lifecycle of recognition requests as seen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Idle,
    Pending(usize),
    Resolved,
    Failed,
}

impl RequestStatus {
    /// Derive the status from the in-flight count and the last outcome
    pub fn from_parts(in_flight: usize, last: Option<LastOutcome>) -> Self {
        match (in_flight, last) {
            (n, _) if n > 0 => RequestStatus::Pending(n),
            (_, Some(LastOutcome::Resolved)) => RequestStatus::Resolved,
            (_, Some(LastOutcome::Failed)) => RequestStatus::Failed,
            (_, None) => RequestStatus::Idle,
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            RequestStatus::Idle => ThemeColors::TEXT_MUTED,
            RequestStatus::Pending(_) => ThemeColors::BRAND,
            RequestStatus::Resolved => ThemeColors::SUCCESS,
            RequestStatus::Failed => ThemeColors::ERROR,
        }
    }

    pub fn label(&self) -> String {
        match self {
            RequestStatus::Idle => "Idle".to_string(),
            RequestStatus::Pending(1) => "Recognizing...".to_string(),
            RequestStatus::Pending(n) => format!("Recognizing... ({n} pending)"),
            RequestStatus::Resolved => "Done".to_string(),
            RequestStatus::Failed => "Failed".to_string(),
        }
    }
}

/// Dot plus label
pub struct StatusBadge {
    pub status: RequestStatus,
}

impl StatusBadge {
    pub fn new(status: RequestStatus) -> Self {
        Self { status }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.0), egui::Sense::hover());
            ui.painter()
                .circle_filled(rect.center(), 4.0, self.status.color());
            ui.label(
                RichText::new(self.status.label())
                    .size(13.0)
                    .color(ThemeColors::TEXT_MUTED),
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lifecycle() {
        assert_eq!(RequestStatus::from_parts(0, None), RequestStatus::Idle);
        assert_eq!(
            RequestStatus::from_parts(2, Some(LastOutcome::Failed)),
            RequestStatus::Pending(2)
        );
        assert_eq!(
            RequestStatus::from_parts(0, Some(LastOutcome::Resolved)),
            RequestStatus::Resolved
        );
        assert_eq!(
            RequestStatus::from_parts(0, Some(LastOutcome::Failed)),
            RequestStatus::Failed
        );
        assert_eq!(RequestStatus::Pending(3).label(), "Recognizing... (3 pending)");
    }
}
