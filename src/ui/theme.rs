//! Dark theme for the drawing pad window

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

/// Colour palette
pub struct ThemeColors;

impl ThemeColors {
    // Backgrounds
    pub const BG: Color32 = Color32::from_rgb(11, 12, 16);
    pub const PANEL: Color32 = Color32::from_rgb(21, 24, 30);
    pub const BUTTON: Color32 = Color32::from_rgb(57, 66, 78);
    pub const BUTTON_HOVER: Color32 = Color32::from_rgb(72, 83, 98);

    // Accent
    pub const BRAND: Color32 = Color32::from_rgb(47, 129, 247);
    pub const ERROR: Color32 = Color32::from_rgb(231, 76, 60);
    pub const SUCCESS: Color32 = Color32::from_rgb(46, 204, 113);

    // Text
    pub const TEXT: Color32 = Color32::from_rgb(232, 238, 242);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(154, 166, 178);

    pub const BORDER: Color32 = Color32::from_rgb(42, 47, 54);
}

/// Apply the theme to egui
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let mut visuals = Visuals::dark();

    visuals.window_fill = ThemeColors::PANEL;
    visuals.panel_fill = ThemeColors::BG;
    visuals.faint_bg_color = ThemeColors::PANEL;
    visuals.extreme_bg_color = ThemeColors::BG;

    visuals.widgets.noninteractive.bg_fill = ThemeColors::PANEL;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, ThemeColors::TEXT_MUTED);
    visuals.widgets.noninteractive.rounding = Rounding::same(8.0);

    visuals.widgets.inactive.bg_fill = ThemeColors::BUTTON;
    visuals.widgets.inactive.weak_bg_fill = ThemeColors::BUTTON;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, ThemeColors::TEXT);
    visuals.widgets.inactive.rounding = Rounding::same(12.0);

    visuals.widgets.hovered.bg_fill = ThemeColors::BUTTON_HOVER;
    visuals.widgets.hovered.weak_bg_fill = ThemeColors::BUTTON_HOVER;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, ThemeColors::TEXT);
    visuals.widgets.hovered.rounding = Rounding::same(12.0);

    visuals.widgets.active.bg_fill = ThemeColors::BRAND;
    visuals.widgets.active.weak_bg_fill = ThemeColors::BRAND;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(12.0);

    visuals.selection.bg_fill = color_with_alpha(ThemeColors::BRAND, 77);
    visuals.selection.stroke = Stroke::new(1.0, ThemeColors::BRAND);

    visuals.window_rounding = Rounding::same(16.0);
    visuals.window_shadow.blur = 24.0;
    visuals.window_stroke = Stroke::new(1.0, ThemeColors::BORDER);

    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(12.0, 8.0);
    style.spacing.button_padding = egui::vec2(16.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(20.0);

    style.text_styles = [
        (TextStyle::Small, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(15.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(15.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(24.0, FontFamily::Proportional)),
    ]
    .into();

    ctx.set_style(style);
}

/// Helper to create a color with modified alpha
pub fn color_with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
