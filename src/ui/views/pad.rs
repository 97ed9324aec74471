//! Drawing area: ink texture with the box overlay on top

use egui::{pos2, Color32, CursorIcon, PointerButton, Pos2, Rect, Rounding, Sense, Stroke};

use crate::canvas::{CanvasController, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::ui::state::PadTextures;
use crate::ui::theme::ThemeColors;

/// Map a screen position inside `rect` to drawing-surface pixels
pub fn to_surface_coords(pos: Pos2, rect: Rect) -> (f32, f32) {
    let x = (pos.x - rect.min.x) * (CANVAS_WIDTH as f32 / rect.width());
    let y = (pos.y - rect.min.y) * (CANVAS_HEIGHT as f32 / rect.height());
    (x, y)
}

/// Render the pad and route pointer input to the controller when `interactive`
pub fn render_pad(
    ui: &mut egui::Ui,
    controller: &mut CanvasController,
    textures: &mut PadTextures,
    interactive: bool,
) {
    let native = egui::vec2(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32);
    let scale = (ui.available_width() / native.x).min(1.0);
    let sense = if interactive { Sense::click_and_drag() } else { Sense::hover() };
    let (rect, response) = ui.allocate_exact_size(native * scale, sense);

    if interactive {
        handle_pointer(ui, &response, rect, controller);
        if response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
        }
    } else if controller.is_stroking() {
        controller.end_stroke();
    }

    textures.sync(ui.ctx(), controller);

    let painter = ui.painter_at(rect);
    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    painter.rect_filled(rect, Rounding::ZERO, Color32::WHITE);
    // Both layers share one rect, so box coordinates line up with the ink
    if let Some(ink) = textures.ink.id() {
        painter.image(ink, rect, uv, Color32::WHITE);
    }
    if let Some(overlay) = textures.overlay.id() {
        painter.image(overlay, rect, uv, Color32::WHITE);
    }
    ui.painter().rect_stroke(
        rect.expand(1.0),
        Rounding::same(4.0),
        Stroke::new(1.0, ThemeColors::BORDER),
    );
}

/// Primary-button state for one frame, positions already in surface pixels
#[derive(Debug, Clone, Copy, Default)]
pub struct PadPointer {
    /// Button went down on the pad this frame
    pub pressed: bool,
    /// Button is held
    pub down: bool,
    /// Pointer position, `None` when outside the pad
    pub pos: Option<(f32, f32)>,
}

/// Feed one frame of pointer input to the controller.
///
/// A press starts a stroke (and its undo snapshot) immediately, so a click
/// without movement still counts. Release or leaving the pad ends it.
pub fn apply_pointer(controller: &mut CanvasController, pointer: PadPointer) {
    if pointer.pressed {
        if let Some((x, y)) = pointer.pos {
            controller.begin_stroke(x, y);
            if !pointer.down {
                controller.end_stroke();
            }
        }
        return;
    }

    if !controller.is_stroking() {
        return;
    }

    match pointer.pos {
        Some((x, y)) if pointer.down => controller.extend_stroke(x, y),
        _ => controller.end_stroke(),
    }
}

fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    rect: Rect,
    controller: &mut CanvasController,
) {
    let (pressed, down, press_origin, latest) = ui.input(|i| {
        (
            i.pointer.button_pressed(PointerButton::Primary),
            i.pointer.button_down(PointerButton::Primary),
            i.pointer.press_origin(),
            i.pointer.latest_pos(),
        )
    });

    let pressed = pressed && response.hovered();
    let pos = if pressed { press_origin.or(latest) } else { latest };
    let pointer = PadPointer {
        pressed,
        down,
        pos: pos
            .filter(|p| rect.contains(*p))
            .map(|p| to_surface_coords(p, rect)),
    };
    apply_pointer(controller, pointer);
}
