//! Keyboard shortcuts for the pad

use egui::{Key, KeyboardShortcut, Modifiers};

use crate::ui::state::PadAction;

/// A keyboard shortcut bound to a pad action
#[derive(Debug, Clone, Copy)]
pub struct Shortcut {
    pub shortcut: KeyboardShortcut,
    pub action: PadAction,
    pub description: &'static str,
}

impl Shortcut {
    const fn new(key: Key, action: PadAction, description: &'static str) -> Self {
        Self {
            shortcut: KeyboardShortcut::new(Modifiers::COMMAND, key),
            action,
            description,
        }
    }
}

pub const SHORTCUTS: [Shortcut; 3] = [
    Shortcut::new(Key::Enter, PadAction::Recognize, "Recognize"),
    Shortcut::new(Key::Z, PadAction::Undo, "Undo"),
    Shortcut::new(Key::Delete, PadAction::Clear, "Clear"),
];

/// Consume any pressed shortcuts and return their actions
pub fn poll_shortcuts(ctx: &egui::Context) -> Vec<PadAction> {
    ctx.input_mut(|input| {
        SHORTCUTS
            .iter()
            .filter(|s| input.consume_shortcut(&s.shortcut))
            .map(|s| s.action)
            .collect()
    })
}

/// "Ctrl+Enter recognize, Ctrl+Z undo, ..." for the hint line
pub fn describe(ctx: &egui::Context) -> String {
    SHORTCUTS
        .iter()
        .map(|s| format!("{} {}", ctx.format_shortcut(&s.shortcut), s.description.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" · ")
}
