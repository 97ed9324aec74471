//! UI-side state that is not part of the canvas controller

use egui::{ColorImage, TextureHandle, TextureOptions};

use crate::canvas::{CanvasController, CANVAS_HEIGHT, CANVAS_WIDTH};

/// User intent gathered from buttons and shortcuts in one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadAction {
    Recognize,
    Undo,
    Clear,
}

/// How the most recent request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastOutcome {
    Resolved,
    Failed,
}

/// A texture mirrored from a raster, re-uploaded when its revision changes
#[derive(Default)]
pub struct MirroredTexture {
    handle: Option<TextureHandle>,
    revision: Option<u64>,
}

impl MirroredTexture {
    /// Upload `rgba` if the texture is missing or stale
    pub fn sync(&mut self, ctx: &egui::Context, name: &str, revision: u64, rgba: &[u8]) {
        if self.revision == Some(revision) && self.handle.is_some() {
            return;
        }

        let image = ColorImage::from_rgba_unmultiplied(
            [CANVAS_WIDTH as usize, CANVAS_HEIGHT as usize],
            rgba,
        );
        match self.handle {
            Some(ref mut texture) => texture.set(image, TextureOptions::LINEAR),
            None => self.handle = Some(ctx.load_texture(name, image, TextureOptions::LINEAR)),
        }
        self.revision = Some(revision);
    }

    pub fn id(&self) -> Option<egui::TextureId> {
        self.handle.as_ref().map(|t| t.id())
    }
}

/// Textures for both canvas layers
#[derive(Default)]
pub struct PadTextures {
    pub ink: MirroredTexture,
    pub overlay: MirroredTexture,
}

impl PadTextures {
    pub fn sync(&mut self, ctx: &egui::Context, controller: &CanvasController) {
        let surface = controller.surface();
        self.ink.sync(ctx, "ink", surface.revision(), surface.as_rgba());

        let overlay = controller.overlay();
        self.overlay
            .sync(ctx, "overlay", overlay.revision(), overlay.as_rgba());
    }
}

/// Window state
#[derive(Default)]
pub struct UiState {
    pub textures: PadTextures,
    /// Message for the blocking error dialog
    pub error: Option<String>,
    pub last_outcome: Option<LastOutcome>,
}

impl UiState {
    /// Whether input to the pad should be blocked
    pub fn is_modal_open(&self) -> bool {
        self.error.is_some()
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_blocks_until_dismissed() {
        let mut state = UiState::default();
        assert!(!state.is_modal_open());

        state.show_error("Error: server returned 500");
        assert!(state.is_modal_open());

        state.dismiss_error();
        assert!(!state.is_modal_open());
    }
}
