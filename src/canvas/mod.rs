//! Drawing Canvas Controller
//!
//! Owns the ink surface, the box overlay, the undo history and the latest
//! prediction. Every drawing operation is synchronous and infallible; the
//! only fallible operation is [`CanvasController::recognize`].

pub mod history;
pub mod overlay;
pub mod surface;

pub use history::UndoHistory;
pub use overlay::OverlaySurface;
pub use surface::DrawingSurface;

use image::DynamicImage;
use tracing::debug;

use crate::recognition::{Prediction, RecognitionError, RecognitionService};

/// Drawing surface width in pixels
pub const CANVAS_WIDTH: u32 = 800;
/// Drawing surface height in pixels
pub const CANVAS_HEIGHT: u32 = 160;
/// Maximum number of undo snapshots kept
pub const HISTORY_DEPTH: usize = 10;
pub const MIN_PEN_WIDTH: f32 = 6.0;
pub const MAX_PEN_WIDTH: f32 = 36.0;
pub const DEFAULT_PEN_WIDTH: f32 = 18.0;

/// Clamp a requested pen width into the supported range
pub fn clamp_pen_width(width: f32) -> f32 {
    width.clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH)
}

/// Transient state for one pointer-down-to-pointer-up interaction
#[derive(Debug, Clone, Copy, Default)]
struct StrokeSession {
    active: bool,
    last: (f32, f32),
}

/// Controller behind the drawing pad
#[derive(Debug)]
pub struct CanvasController {
    surface: DrawingSurface,
    overlay: OverlaySurface,
    history: UndoHistory,
    stroke: StrokeSession,
    pen_width: f32,
    prediction: Option<Prediction>,
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasController {
    pub fn new() -> Self {
        Self::with_pen_width(DEFAULT_PEN_WIDTH)
    }

    /// Create a controller with an initial pen width (clamped)
    pub fn with_pen_width(pen_width: f32) -> Self {
        let mut controller = Self {
            surface: DrawingSurface::new(),
            overlay: OverlaySurface::new(),
            history: UndoHistory::new(HISTORY_DEPTH),
            stroke: StrokeSession::default(),
            pen_width: DEFAULT_PEN_WIDTH,
            prediction: None,
        };
        controller.set_pen_width(pen_width);
        controller
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn overlay(&self) -> &OverlaySurface {
        &self.overlay
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    pub fn pen_width(&self) -> f32 {
        self.pen_width
    }

    #[cfg(test)]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.active
    }

    /// Snapshot the raster and start a new stroke at (x, y)
    pub fn begin_stroke(&mut self, x: f32, y: f32) {
        self.history.push(self.surface.snapshot());
        self.stroke = StrokeSession {
            active: true,
            last: (x, y),
        };
        debug!("Stroke started at ({:.1}, {:.1}), history depth {}", x, y, self.history.len());
    }

    /// Draw from the last point to (x, y) if a stroke is active.
    /// Non-finite points are skipped.
    pub fn extend_stroke(&mut self, x: f32, y: f32) {
        if !self.stroke.active || !x.is_finite() || !y.is_finite() {
            return;
        }
        self.surface.draw_segment(self.stroke.last, (x, y), self.pen_width);
        self.stroke.last = (x, y);
    }

    pub fn end_stroke(&mut self) {
        self.stroke.active = false;
    }

    /// Restore the most recent snapshot, if any
    pub fn undo(&mut self) {
        match self.history.pop() {
            Some(snapshot) => {
                self.surface.restore(snapshot);
                debug!("Undo applied, {} snapshots left", self.history.len());
            }
            None => debug!("Undo requested with empty history"),
        }
    }

    /// White out the drawing, wipe the overlay and drop the prediction.
    /// Undo history is kept.
    pub fn clear(&mut self) {
        self.surface.fill_white();
        self.overlay.clear();
        self.prediction = None;
    }

    /// Set the pen width for subsequent strokes, clamped to [6, 36]
    pub fn set_pen_width(&mut self, width: f32) {
        if width.is_nan() {
            return;
        }
        self.pen_width = clamp_pen_width(width);
    }

    /// Replace the drawing with an external image
    pub fn load_image(&mut self, image: &DynamicImage) {
        self.surface.load_image(image);
    }

    /// Encode the current drawing as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, RecognitionError> {
        Ok(self.surface.encode_png()?)
    }

    /// Store a successful prediction and redraw its boxes
    pub fn apply_prediction(&mut self, prediction: Prediction) {
        self.overlay.draw_boxes(&prediction.boxes);
        self.prediction = Some(prediction);
    }

    /// Send the drawing to `service` and apply the response.
    ///
    /// On failure nothing is changed and the error is returned to the caller.
    pub async fn recognize<S>(&mut self, service: &S) -> Result<&Prediction, RecognitionError>
    where
        S: RecognitionService + ?Sized,
    {
        let png = self.encode_png()?;
        let prediction = service.predict(png).await?;
        self.overlay.draw_boxes(&prediction.boxes);
        Ok(self.prediction.insert(prediction))
    }
}
