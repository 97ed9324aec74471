//! Transparent raster used to show recognised bounding boxes

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use super::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::recognition::BoundingBox;

/// rgba(47,129,247,0.9)
pub const BOX_COLOR: Rgba<u8> = Rgba([47, 129, 247, 230]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Box layer sharing the drawing surface's coordinate space
#[derive(Debug, Clone)]
pub struct OverlaySurface {
    pixels: RgbaImage,
    revision: u64,
}

impl Default for OverlaySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlaySurface {
    pub fn new() -> Self {
        Self {
            pixels: RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, CLEAR),
            revision: 0,
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn as_rgba(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    #[cfg(test)]
    pub fn is_clear(&self) -> bool {
        self.pixels.pixels().all(|p| p[3] == 0)
    }

    /// Wipe the layer and draw each box as a 2px outline
    pub fn draw_boxes(&mut self, boxes: &[BoundingBox]) {
        self.wipe();
        for bounds in boxes {
            let (left, top, right, bottom) = clip_edges(bounds.pixel_edges());
            // Outline centred on the box edge: one pixel inside, one outside
            for grow in 0..2 {
                let x = left - grow;
                let y = top - grow;
                let w = (right - left + 1 + 2 * grow).max(1) as u32;
                let h = (bottom - top + 1 + 2 * grow).max(1) as u32;
                draw_hollow_rect_mut(&mut self.pixels, Rect::at(x, y).of_size(w, h), BOX_COLOR);
            }
        }
        self.revision = self.revision.wrapping_add(1);
    }

    /// Remove every box
    pub fn clear(&mut self) {
        self.draw_boxes(&[]);
    }

    fn wipe(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = CLEAR;
        }
    }
}

/// Pull box edges to just outside the layer so the outline arithmetic stays
/// small; an edge beyond the margin is never visible anyway.
fn clip_edges((left, top, right, bottom): (i32, i32, i32, i32)) -> (i32, i32, i32, i32) {
    const MARGIN: i32 = 2;
    let clip_x = |v: i32| v.clamp(-MARGIN, CANVAS_WIDTH as i32 + MARGIN);
    let clip_y = |v: i32| v.clamp(-MARGIN, CANVAS_HEIGHT as i32 + MARGIN);
    (clip_x(left), clip_y(top), clip_x(right), clip_y(bottom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_overlay_is_clear() {
        let overlay = OverlaySurface::new();
        assert!(overlay.is_clear());
    }

    #[test]
    fn test_box_outline_position() {
        let mut overlay = OverlaySurface::new();
        overlay.draw_boxes(&[BoundingBox::new(10.0, 20.0, 30.0, 60.0)]);

        // Corners and edges
        assert_eq!(overlay.pixel(10, 20), BOX_COLOR);
        assert_eq!(overlay.pixel(30, 60), BOX_COLOR);
        assert_eq!(overlay.pixel(20, 20), BOX_COLOR);
        assert_eq!(overlay.pixel(10, 40), BOX_COLOR);
        assert_eq!(overlay.pixel(9, 40), BOX_COLOR);
        // Interior and far outside stay transparent
        assert_eq!(overlay.pixel(20, 40)[3], 0);
        assert_eq!(overlay.pixel(5, 40)[3], 0);
    }

    #[test]
    fn test_redraw_replaces_previous_boxes() {
        let mut overlay = OverlaySurface::new();
        overlay.draw_boxes(&[BoundingBox::new(100.0, 20.0, 150.0, 60.0)]);
        overlay.draw_boxes(&[BoundingBox::new(10.0, 20.0, 30.0, 60.0)]);

        assert_eq!(overlay.pixel(100, 20)[3], 0);
        assert_eq!(overlay.pixel(10, 20), BOX_COLOR);
    }

    #[test]
    fn test_degenerate_and_offscreen_boxes_do_not_panic() {
        let mut overlay = OverlaySurface::new();
        overlay.draw_boxes(&[
            BoundingBox::new(5.0, 5.0, 5.0, 5.0),
            BoundingBox::new(60.0, 60.0, 40.0, 40.0),
            BoundingBox::new(790.0, 150.0, 900.0, 400.0),
            BoundingBox::new(-100.0, -100.0, -50.0, -50.0),
        ]);
        assert_eq!(overlay.pixel(5, 5), BOX_COLOR);
        // Reversed corners are normalised
        assert_eq!(overlay.pixel(40, 40), BOX_COLOR);
    }

    #[test]
    fn test_huge_coordinates_are_clipped() {
        let prediction: crate::recognition::Prediction = serde_json::from_str(
            r#"{"predicted":"1","boxes":[[-3000000000,0,3000000000,60],[1e30,-1e30,-1e30,1e30]]}"#,
        )
        .unwrap();

        let mut overlay = OverlaySurface::new();
        overlay.draw_boxes(&prediction.boxes);

        // Top and bottom edges of the first box run across the whole layer
        assert_eq!(overlay.pixel(0, 0), BOX_COLOR);
        assert_eq!(overlay.pixel(799, 60), BOX_COLOR);
        assert_eq!(overlay.pixel(400, 30)[3], 0);
    }

    #[test]
    fn test_clear_wipes_layer() {
        let mut overlay = OverlaySurface::new();
        overlay.draw_boxes(&[BoundingBox::new(10.0, 20.0, 30.0, 60.0)]);
        overlay.clear();
        assert!(overlay.is_clear());
    }
}
