//! Ink raster the user draws on

use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use std::io::Cursor;

use super::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Background colour of a cleared surface
pub const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Ink colour
pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Fixed-size RGBA raster holding the drawing
#[derive(Debug, Clone)]
pub struct DrawingSurface {
    pixels: RgbaImage,
    /// Bumped on every mutation so views know when to re-upload
    revision: u64,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface {
    /// Create a white surface at the canvas resolution
    pub fn new() -> Self {
        Self {
            pixels: RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, PAPER),
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Raw pixel buffer (row-major RGBA)
    pub fn as_rgba(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    /// True when every pixel is paper white
    #[cfg(test)]
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| *p == PAPER)
    }

    /// Fill the whole surface white
    pub fn fill_white(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = PAPER;
        }
        self.touch();
    }

    /// Copy of the current pixel data
    pub fn snapshot(&self) -> RgbaImage {
        self.pixels.clone()
    }

    /// Replace the pixel data with a previously taken snapshot
    pub fn restore(&mut self, snapshot: RgbaImage) {
        debug_assert_eq!(snapshot.dimensions(), self.pixels.dimensions());
        self.pixels = snapshot;
        self.touch();
    }

    /// Draw a segment with round caps by stamping discs along it.
    ///
    /// Consecutive segments of one stroke overlap at their shared endpoint,
    /// which gives round joins for free.
    /// The segment is first clipped to the surface grown by the pen radius;
    /// stamps beyond that would leave no ink.
    pub fn draw_segment(&mut self, from: (f32, f32), to: (f32, f32), width: f32) {
        let radius = (width / 2.0).round().max(1.0) as i32;
        let reach = radius as f32 + 1.0;
        let lo = (-reach, -reach);
        let hi = (self.width() as f32 + reach, self.height() as f32 + reach);
        let Some((from, to)) = clip_segment(from, to, lo, hi) else {
            return;
        };
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (from.0 + dx * t).round() as i32;
            let y = (from.1 + dy * t).round() as i32;
            draw_filled_circle_mut(&mut self.pixels, (x, y), radius, INK);
        }
        self.touch();
    }

    /// Replace the drawing with an arbitrary image, flattened onto white and
    /// scaled to fit the canvas while keeping its aspect ratio.
    pub fn load_image(&mut self, image: &DynamicImage) {
        let fitted = image.resize(
            self.width(),
            self.height(),
            imageops::FilterType::Triangle,
        );
        let fitted = fitted.to_rgba8();

        let mut paper = RgbaImage::from_pixel(self.width(), self.height(), PAPER);
        let x = (self.width() - fitted.width()) / 2;
        let y = (self.height() - fitted.height()) / 2;
        imageops::overlay(&mut paper, &fitted, x as i64, y as i64);

        self.pixels = paper;
        self.touch();
    }

    /// Encode the surface as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes = Cursor::new(Vec::new());
        self.pixels.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Liang-Barsky clip of `from -> to` against the box `lo..=hi`.
/// Returns `None` when nothing of the segment is inside or the input is not
/// finite.
fn clip_segment(
    from: (f32, f32),
    to: (f32, f32),
    lo: (f32, f32),
    hi: (f32, f32),
) -> Option<((f32, f32), (f32, f32))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    if !(from.0.is_finite() && from.1.is_finite() && dx.is_finite() && dy.is_finite()) {
        return None;
    }

    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    let edges = [
        (-dx, from.0 - lo.0),
        (dx, hi.0 - from.0),
        (-dy, from.1 - lo.1),
        (dy, hi.1 - from.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (from.0 + dx * t0, from.1 + dy * t0),
        (from.0 + dx * t1, from.1 + dy * t1),
    ))
}
