//! Raster surface over a framebuffer.

use super::primitives::{clip_segment, draw_line, draw_rect_outline};
use super::{Surface, TextAnchor, TextMetrics, TextOrientation};
use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::PixelRect;

/// Fixed advance per character used for layout.
pub const GLYPH_ADVANCE: i32 = 6;
/// Ascent of the nominal font.
pub const GLYPH_ASCENT: i32 = 9;
/// Descent of the nominal font.
pub const GLYPH_DESCENT: i32 = 2;

/// [`Surface`] rasterizing lines and rectangles into a [`Framebuffer`].
///
/// There is no font rasterizer: text is measured with a fixed per-character
/// advance so labels lay out identically to other surfaces, but no glyphs
/// are drawn.
#[derive(Debug)]
pub struct Canvas<'a> {
    fb: &'a mut Framebuffer,
    clip: Option<PixelRect>,
}

impl<'a> Canvas<'a> {
    /// Wrap a framebuffer without a clip.
    pub fn new(fb: &'a mut Framebuffer) -> Self {
        Self { fb, clip: None }
    }

    /// Current clip, if any.
    #[must_use]
    pub const fn clip(&self) -> Option<PixelRect> {
        self.clip
    }

    /// The clip rectangle intersected with the framebuffer bounds.
    fn effective_clip(&self) -> PixelRect {
        let bounds = self.fb.bounds();
        match self.clip {
            Some(c) => PixelRect::new(
                c.left.max(bounds.left),
                c.top.max(bounds.top),
                c.right.min(bounds.right),
                c.bottom.min(bounds.bottom),
            ),
            None => bounds,
        }
    }
}

impl Surface for Canvas<'_> {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba, width: f32) {
        let clip = self.effective_clip();
        let thickness = (width.round() as i32).max(1);
        if thickness == 1 {
            draw_line(self.fb, x0, y0, x1, y1, color, clip);
            return;
        }

        // Endpoints may sit at the i32 limits; the offsets below only ever
        // touch the part that survives clipping against a widened rectangle.
        let reach = PixelRect::new(
            clip.left.saturating_sub(thickness),
            clip.top.saturating_sub(thickness),
            clip.right.saturating_add(thickness),
            clip.bottom.saturating_add(thickness),
        );
        let Some((x0, y0, x1, y1)) = clip_segment(x0, y0, x1, y1, reach) else {
            return;
        };

        // Thick lines are drawn as parallel strokes offset across the minor axis.
        let steep = (i64::from(y1) - i64::from(y0)).abs() > (i64::from(x1) - i64::from(x0)).abs();
        let first = -(thickness - 1) / 2;
        for offset in first..first.saturating_add(thickness) {
            if steep {
                let (a, b) = (x0.saturating_add(offset), x1.saturating_add(offset));
                draw_line(self.fb, a, y0, b, y1, color, clip);
            } else {
                let (a, b) = (y0.saturating_add(offset), y1.saturating_add(offset));
                draw_line(self.fb, x0, a, x1, b, color, clip);
            }
        }
    }

    fn draw_rect(&mut self, rect: PixelRect, color: Rgba) {
        let clip = self.effective_clip();
        draw_rect_outline(self.fb, rect, color, clip);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        let clip = self.effective_clip();
        let visible = PixelRect::new(
            rect.left.max(clip.left),
            rect.top.max(clip.top),
            rect.right.min(clip.right),
            rect.bottom.min(clip.bottom),
        );
        self.fb.fill_rect(visible, color);
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        _color: Rgba,
        _anchor: TextAnchor,
        _orientation: TextOrientation,
    ) {
        log::trace!("canvas skips glyphs for {text:?} at ({x}, {y})");
    }

    fn measure_text(&self, text: &str) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as i32 * GLYPH_ADVANCE,
            ascent: GLYPH_ASCENT,
            descent: GLYPH_DESCENT,
        }
    }

    fn set_clip(&mut self, clip: Option<PixelRect>) {
        self.clip = clip;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_fb(w: u32, h: u32) -> Framebuffer {
        let mut fb = Framebuffer::new(w, h).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);
        fb
    }

    #[test]
    fn test_clip_limits_lines() {
        let mut fb = white_fb(50, 50);
        {
            let mut canvas = Canvas::new(&mut fb);
            canvas.set_clip(Some(PixelRect::new(10, 10, 20, 20)));
            canvas.draw_line(0, 15, 49, 15, Rgba::BLACK, 1.0);
        }
        assert_eq!(fb.get_pixel(9, 15), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(15, 15), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(21, 15), Some(Rgba::WHITE));
    }

    #[test]
    fn test_clip_reset() {
        let mut fb = white_fb(50, 50);
        {
            let mut canvas = Canvas::new(&mut fb);
            canvas.set_clip(Some(PixelRect::new(10, 10, 20, 20)));
            canvas.set_clip(None);
            assert_eq!(canvas.clip(), None);
            canvas.draw_line(0, 30, 49, 30, Rgba::BLACK, 1.0);
        }
        assert_eq!(fb.get_pixel(0, 30), Some(Rgba::BLACK));
    }

    #[test]
    fn test_thick_line() {
        let mut fb = white_fb(50, 50);
        Canvas::new(&mut fb).draw_line(5, 25, 45, 25, Rgba::RED, 3.0);
        assert_eq!(fb.get_pixel(20, 24), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(20, 25), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(20, 26), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(20, 27), Some(Rgba::WHITE));
    }

    #[test]
    fn test_saturated_endpoints() {
        for (width, rows) in [(1.0, 1), (2.0, 2), (4.0, 4)] {
            let mut fb = white_fb(50, 50);
            Canvas::new(&mut fb).draw_line(i32::MIN, 20, i32::MAX, 20, Rgba::RED, width);
            let painted = (0..50)
                .filter(|&y| fb.get_pixel(25, y) == Some(Rgba::RED))
                .count();
            assert_eq!(painted, rows, "width {width}");
        }

        let mut fb = white_fb(50, 50);
        Canvas::new(&mut fb).draw_line(25, i32::MIN, 25, i32::MAX, Rgba::RED, 3.0);
        assert_eq!(fb.get_pixel(24, 0), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(26, 49), Some(Rgba::RED));
    }

    #[test]
    fn test_thick_line_missing_clip_draws_nothing() {
        let mut fb = white_fb(50, 50);
        Canvas::new(&mut fb).draw_line(i32::MIN, -100, -100, i32::MIN, Rgba::RED, 3.0);
        assert!((0..50).all(|x| (0..50).all(|y| fb.get_pixel(x, y) == Some(Rgba::WHITE))));
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut fb = white_fb(50, 50);
        {
            let mut canvas = Canvas::new(&mut fb);
            canvas.set_clip(Some(PixelRect::new(0, 0, 9, 9)));
            canvas.fill_rect(PixelRect::new(5, 5, 30, 30), Rgba::BLUE);
        }
        assert_eq!(fb.get_pixel(9, 9), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(10, 10), Some(Rgba::WHITE));
    }

    #[test]
    fn test_measure_text() {
        let mut fb = white_fb(10, 10);
        let canvas = Canvas::new(&mut fb);
        let m = canvas.measure_text("0.25");
        assert_eq!(m.width, 4 * GLYPH_ADVANCE);
        assert_eq!(m.height(), GLYPH_ASCENT + GLYPH_DESCENT);
    }
}
