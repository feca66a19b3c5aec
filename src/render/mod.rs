//! Drawing surfaces.
//!
//! Boxes and rulers never talk to a pixel buffer directly; they draw through
//! the [`Surface`] trait. [`Canvas`] rasterizes into a
//! [`Framebuffer`](crate::framebuffer::Framebuffer) and
//! [`SvgSurface`](crate::output::SvgSurface) records vector elements.
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Liang, Y.-D., & Barsky, B. A. (1984). "A new concept and method for line clipping."

mod canvas;
mod primitives;

pub use canvas::Canvas;
pub use primitives::{clip_segment, draw_line, draw_rect_outline};

use crate::color::Rgba;
use crate::geometry::PixelRect;

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Text starts at the anchor.
    #[default]
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

/// Text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextOrientation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Bottom to top (rotated 90 degrees counter-clockwise).
    Vertical,
}

/// Size of a rendered string in pixels, measured along its own baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextMetrics {
    /// Advance width.
    pub width: i32,
    /// Ascent above the baseline.
    pub ascent: i32,
    /// Descent below the baseline.
    pub descent: i32,
}

impl TextMetrics {
    /// Ascent plus descent.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.ascent + self.descent
    }
}

/// A drawing target.
///
/// Coordinates are integer pixels with the origin at the top-left. Every
/// primitive respects the clip rectangle set with [`Surface::set_clip`].
pub trait Surface {
    /// Draw a straight line segment between two points (both inclusive).
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba, width: f32);

    /// Outline a rectangle along its four (inclusive) edges.
    fn draw_rect(&mut self, rect: PixelRect, color: Rgba);

    /// Fill a rectangle, edges inclusive.
    fn fill_rect(&mut self, rect: PixelRect, color: Rgba);

    /// Draw text with its baseline at `y`.
    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        color: Rgba,
        anchor: TextAnchor,
        orientation: TextOrientation,
    );

    /// Measure a string as [`Surface::draw_text`] would render it.
    fn measure_text(&self, text: &str) -> TextMetrics;

    /// Restrict drawing to `clip`, or lift the restriction with `None`.
    fn set_clip(&mut self, clip: Option<PixelRect>);
}
