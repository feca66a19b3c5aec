//! Pan and zoom math.
//!
//! Every function here is pure: it reads ruler state and returns new limits,
//! or `None` when the result would not be a finite, strictly increasing
//! range. Applying the limits is up to the caller (see
//! [`PlotBox::zoom_box`](crate::plot_box::PlotBox::zoom_box) and friends).

use crate::geometry::{PixelPoint, PixelRect};
use crate::ruler::Ruler;

/// Lower and upper value limits.
pub type Limits = (f32, f32);

/// Wheel zoom factor toward the user (zoom in).
pub const WHEEL_ZOOM_IN: f32 = 0.8;

/// Wheel zoom factor away from the user (zoom out).
pub const WHEEL_ZOOM_OUT: f32 = 1.25;

/// Minimum side length, in pixels, of a drag that counts as zoom selection.
pub const MIN_SELECTION: i32 = 5;

/// Independent results for the two axes of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisUpdate {
    /// New X limits, if valid.
    pub x: Option<Limits>,
    /// New Y limits, if valid.
    pub y: Option<Limits>,
}

fn accept(lower: f32, upper: f32) -> Option<Limits> {
    (lower.is_finite() && upper.is_finite() && lower < upper).then_some((lower, upper))
}

/// Limits spanning the values under two pixel coordinates of one ruler.
#[must_use]
pub fn zoom_range(ruler: &Ruler, a: i32, b: i32) -> Option<Limits> {
    let va = ruler.to_value(a);
    let vb = ruler.to_value(b);
    accept(va.min(vb), va.max(vb))
}

/// Zoom both axes to the rectangle dragged from `start` to `end`.
#[must_use]
pub fn zoom_box(x_ruler: &Ruler, y_ruler: &Ruler, start: PixelPoint, end: PixelPoint) -> AxisUpdate {
    AxisUpdate {
        x: zoom_range(x_ruler, start.x, end.x),
        y: zoom_range(y_ruler, start.y, end.y),
    }
}

/// Scale the range of one ruler by `factor` around the value under `pixel`.
///
/// The value under the pointer and its relative position within the range
/// stay put; `factor < 1` zooms in.
#[must_use]
pub fn zoom_at_point(ruler: &Ruler, pixel: i32, factor: f32) -> Option<Limits> {
    let (lower, upper) = ruler.limits();
    let range = upper - lower;
    let value = ruler.to_value(pixel);
    let ratio = (value - lower) / range;
    let new_range = range * factor;
    accept(value - new_range * ratio, value + new_range * (1.0 - ratio))
}

/// Shift one ruler so the content follows a drag of `delta` pixels.
#[must_use]
pub fn pan_ruler(ruler: &Ruler, delta: i32) -> Option<Limits> {
    let (lower, upper) = ruler.limits();
    let (start, end) = ruler.pixel_range();
    let shift = delta as f32 * (upper - lower) / (end - start) as f32;
    accept(lower - shift, upper - shift)
}

/// Pan both axes by a drag of `(dx, dy)` pixels.
#[must_use]
pub fn pan(x_ruler: &Ruler, y_ruler: &Ruler, dx: i32, dy: i32) -> AxisUpdate {
    AxisUpdate {
        x: pan_ruler(x_ruler, dx),
        y: pan_ruler(y_ruler, dy),
    }
}

/// The drag rectangle from `start` to `current`, clamped to the box.
#[must_use]
pub fn clamp_selection(box_rect: PixelRect, start: PixelPoint, current: PixelPoint) -> PixelRect {
    PixelRect::from_corners(box_rect.clamp_point(start), box_rect.clamp_point(current))
}

/// Whether both sides of `rect` exceed `min` pixels.
#[must_use]
pub fn is_zoom_selection(rect: PixelRect, min: i32) -> bool {
    rect.width() > min && rect.height() > min
}

/// Zoom factor for a wheel rotation: negative rotations zoom in.
#[must_use]
pub fn wheel_factor(rotation: i32, zoom_in: f32, zoom_out: f32) -> f32 {
    if rotation < 0 {
        zoom_in
    } else {
        zoom_out
    }
}
