//! Axis ruler: one-dimensional value to pixel transform with ticks.
//!
//! A ruler holds the value limits of one axis, the pixel span those limits map
//! onto, and the tick values with their labels. Horizontal rulers map
//! increasing values to increasing pixel X. Vertical rulers are stored with a
//! reversed pixel range (`start` at the bottom, `end` at the top) so larger
//! values land higher on screen with the very same formula.
//!
//! ```
//! use axplot::ruler::Ruler;
//!
//! let mut x = Ruler::horizontal();
//! x.set_limits(0.0, 10.0);
//! x.set_pixel_range(100, 600);
//! assert_eq!(x.to_pixel(5.0), 350);
//!
//! x.set_ticks_range(0.0, 2.5, 10.0);
//! assert_eq!(x.tick_labels(), ["0", "2.5", "5", "7.5", "10"]);
//! ```

use crate::color::Rgba;
use crate::render::{Surface, TextAnchor, TextOrientation};

/// Upper bound on generated ticks; larger requests are ignored.
pub const MAX_TICKS: usize = 10_000;

/// Limits reported for a data set without any finite value.
pub const NO_DATA_LIMITS: (f32, f32) = (f32::MIN, f32::MAX);

const MAX_FRACTION_DIGITS: usize = 12;

/// Distance between a tick and its label, in pixels.
const LABEL_GAP: i32 = 5;

/// Whether the ruler runs along X or along Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Along the X axis, placed at a pixel Y.
    Horizontal,
    /// Along the Y axis, placed at a pixel X.
    Vertical,
}

/// Where a ruler sits relative to the perpendicular ruler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RulerLocation {
    /// Bottom for X, left for Y.
    #[default]
    Start,
    /// Top for X, right for Y.
    End,
    /// At the perpendicular ruler's origin.
    Origin,
}

/// Which side of the ruler line tick marks are drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickDirection {
    /// Into the plot box.
    #[default]
    In,
    /// Away from the plot box.
    Out,
    /// Across the ruler line.
    Both,
}

/// One axis of a plot box.
#[derive(Debug, Clone)]
pub struct Ruler {
    orientation: Orientation,
    lower: f32,
    upper: f32,
    ticks: Vec<f32>,
    tick_labels: Vec<String>,
    pixel_start: i32,
    pixel_end: i32,
    origin: f32,
    location: RulerLocation,
    tick_direction: TickDirection,
    placement: i32,
    tick_length: i32,
    color: Option<Rgba>,
    visible: bool,
    label: Option<String>,
}

impl Ruler {
    /// New ruler with limits `[0, 1]` and ticks `0, 0.2, ..., 1`.
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        let mut ruler = Self {
            orientation,
            lower: 0.0,
            upper: 1.0,
            ticks: Vec::new(),
            tick_labels: Vec::new(),
            pixel_start: 0,
            pixel_end: 0,
            origin: 0.0,
            location: RulerLocation::Start,
            tick_direction: TickDirection::In,
            placement: 0,
            tick_length: 5,
            color: None,
            visible: true,
            label: None,
        };
        ruler.set_ticks_range(0.0, 0.2, 1.0);
        ruler
    }

    /// New X ruler.
    #[must_use]
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// New Y ruler.
    #[must_use]
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Axis direction.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    // ========================================================================
    // Limits and ticks
    // ========================================================================

    /// Set the value limits. Ticks and labels are left untouched.
    pub fn set_limits(&mut self, lower: f32, upper: f32) {
        self.lower = lower;
        self.upper = upper;
    }

    /// Current `(lower, upper)` limits.
    #[must_use]
    pub const fn limits(&self) -> (f32, f32) {
        (self.lower, self.upper)
    }

    /// `upper - lower`.
    #[must_use]
    pub fn span(&self) -> f32 {
        self.upper - self.lower
    }

    /// True when the limits are finite and strictly increasing, the only case
    /// in which [`Ruler::to_pixel`] is meaningful.
    #[must_use]
    pub fn has_usable_limits(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite() && self.upper > self.lower
    }

    /// Generate ticks `lower, lower + step, ...` up to `upper`.
    ///
    /// The command is ignored for non-finite input, a non-positive step, the
    /// [`NO_DATA_LIMITS`] pair, or when the tick count would be below one or
    /// above [`MAX_TICKS`]. Labels are regenerated from the current limits.
    pub fn set_ticks_range(&mut self, lower: f32, step: f32, upper: f32) {
        if !lower.is_finite() || !step.is_finite() || !upper.is_finite() {
            log::debug!("ignoring ticks {lower}:{step}:{upper}, non-finite input");
            return;
        }
        if (lower, upper) == NO_DATA_LIMITS {
            log::debug!("ignoring ticks for the no-data limits");
            return;
        }
        if step <= 0.0 {
            log::debug!("ignoring ticks with step {step}");
            return;
        }

        let count = ((f64::from(upper) - f64::from(lower)) / f64::from(step)).round() + 1.0;
        if !(1.0..=MAX_TICKS as f64).contains(&count) {
            log::debug!("ignoring ticks {lower}:{step}:{upper}, {count} ticks requested");
            return;
        }

        self.ticks = (0..count as usize)
            .map(|i| lower + i as f32 * step)
            .collect();
        self.regenerate_labels();
    }

    /// Replace the ticks verbatim and regenerate their labels.
    pub fn set_ticks(&mut self, ticks: Vec<f32>) {
        self.ticks = ticks;
        self.regenerate_labels();
    }

    /// Tick values.
    #[must_use]
    pub fn ticks(&self) -> &[f32] {
        &self.ticks
    }

    /// Tick labels, one per tick.
    #[must_use]
    pub fn tick_labels(&self) -> &[String] {
        &self.tick_labels
    }

    fn regenerate_labels(&mut self) {
        let digits = fraction_digits(self.lower, self.upper);
        self.tick_labels = self.ticks.iter().map(|&t| format_tick(t, digits)).collect();
    }

    // ========================================================================
    // Pixel transform
    // ========================================================================

    /// Set the pixel coordinates the lower and upper limits map to.
    pub fn set_pixel_range(&mut self, start: i32, end: i32) {
        self.pixel_start = start;
        self.pixel_end = end;
    }

    /// `(start, end)` pixel coordinates; reversed for vertical rulers.
    #[must_use]
    pub const fn pixel_range(&self) -> (i32, i32) {
        (self.pixel_start, self.pixel_end)
    }

    /// Pixel coordinate of `value` along this ruler, truncated toward zero.
    ///
    /// Meaningless (but never panicking) while the limits have zero width.
    #[must_use]
    pub fn to_pixel(&self, value: f32) -> i32 {
        let span = f64::from(self.pixel_end) - f64::from(self.pixel_start);
        let ratio =
            (f64::from(value) - f64::from(self.lower)) / (f64::from(self.upper) - f64::from(self.lower));
        self.pixel_start.saturating_add((span * ratio) as i32)
    }

    /// Value at a pixel coordinate, the inverse of [`Ruler::to_pixel`].
    #[must_use]
    pub fn to_value(&self, pixel: i32) -> f32 {
        let span = f64::from(self.pixel_end) - f64::from(self.pixel_start);
        let ratio = (f64::from(pixel) - f64::from(self.pixel_start)) / span;
        (f64::from(self.lower) + ratio * (f64::from(self.upper) - f64::from(self.lower))) as f32
    }

    /// Pixel positions of every tick.
    #[must_use]
    pub fn tick_pixels(&self) -> Vec<i32> {
        self.ticks.iter().map(|&t| self.to_pixel(t)).collect()
    }

    /// Whether `pixel` lies within the pixel range, inclusive.
    #[must_use]
    pub fn contains_pixel(&self, pixel: i32) -> bool {
        let lo = self.pixel_start.min(self.pixel_end);
        let hi = self.pixel_start.max(self.pixel_end);
        (lo..=hi).contains(&pixel)
    }

    /// Fraction of the pixel range, from `start`, where the origin sits.
    #[must_use]
    pub const fn origin(&self) -> f32 {
        self.origin
    }

    /// Set the origin fraction, clamped to `[0, 1]`.
    pub fn set_origin(&mut self, origin: f32) {
        self.origin = origin.clamp(0.0, 1.0);
    }

    /// Pixel coordinate of the origin.
    #[must_use]
    pub fn origin_pixel(&self) -> i32 {
        let span = f64::from(self.pixel_end) - f64::from(self.pixel_start);
        self.pixel_start + (span * f64::from(self.origin)) as i32
    }

    // ========================================================================
    // Placement
    // ========================================================================

    /// Location relative to the perpendicular ruler.
    #[must_use]
    pub const fn location(&self) -> RulerLocation {
        self.location
    }

    /// Set the location relative to the perpendicular ruler.
    pub fn set_location(&mut self, location: RulerLocation) {
        self.location = location;
    }

    /// Coordinate of the ruler line on the perpendicular axis.
    #[must_use]
    pub const fn placement(&self) -> i32 {
        self.placement
    }

    /// Override the placement directly (stacked rulers sit outside the box).
    pub fn set_placement(&mut self, placement: i32) {
        self.placement = placement;
    }

    /// Resolve the placement from the perpendicular ruler's pixel range.
    pub fn update_placement(&mut self, other: &Ruler) {
        self.placement = match self.location {
            RulerLocation::Start => other.pixel_start,
            RulerLocation::End => other.pixel_end,
            RulerLocation::Origin => other.origin_pixel(),
        };
    }

    // ========================================================================
    // Appearance
    // ========================================================================

    /// Tick direction.
    #[must_use]
    pub const fn tick_direction(&self) -> TickDirection {
        self.tick_direction
    }

    /// Set the tick direction.
    pub fn set_tick_direction(&mut self, direction: TickDirection) {
        self.tick_direction = direction;
    }

    /// Tick mark length in pixels.
    #[must_use]
    pub const fn tick_length(&self) -> i32 {
        self.tick_length
    }

    /// Set the tick mark length.
    pub fn set_tick_length(&mut self, length: i32) {
        self.tick_length = length.max(0);
    }

    /// Explicit color, if one was set.
    #[must_use]
    pub const fn color(&self) -> Option<Rgba> {
        self.color
    }

    /// Set or clear the explicit color.
    pub fn set_color(&mut self, color: Option<Rgba>) {
        self.color = color;
    }

    /// Whether the ruler is drawn.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the ruler.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Axis label text.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Set or clear the axis label.
    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Draw the ruler line, tick marks, tick labels and axis label.
    ///
    /// Ticks outside the pixel range are skipped.
    pub fn render(&self, surface: &mut dyn Surface, color: Rgba) {
        if !self.visible {
            return;
        }

        let (start, end) = self.pixel_range();
        let p = self.placement;
        // +1 when the box lies toward increasing perpendicular pixels.
        let inward = match (self.orientation, self.location) {
            (Orientation::Horizontal, RulerLocation::End) => 1,
            (Orientation::Horizontal, _) => -1,
            (Orientation::Vertical, RulerLocation::End) => -1,
            (Orientation::Vertical, _) => 1,
        };
        let len = self.tick_length;
        let (tick_from, tick_to) = match self.tick_direction {
            TickDirection::In => (p, p + inward * len),
            TickDirection::Out => (p, p - inward * len),
            TickDirection::Both => (p - len, p + len),
        };
        let outer_extent = match self.tick_direction {
            TickDirection::In => 0,
            TickDirection::Out | TickDirection::Both => len,
        };

        let visible_ticks: Vec<(i32, &str)> = self
            .tick_pixels()
            .into_iter()
            .zip(self.tick_labels.iter().map(String::as_str))
            .filter(|&(px, _)| self.contains_pixel(px))
            .collect();

        match self.orientation {
            Orientation::Horizontal => {
                surface.draw_line(start, p, end, p, color, 1.0);
                for &(px, _) in &visible_ticks {
                    surface.draw_line(px, tick_from, px, tick_to, color, 1.0);
                }

                let labels_below = inward < 0;
                let baseline = if labels_below {
                    p + 14 + outer_extent
                } else {
                    p - 2 - outer_extent
                };
                for &(px, text) in &visible_ticks {
                    surface.draw_text(
                        text,
                        px,
                        baseline,
                        color,
                        TextAnchor::Middle,
                        TextOrientation::Horizontal,
                    );
                }

                if let Some(label) = &self.label {
                    let y = if labels_below {
                        p + 32 + outer_extent
                    } else {
                        p - 20 - outer_extent
                    };
                    surface.draw_text(
                        label,
                        (start + end) / 2,
                        y,
                        color,
                        TextAnchor::Middle,
                        TextOrientation::Horizontal,
                    );
                }
            }
            Orientation::Vertical => {
                surface.draw_line(p, start, p, end, color, 1.0);
                for &(py, _) in &visible_ticks {
                    surface.draw_line(tick_from, py, tick_to, py, color, 1.0);
                }

                let labels_left = inward > 0;
                let mut widest = 0;
                for &(py, text) in &visible_ticks {
                    let metrics = surface.measure_text(text);
                    widest = widest.max(metrics.width);
                    let x = if labels_left {
                        p - LABEL_GAP - outer_extent - metrics.width
                    } else {
                        p + LABEL_GAP + outer_extent
                    };
                    surface.draw_text(
                        text,
                        x,
                        py + 5,
                        color,
                        TextAnchor::Start,
                        TextOrientation::Horizontal,
                    );
                }

                if let Some(label) = &self.label {
                    let ascent = surface.measure_text(label).ascent;
                    let offset = LABEL_GAP + outer_extent + widest + 4;
                    let x = if labels_left {
                        p - offset
                    } else {
                        p + offset + ascent
                    };
                    surface.draw_text(
                        label,
                        x,
                        (start + end) / 2,
                        color,
                        TextAnchor::Middle,
                        TextOrientation::Vertical,
                    );
                }
            }
        }
    }
}

impl Default for Ruler {
    fn default() -> Self {
        Self::horizontal()
    }
}

// ============================================================================
// Label formatting
// ============================================================================

/// Fraction digits used for tick labels over the limits `[lower, upper]`.
///
/// Three significant digits across the span: `floor(log10(span)) - 2`, with
/// negative values giving that many fraction digits and anything else giving
/// integer labels.
#[must_use]
pub fn fraction_digits(lower: f32, upper: f32) -> usize {
    let span = f64::from(upper) - f64::from(lower);
    if !span.is_finite() || span <= 0.0 {
        return 0;
    }
    let digits = span.log10().floor() as i32 - 2;
    if digits < 0 {
        (digits.unsigned_abs() as usize).min(MAX_FRACTION_DIGITS)
    } else {
        0
    }
}

/// Format a tick value with at most `digits` fraction digits.
///
/// Trailing zeros are dropped and negative zero prints as `0`.
#[must_use]
pub fn format_tick(value: f32, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let mut text = format!("{value:.digits$}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}
