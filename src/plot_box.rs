//! Plot box: an X ruler, one or more Y rulers and the series drawn in them.
//!
//! The box follows MATLAB `axes` conventions: with hold off every added series
//! replaces the previous ones and rescales the box, with hold on series pile
//! up and scaling is left to the caller.
//!
//! ```
//! use axplot::plot_box::PlotBox;
//! use axplot::series::Series;
//!
//! let mut plot = PlotBox::new();
//! plot.add_series(Series::copied(&[0.0, 1.0, 2.0], &[3.0, 3.0, 3.0])?, 0)?;
//! assert_eq!(plot.x_ruler().limits(), (0.0, 2.0));
//! assert_eq!(plot.y_ruler(0).map(|r| r.limits()), Some((2.0, 4.0)));
//! # Ok::<(), axplot::Error>(())
//! ```

use crate::color::Rgba;
use crate::composer::{self, Topology};
use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::geometry::{NormalizedPosition, PixelPoint, PixelRect};
use crate::interaction;
use crate::render::Surface;
use crate::ruler::Ruler;
use crate::series::{Extent, Series};

/// Most Y rulers a single box can carry.
pub const MAX_Y_RULERS: usize = 16;

/// Extents below this width count as constant data when generating ticks.
const DEGENERATE_WIDTH: f32 = 1e-40;

/// A rectangular plotting area with its rulers and series.
#[derive(Debug, Clone)]
pub struct PlotBox {
    position: NormalizedPosition,
    pixel_rect: PixelRect,
    x_ruler: Ruler,
    y_rulers: Vec<Ruler>,
    series: Vec<(Series, usize)>,
    hold: bool,
    visible: bool,
    background: Rgba,
    outline: Rgba,
    spacing: f64,
    tick_length: i32,
}

impl Default for PlotBox {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotBox {
    /// A box at the default position with one Y ruler and hold off.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&PlotConfig::default())
    }

    /// A box using the position, spacing, tick length and colors of `config`.
    #[must_use]
    pub fn from_config(config: &PlotConfig) -> Self {
        let mut x_ruler = Ruler::horizontal();
        x_ruler.set_tick_length(config.tick_length);
        let mut plot = Self {
            position: config.box_position,
            pixel_rect: PixelRect::default(),
            x_ruler,
            y_rulers: Vec::new(),
            series: Vec::new(),
            hold: false,
            visible: true,
            background: config.background,
            outline: config.outline,
            spacing: config.ruler_spacing,
            tick_length: config.tick_length,
        };
        plot.push_y_ruler();
        plot
    }

    // ========================================================================
    // Position and layout
    // ========================================================================

    /// Outer position within the parent.
    #[must_use]
    pub const fn position(&self) -> NormalizedPosition {
        self.position
    }

    /// Set the outer position.
    pub fn set_position(&mut self, position: NormalizedPosition) {
        self.position = position;
    }

    /// Set the outer position from an `[x, y, w, h]` slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] unless four values with non-negative
    /// size are given.
    pub fn set_position_slice(&mut self, values: &[f64]) -> Result<()> {
        self.position = NormalizedPosition::from_slice(values)?;
        Ok(())
    }

    /// Position of the box itself once stacked rulers took their room.
    #[must_use]
    pub fn effective_position(&self) -> NormalizedPosition {
        composer::effective_position(self.position, self.y_rulers.len(), self.spacing)
    }

    /// Horizontal distance between stacked rulers, in parent fractions.
    #[must_use]
    pub const fn ruler_spacing(&self) -> f64 {
        self.spacing
    }

    /// Set the stacked ruler spacing.
    pub fn set_ruler_spacing(&mut self, spacing: f64) {
        self.spacing = spacing;
    }

    /// Pixel rectangle of the box inside a `parent_w` x `parent_h` parent.
    #[must_use]
    pub fn compute_pixel_rect(&self, parent_w: u32, parent_h: u32) -> PixelRect {
        self.effective_position().to_pixels(parent_w, parent_h)
    }

    /// Store the pixel rectangle and hand it to every ruler.
    pub fn layout(&mut self, parent_w: u32, parent_h: u32) {
        let rect = self.compute_pixel_rect(parent_w, parent_h);
        self.pixel_rect = rect;
        self.x_ruler.set_pixel_range(rect.left, rect.right);
        for ruler in &mut self.y_rulers {
            ruler.set_pixel_range(rect.bottom, rect.top);
        }
        composer::arrange(&mut self.x_ruler, &mut self.y_rulers, parent_w, self.spacing);
        log::trace!(
            "layout {parent_w}x{parent_h}: box {rect:?}, {} y rulers",
            self.y_rulers.len()
        );
    }

    /// Rectangle from the last [`PlotBox::layout`].
    #[must_use]
    pub const fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    /// Whether a pixel lies in the laid-out box, edges included.
    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        self.pixel_rect.contains(x, y)
    }

    // ========================================================================
    // Rulers
    // ========================================================================

    /// The X ruler.
    #[must_use]
    pub const fn x_ruler(&self) -> &Ruler {
        &self.x_ruler
    }

    /// Mutable access to the X ruler.
    pub fn x_ruler_mut(&mut self) -> &mut Ruler {
        &mut self.x_ruler
    }

    /// Y ruler `index`, 0 being the primary.
    #[must_use]
    pub fn y_ruler(&self, index: usize) -> Option<&Ruler> {
        self.y_rulers.get(index)
    }

    /// Mutable access to Y ruler `index`.
    pub fn y_ruler_mut(&mut self, index: usize) -> Option<&mut Ruler> {
        self.y_rulers.get_mut(index)
    }

    /// All Y rulers.
    #[must_use]
    pub fn y_rulers(&self) -> &[Ruler] {
        &self.y_rulers
    }

    /// Arrangement implied by the number of Y rulers.
    #[must_use]
    pub fn topology(&self) -> Topology {
        Topology::for_ruler_count(self.y_rulers.len())
    }

    /// Create Y rulers until `index` exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `index` is not below
    /// [`MAX_Y_RULERS`]; no ruler is created in that case.
    pub fn ensure_y_ruler(&mut self, index: usize) -> Result<()> {
        if index >= MAX_Y_RULERS {
            return Err(Error::InvalidArgument(format!(
                "y ruler index {index} exceeds the maximum of {MAX_Y_RULERS} rulers"
            )));
        }
        while self.y_rulers.len() <= index {
            self.push_y_ruler();
            log::debug!("created y ruler {}", self.y_rulers.len() - 1);
        }
        Ok(())
    }

    fn push_y_ruler(&mut self) {
        let mut ruler = Ruler::vertical();
        ruler.set_location(composer::default_location(self.y_rulers.len()));
        ruler.set_tick_length(self.tick_length);
        self.y_rulers.push(ruler);
    }

    fn existing_y_ruler(&mut self, index: usize) -> Result<&mut Ruler> {
        let count = self.y_rulers.len();
        self.y_rulers.get_mut(index).ok_or_else(|| {
            Error::InvalidArgument(format!("y ruler {index} does not exist ({count} rulers)"))
        })
    }

    /// Set X limits with ticks every tenth of the range.
    pub fn set_x_limits(&mut self, lower: f32, upper: f32) {
        self.x_ruler.set_limits(lower, upper);
        self.x_ruler.set_ticks_range(lower, (upper - lower) / 10.0, upper);
    }

    /// Set the limits of Y ruler `index` with ticks every tenth of the range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the ruler does not exist.
    pub fn set_y_limits(&mut self, index: usize, lower: f32, upper: f32) -> Result<()> {
        let ruler = self.existing_y_ruler(index)?;
        ruler.set_limits(lower, upper);
        ruler.set_ticks_range(lower, (upper - lower) / 10.0, upper);
        Ok(())
    }

    /// Set the X axis label.
    pub fn x_label(&mut self, label: impl Into<String>) {
        self.x_ruler.set_label(Some(label.into()));
    }

    /// Set the label of Y ruler `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the ruler does not exist.
    pub fn y_label(&mut self, index: usize, label: impl Into<String>) -> Result<()> {
        self.existing_y_ruler(index)?.set_label(Some(label.into()));
        Ok(())
    }

    // ========================================================================
    // Series
    // ========================================================================

    /// Whether series accumulate.
    #[must_use]
    pub const fn hold(&self) -> bool {
        self.hold
    }

    /// Set the hold state.
    pub fn set_hold(&mut self, hold: bool) {
        self.hold = hold;
    }

    /// Series with the index of the Y ruler they are plotted against.
    pub fn series(&self) -> impl Iterator<Item = (&Series, usize)> {
        self.series.iter().map(|(s, i)| (s, *i))
    }

    /// Number of series.
    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Remove every series.
    pub fn clear_series(&mut self) {
        self.series.clear();
    }

    /// Plot `series` against Y ruler `ruler_index`, creating rulers as needed.
    ///
    /// Uncolored series get the next palette color of their ruler. With hold
    /// off the previous series are dropped, the box is rescaled to the new
    /// series and ticks are regenerated from its extents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `ruler_index` is not below
    /// [`MAX_Y_RULERS`]. Nothing changes in that case.
    pub fn add_series(&mut self, mut series: Series, ruler_index: usize) -> Result<()> {
        self.ensure_y_ruler(ruler_index)?;
        if !self.hold {
            self.series.clear();
        }

        if series.color().is_none() {
            let on_ruler = self.series.iter().filter(|(_, i)| *i == ruler_index).count();
            series.set_color(composer::series_color(on_ruler, ruler_index));
        }

        let x_extent = series.x_extent();
        let y_extent = series.y_extent();
        self.series.push((series, ruler_index));

        if self.hold {
            return Ok(());
        }

        self.autoscale_x();
        self.autoscale_y(ruler_index);
        if let Some(extent) = x_extent {
            apply_extent_ticks(&mut self.x_ruler, extent, 5.0);
        }
        if let (Some(extent), Some(ruler)) = (y_extent, self.y_rulers.get_mut(ruler_index)) {
            apply_extent_ticks(ruler, extent, 10.0);
        }
        Ok(())
    }

    // ========================================================================
    // Autoscale
    // ========================================================================

    /// Fit the X limits to the finite X values of every series.
    pub fn autoscale_x(&mut self) {
        let extent = self
            .series
            .iter()
            .filter_map(|(s, _)| s.x_extent())
            .reduce(Extent::union);
        if let Some(e) = extent {
            self.set_x_limits(e.min, e.max);
        }
    }

    /// Fit Y ruler `index` to the finite Y values of its series.
    ///
    /// Constant data is padded by one unit on both sides, or by a few f32
    /// steps for magnitudes where one unit is below the float resolution.
    /// Rulers without any finite data keep their limits.
    pub fn autoscale_y(&mut self, index: usize) {
        let extent = self
            .series
            .iter()
            .filter(|(_, i)| *i == index)
            .filter_map(|(s, _)| s.y_extent())
            .reduce(Extent::union);
        let Some(mut e) = extent else {
            return;
        };
        if e.min == e.max {
            // One unit, widened where f32 spacing would swallow it.
            let pad = 1.0_f32.max(e.min.abs() * f32::EPSILON * 4.0);
            e.min -= pad;
            e.max += pad;
        }
        if self.set_y_limits(index, e.min, e.max).is_err() {
            log::debug!("autoscale skipped missing y ruler {index}");
        }
    }

    /// Autoscale X and every Y ruler.
    pub fn autoscale(&mut self) {
        self.autoscale_x();
        for index in 0..self.y_rulers.len() {
            self.autoscale_y(index);
        }
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Zoom into the pixel rectangle dragged from `start` to `end`.
    ///
    /// Each ruler is updated only where its new range is valid. Returns
    /// whether anything changed.
    pub fn zoom_box(&mut self, start: PixelPoint, end: PixelPoint) -> bool {
        let mut changed = false;
        if let Some((lo, hi)) = interaction::zoom_range(&self.x_ruler, start.x, end.x) {
            self.set_x_limits(lo, hi);
            changed = true;
        }
        for ruler in &mut self.y_rulers {
            if let Some((lo, hi)) = interaction::zoom_range(ruler, start.y, end.y) {
                set_limits_with_ticks(ruler, lo, hi);
                changed = true;
            }
        }
        if !changed {
            log::debug!("zoom box {start:?}..{end:?} rejected");
        }
        changed
    }

    /// Scale every ruler by `factor` around the pointer.
    pub fn zoom_at(&mut self, point: PixelPoint, factor: f32) -> bool {
        let mut changed = false;
        if let Some((lo, hi)) = interaction::zoom_at_point(&self.x_ruler, point.x, factor) {
            self.set_x_limits(lo, hi);
            changed = true;
        }
        for ruler in &mut self.y_rulers {
            if let Some((lo, hi)) = interaction::zoom_at_point(ruler, point.y, factor) {
                set_limits_with_ticks(ruler, lo, hi);
                changed = true;
            }
        }
        if !changed {
            log::debug!("zoom by {factor} at {point:?} rejected");
        }
        changed
    }

    /// Move the content along with a drag of `(dx, dy)` pixels.
    pub fn pan(&mut self, dx: i32, dy: i32) -> bool {
        let mut changed = false;
        if let Some((lo, hi)) = interaction::pan_ruler(&self.x_ruler, dx) {
            self.set_x_limits(lo, hi);
            changed = true;
        }
        for ruler in &mut self.y_rulers {
            if let Some((lo, hi)) = interaction::pan_ruler(ruler, dy) {
                set_limits_with_ticks(ruler, lo, hi);
                changed = true;
            }
        }
        if !changed {
            log::debug!("pan by ({dx}, {dy}) rejected");
        }
        changed
    }

    // ========================================================================
    // Appearance
    // ========================================================================

    /// Whether the box background and outline are drawn.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the box background and outline.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Set the background color.
    pub fn set_background(&mut self, color: Rgba) {
        self.background = color;
    }

    /// Set the outline color.
    pub fn set_outline(&mut self, color: Rgba) {
        self.outline = color;
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Lay out for the given parent size and draw everything.
    ///
    /// Series are clipped to the box. Series on a ruler pair whose limits are
    /// not a finite, increasing range are skipped, and so is every segment
    /// with a non-finite endpoint.
    pub fn render(&mut self, surface: &mut dyn Surface, parent_w: u32, parent_h: u32) {
        self.layout(parent_w, parent_h);
        let rect = self.pixel_rect;

        if self.visible {
            if rect.width() > 2 && rect.height() > 2 {
                let interior =
                    PixelRect::new(rect.left + 1, rect.top + 1, rect.right - 1, rect.bottom - 1);
                surface.fill_rect(interior, self.background);
            }
            surface.draw_rect(rect, self.outline);
        }

        self.x_ruler
            .render(surface, self.x_ruler.color().unwrap_or(Rgba::BLACK));
        let count = self.y_rulers.len();
        for (index, ruler) in self.y_rulers.iter().enumerate() {
            ruler.render(surface, composer::ruler_color(ruler.color(), index, count));
        }

        surface.set_clip(Some(rect));
        for (index, y_ruler) in self.y_rulers.iter().enumerate() {
            if !self.x_ruler.has_usable_limits() || !y_ruler.has_usable_limits() {
                continue;
            }
            for (series, _) in self.series.iter().filter(|(_, i)| *i == index) {
                draw_series(surface, series, &self.x_ruler, y_ruler);
            }
        }
        surface.set_clip(None);
    }
}

fn set_limits_with_ticks(ruler: &mut Ruler, lower: f32, upper: f32) {
    ruler.set_limits(lower, upper);
    ruler.set_ticks_range(lower, (upper - lower) / 10.0, upper);
}

/// Ticks from a series extent: `divisions` steps across it, or half-unit
/// steps around constant data.
fn apply_extent_ticks(ruler: &mut Ruler, extent: Extent, divisions: f32) {
    if extent.width() < DEGENERATE_WIDTH {
        ruler.set_ticks_range(extent.min - 0.5, 0.5, extent.max + 0.5);
    } else {
        ruler.set_ticks_range(extent.min, extent.width() / divisions, extent.max);
    }
}

fn draw_series(surface: &mut dyn Surface, series: &Series, x_ruler: &Ruler, y_ruler: &Ruler) {
    let color = series.color().unwrap_or(Rgba::BLUE);
    let width = series.width();
    let mut previous: Option<(f32, f32)> = None;

    series.visit_points(|x, y| {
        if let Some((px, py)) = previous {
            if px.is_finite() && py.is_finite() && x.is_finite() && y.is_finite() {
                surface.draw_line(
                    x_ruler.to_pixel(px),
                    y_ruler.to_pixel(py),
                    x_ruler.to_pixel(x),
                    y_ruler.to_pixel(y),
                    color,
                    width,
                );
            }
        }
        previous = Some((x, y));
    });
}
