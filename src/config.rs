//! Layout and interaction defaults.
//!
//! With the `serde` feature enabled the configuration can be loaded from any
//! serde format; missing fields fall back to their defaults.

use crate::color::Rgba;
use crate::geometry::NormalizedPosition;
use crate::interaction::{MIN_SELECTION, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};

/// Defaults consumed by [`PlotBox`](crate::plot_box::PlotBox),
/// [`Grid`](crate::grid::Grid) and [`Figure`](crate::figure::Figure).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlotConfig {
    /// Outer position of a free-standing box.
    pub box_position: NormalizedPosition,

    /// Inset of a box inside its grid cell, in cell fractions.
    pub grid_inset: NormalizedPosition,

    /// Horizontal distance between stacked Y rulers, as a fraction of the
    /// parent width.
    pub ruler_spacing: f64,

    /// Length of tick marks in pixels.
    pub tick_length: i32,

    /// Zoom factor applied for a wheel rotation toward the user.
    pub wheel_zoom_in: f32,

    /// Zoom factor applied for a wheel rotation away from the user.
    pub wheel_zoom_out: f32,

    /// A drag must exceed this many pixels on both sides to count as a
    /// zoom selection.
    pub min_selection: i32,

    /// Box interior color.
    pub background: Rgba,

    /// Box outline color.
    pub outline: Rgba,
}

/// Default outer position of a box in its figure.
pub const DEFAULT_BOX_POSITION: NormalizedPosition =
    NormalizedPosition::new(0.13, 0.11, 0.775, 0.815);

/// Default inset of a box inside a grid cell.
pub const DEFAULT_GRID_INSET: NormalizedPosition = NormalizedPosition::new(0.22, 0.20, 0.67, 0.70);

/// Default spacing between stacked Y rulers.
pub const DEFAULT_RULER_SPACING: f64 = 0.12;

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            box_position: DEFAULT_BOX_POSITION,
            grid_inset: DEFAULT_GRID_INSET,
            ruler_spacing: DEFAULT_RULER_SPACING,
            tick_length: 5,
            wheel_zoom_in: WHEEL_ZOOM_IN,
            wheel_zoom_out: WHEEL_ZOOM_OUT,
            min_selection: MIN_SELECTION,
            background: Rgba::WHITE,
            outline: Rgba::LIGHT_GRAY,
        }
    }
}

impl PlotConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stacked ruler spacing.
    #[must_use]
    pub fn ruler_spacing(mut self, spacing: f64) -> Self {
        self.ruler_spacing = spacing;
        self
    }

    /// Set the tick length.
    #[must_use]
    pub fn tick_length(mut self, length: i32) -> Self {
        self.tick_length = length;
        self
    }

    /// Set the free-standing box position.
    #[must_use]
    pub fn box_position(mut self, position: NormalizedPosition) -> Self {
        self.box_position = position;
        self
    }
}
