//! # axplot
//!
//! Toolkit-independent 2D line plotting engine in the spirit of MATLAB figures.
//!
//! axplot owns the model and the math of a plot: rulers with ticks and value
//! to pixel mapping, series bound to one of several Y rulers, autoscaling,
//! multi-Y ruler layout, grid subplots and rubber-band zoom, wheel zoom and
//! drag pan. Drawing goes through the small [`render::Surface`] trait, so any
//! toolkit can host a figure. A software [`render::Canvas`] (PNG output) and a
//! vector [`output::SvgSurface`] ship with the crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use axplot::prelude::*;
//!
//! # fn main() -> axplot::Result<()> {
//! let mut figure = Figure::new();
//! let plot = figure.new_box();
//! plot.set_hold(true);
//! plot.add_series(Series::copied(&[0.0, 1.0, 2.0], &[1.0, 4.0, 9.0])?, 0)?;
//! plot.add_series(Series::copied(&[0.0, 1.0, 2.0], &[100.0, 50.0, 0.0])?, 1)?;
//! plot.autoscale();
//! plot.x_label("time");
//!
//! let svg = SvgSurface::from_figure(&mut figure, 800, 600).render();
//! assert!(svg.starts_with("<svg"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/Deserialize for configuration, colors and geometry

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Colors and the series palette.
pub mod color;

/// Layout and interaction defaults.
pub mod config;

/// RGBA pixel buffer for raster output.
pub mod framebuffer;

/// Pixel points, pixel rectangles and normalized positions.
pub mod geometry;

// ============================================================================
// Plot Model
// ============================================================================

/// Axis rulers: limits, ticks, labels and value to pixel mapping.
pub mod ruler;

/// Data series with copied or shared buffers.
pub mod series;

/// Multi-Y ruler layout and coloring.
pub mod composer;

/// Zoom and pan arithmetic.
pub mod interaction;

/// A single plotting box with one X ruler and up to sixteen Y rulers.
pub mod plot_box;

/// Grid of subplot boxes.
pub mod grid;

/// Caller-held container of boxes and pointer gesture routing.
pub mod figure;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Drawing surfaces and rasterization.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for axplot operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use axplot::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::PlotConfig;
    pub use crate::error::{Error, Result};
    pub use crate::figure::Figure;
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{NormalizedPosition, PixelPoint, PixelRect};
    pub use crate::grid::Grid;
    pub use crate::output::{PngEncoder, SvgSurface};
    pub use crate::plot_box::PlotBox;
    pub use crate::render::{Canvas, Surface};
    pub use crate::ruler::{Orientation, Ruler, RulerLocation, TickDirection};
    pub use crate::series::{shared, Series, SharedBuffer};
}
