//! Pixel and normalized geometry.
//!
//! Pixel coordinates are integer, origin top-left, Y growing downwards.
//! Normalized positions are `f64` fractions of a parent surface with the
//! origin at the bottom-left, the way figure-relative axes positions work.

use crate::error::{Error, Result};

/// A point on the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PixelPoint {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl PixelPoint {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangle in pixel coordinates, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge.
    pub right: i32,
    /// Bottom edge.
    pub bottom: i32,
}

impl PixelRect {
    /// Create a rectangle from its four edges.
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle spanned by two corners given in any order.
    #[must_use]
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Horizontal extent (`right - left`).
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Vertical extent (`bottom - top`).
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Inclusive containment test on all four edges.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Clamp a point into the rectangle.
    #[must_use]
    pub fn clamp_point(&self, p: PixelPoint) -> PixelPoint {
        PixelPoint::new(
            p.x.clamp(self.left, self.right.max(self.left)),
            p.y.clamp(self.top, self.bottom.max(self.top)),
        )
    }
}

/// Position of a box inside its parent, as fractions of the parent size.
///
/// `x`/`y` locate the lower-left corner measured from the parent's lower-left
/// corner; `width`/`height` are the box size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedPosition {
    /// Left edge fraction.
    pub x: f64,
    /// Bottom edge fraction.
    pub y: f64,
    /// Width fraction.
    pub width: f64,
    /// Height fraction.
    pub height: f64,
}

impl NormalizedPosition {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Parse an `[x, y, w, h]` slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] unless exactly four values are given
    /// and width and height are non-negative.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let &[x, y, width, height] = values else {
            return Err(Error::InvalidArgument(format!(
                "position needs 4 values, got {}",
                values.len()
            )));
        };
        if width < 0.0 || height < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "position size must be non-negative, got {width}x{height}"
            )));
        }
        Ok(Self::new(x, y, width, height))
    }

    /// As an `[x, y, w, h]` array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Map into pixels of a `parent_w` x `parent_h` surface.
    ///
    /// Each edge is truncated toward zero independently.
    #[must_use]
    pub fn to_pixels(&self, parent_w: u32, parent_h: u32) -> PixelRect {
        let w = f64::from(parent_w);
        let h = f64::from(parent_h);
        PixelRect::new(
            (w * self.x) as i32,
            (h * (1.0 - self.y - self.height)) as i32,
            (w * (self.x + self.width)) as i32,
            (h * (1.0 - self.y)) as i32,
        )
    }
}
