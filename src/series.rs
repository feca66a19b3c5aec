//! Data series: paired X/Y samples with finite-value extrema.
//!
//! A series either owns a copy of its data, with extrema computed once, or
//! references caller-held buffers and recomputes extrema on every read so
//! the caller may keep mutating them between redraws.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Buffer shared between the caller and a referenced series.
pub type SharedBuffer = Arc<RwLock<Vec<f32>>>;

/// Wrap a vector in a [`SharedBuffer`].
#[must_use]
pub fn shared(values: Vec<f32>) -> SharedBuffer {
    Arc::new(RwLock::new(values))
}

/// Minimum and maximum over the finite values of a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Smallest finite value.
    pub min: f32,
    /// Largest finite value.
    pub max: f32,
}

impl Extent {
    /// Extent of the finite values in `values`, `None` if there are none.
    #[must_use]
    pub fn of(values: &[f32]) -> Option<Self> {
        values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| {
                Some(match acc {
                    None => Self { min: v, max: v },
                    Some(e) => Self {
                        min: e.min.min(v),
                        max: e.max.max(v),
                    },
                })
            })
    }

    /// Smallest extent covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// `max - min`.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max - self.min
    }
}

/// How a series holds its samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The series owns a private copy.
    Copied,
    /// The series reads caller-held buffers.
    Referenced,
}

#[derive(Debug, Clone)]
enum SeriesData {
    Copied {
        x: Vec<f32>,
        y: Vec<f32>,
        x_extent: Option<Extent>,
        y_extent: Option<Extent>,
    },
    Referenced {
        x: SharedBuffer,
        y: SharedBuffer,
    },
}

fn read(buffer: &SharedBuffer) -> RwLockReadGuard<'_, Vec<f32>> {
    // Plain floats stay valid even if a writer panicked.
    buffer.read().unwrap_or_else(PoisonError::into_inner)
}

/// A line to be drawn in a plot box.
#[derive(Debug, Clone)]
pub struct Series {
    data: SeriesData,
    color: Option<Rgba>,
    width: f32,
    name: Option<String>,
}

impl Series {
    /// Copy `x` and `y` and compute their extrema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if the lengths differ.
    pub fn copied(x: &[f32], y: &[f32]) -> Result<Self> {
        Ok(Self::styled(copied_data(x, y)?))
    }

    /// Reference caller-held buffers without copying.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if the lengths differ at attach
    /// time. Later resizes by the caller are tolerated; see [`Series::len`].
    pub fn referenced(x: SharedBuffer, y: SharedBuffer) -> Result<Self> {
        let (x_len, y_len) = (read(&x).len(), read(&y).len());
        if x_len != y_len {
            return Err(Error::DataLengthMismatch { x_len, y_len });
        }
        Ok(Self::styled(SeriesData::Referenced { x, y }))
    }

    fn styled(data: SeriesData) -> Self {
        Self {
            data,
            color: None,
            width: 1.0,
            name: None,
        }
    }

    /// Replace the samples with a fresh copy, keeping the style.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if the lengths differ; the series
    /// is left unchanged in that case.
    pub fn set_data(&mut self, x: &[f32], y: &[f32]) -> Result<()> {
        self.data = copied_data(x, y)?;
        Ok(())
    }

    /// Whether the samples are copied or referenced.
    #[must_use]
    pub const fn ownership(&self) -> Ownership {
        match self.data {
            SeriesData::Copied { .. } => Ownership::Copied,
            SeriesData::Referenced { .. } => Ownership::Referenced,
        }
    }

    /// Number of sample pairs, the shorter of the two buffers.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.data {
            SeriesData::Copied { x, .. } => x.len(),
            SeriesData::Referenced { x, y } => read(x).len().min(read(y).len()),
        }
    }

    /// True when there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // Extrema
    // ========================================================================

    /// Extent of the finite X values.
    #[must_use]
    pub fn x_extent(&self) -> Option<Extent> {
        match &self.data {
            SeriesData::Copied { x_extent, .. } => *x_extent,
            SeriesData::Referenced { x, .. } => Extent::of(&read(x)),
        }
    }

    /// Extent of the finite Y values.
    #[must_use]
    pub fn y_extent(&self) -> Option<Extent> {
        match &self.data {
            SeriesData::Copied { y_extent, .. } => *y_extent,
            SeriesData::Referenced { y, .. } => Extent::of(&read(y)),
        }
    }

    /// Smallest finite X.
    #[must_use]
    pub fn x_min(&self) -> Option<f32> {
        self.x_extent().map(|e| e.min)
    }

    /// Largest finite X.
    #[must_use]
    pub fn x_max(&self) -> Option<f32> {
        self.x_extent().map(|e| e.max)
    }

    /// Smallest finite Y.
    #[must_use]
    pub fn y_min(&self) -> Option<f32> {
        self.y_extent().map(|e| e.min)
    }

    /// Largest finite Y.
    #[must_use]
    pub fn y_max(&self) -> Option<f32> {
        self.y_extent().map(|e| e.max)
    }

    /// Whether any X value is finite.
    #[must_use]
    pub fn has_finite_x(&self) -> bool {
        self.x_extent().is_some()
    }

    /// Whether any Y value is finite.
    #[must_use]
    pub fn has_finite_y(&self) -> bool {
        self.y_extent().is_some()
    }

    /// Call `f` with every `(x, y)` pair in order.
    ///
    /// Referenced buffers stay read-locked for the duration of the walk.
    pub fn visit_points(&self, mut f: impl FnMut(f32, f32)) {
        match &self.data {
            SeriesData::Copied { x, y, .. } => {
                x.iter().zip(y).for_each(|(&a, &b)| f(a, b));
            }
            SeriesData::Referenced { x, y } => {
                let (x, y) = (read(x), read(y));
                x.iter().zip(y.iter()).for_each(|(&a, &b)| f(a, b));
            }
        }
    }

    // ========================================================================
    // Style
    // ========================================================================

    /// Set an explicit color.
    #[must_use]
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the line width in pixels.
    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width.max(0.5);
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Explicit or assigned color.
    #[must_use]
    pub const fn color(&self) -> Option<Rgba> {
        self.color
    }

    /// Assign a color; used by the box for uncolored series.
    pub fn set_color(&mut self, color: Rgba) {
        self.color = Some(color);
    }

    /// Line width in pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

fn copied_data(x: &[f32], y: &[f32]) -> Result<SeriesData> {
    if x.len() != y.len() {
        return Err(Error::DataLengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    Ok(SeriesData::Copied {
        x: x.to_vec(),
        y: y.to_vec(),
        x_extent: Extent::of(x),
        y_extent: Extent::of(y),
    })
}
