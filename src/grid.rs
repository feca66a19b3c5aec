//! Grid of plot boxes, in the manner of MATLAB `subplot`.
//!
//! Boxes are stored row-major with the top row first. Each box sits in its
//! cell at the grid inset, a position expressed in cell fractions.

use crate::config::PlotConfig;
use crate::error::{Error, Result};
use crate::geometry::NormalizedPosition;
use crate::plot_box::PlotBox;
use crate::render::Surface;

/// `cols` x `rows` plot boxes sharing one parent.
#[derive(Debug, Clone)]
pub struct Grid {
    cols: usize,
    rows: usize,
    inset: NormalizedPosition,
    boxes: Vec<PlotBox>,
}

impl Grid {
    /// A grid with default box settings and inset.
    ///
    /// Either dimension may be zero, which yields an empty grid.
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::with_config(cols, rows, &PlotConfig::default())
    }

    /// A grid whose boxes and inset come from `config`.
    #[must_use]
    pub fn with_config(cols: usize, rows: usize, config: &PlotConfig) -> Self {
        let mut grid = Self {
            cols,
            rows,
            inset: config.grid_inset,
            boxes: (0..cols * rows).map(|_| PlotBox::from_config(config)).collect(),
        };
        grid.update_positions();
        grid
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// True for a grid without boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Current inset in cell fractions.
    #[must_use]
    pub const fn grid_position(&self) -> NormalizedPosition {
        self.inset
    }

    /// Position of the cell at `(row, col)` for the current inset.
    #[must_use]
    pub fn cell_position(&self, row: usize, col: usize) -> NormalizedPosition {
        let cols = self.cols as f64;
        let rows = self.rows as f64;
        NormalizedPosition::new(
            col as f64 / cols + self.inset.x / cols,
            self.rows.saturating_sub(row + 1) as f64 / rows + self.inset.y / rows,
            self.inset.width / cols,
            self.inset.height / rows,
        )
    }

    /// Change the inset and move every box; rulers, series and limits stay.
    pub fn set_grid_position(&mut self, inset: NormalizedPosition) {
        self.inset = inset;
        self.update_positions();
    }

    /// [`Grid::set_grid_position`] from an `[x, y, w, h]` slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] unless four values with non-negative
    /// width and height are given.
    pub fn set_grid_position_slice(&mut self, values: &[f64]) -> Result<()> {
        self.set_grid_position(NormalizedPosition::from_slice(values)?);
        Ok(())
    }

    fn update_positions(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let position = self.cell_position(row, col);
                self.boxes[row * self.cols + col].set_position(position);
            }
        }
    }

    /// Box at `(row, col)`, top row first.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&PlotBox> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.boxes.get(row * self.cols + col)
    }

    /// Mutable box at `(row, col)`.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut PlotBox> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.boxes.get_mut(row * self.cols + col)
    }

    /// Box `n`, counted from 1 in row-major order like `subplot(m, n, p)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `n` is 0 or beyond the last box.
    pub fn nth(&self, n: usize) -> Result<&PlotBox> {
        let len = self.boxes.len();
        n.checked_sub(1)
            .and_then(|i| self.boxes.get(i))
            .ok_or_else(|| out_of_range(n, len))
    }

    /// Mutable box `n`, counted from 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `n` is 0 or beyond the last box.
    pub fn nth_mut(&mut self, n: usize) -> Result<&mut PlotBox> {
        let len = self.boxes.len();
        n.checked_sub(1)
            .and_then(|i| self.boxes.get_mut(i))
            .ok_or_else(|| out_of_range(n, len))
    }

    /// Boxes in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, PlotBox> {
        self.boxes.iter()
    }

    /// Mutable boxes in row-major order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, PlotBox> {
        self.boxes.iter_mut()
    }

    /// Render every box.
    pub fn render(&mut self, surface: &mut dyn Surface, parent_w: u32, parent_h: u32) {
        for plot in &mut self.boxes {
            plot.render(surface, parent_w, parent_h);
        }
    }
}

fn out_of_range(n: usize, len: usize) -> Error {
    Error::InvalidArgument(format!("grid box {n} out of range 1..={len}"))
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a PlotBox;
    type IntoIter = std::slice::Iter<'a, PlotBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Grid {
    type Item = &'a mut PlotBox;
    type IntoIter = std::slice::IterMut<'a, PlotBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
